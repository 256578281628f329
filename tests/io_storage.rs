#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::io;
use roulement::{
    Employee, ExceptionRule, JsonStorage, Plan, Schedule, ScheduleEntry, ShiftRestriction,
    ShiftType, StatisticsRow, Storage,
};
use std::fs;
use tempfile::tempdir;

fn sample_schedule() -> Schedule {
    Schedule {
        entries: vec![
            ScheduleEntry {
                date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
                weekday: "Monday".into(),
                morning: Some(Employee::new("Ana")),
                afternoon: Some(Employee::new("Bruno")),
            },
            ScheduleEntry {
                date: NaiveDate::from_ymd_opt(2024, 6, 4).unwrap(),
                weekday: "Tuesday".into(),
                morning: Some(Employee::new("Ana")),
                afternoon: None,
            },
        ],
        statistics: vec![
            StatisticsRow {
                employee: Employee::new("Ana"),
                shifts: 2,
            },
            StatisticsRow {
                employee: Employee::new("Bruno"),
                shifts: 1,
            },
        ],
    }
}

#[test]
fn schedule_csv_leaves_unfilled_slots_blank() {
    let mut out = Vec::new();
    io::write_schedule_csv(&mut out, &sample_schedule()).unwrap();
    insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r###"
    date,weekday,morning,afternoon
    2024-06-03,Monday,Ana,Bruno
    2024-06-04,Tuesday,Ana,
    "###);
}

#[test]
fn statistics_csv_in_declaration_order() {
    let mut out = Vec::new();
    io::write_statistics_csv(&mut out, &sample_schedule()).unwrap();
    insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r###"
    employee,shifts
    Ana,2
    Bruno,1
    "###);
}

#[test]
fn json_export_keeps_nulls_for_unfilled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("schedule.json");
    io::export_schedule_json(&path, &sample_schedule()).unwrap();

    let raw = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value["entries"][1]["afternoon"], serde_json::Value::Null);
    assert_eq!(value["entries"][0]["date"], "2024-06-03");
    assert_eq!(value["statistics"][0]["shifts"], 2);
}

#[test]
fn employees_import_from_text_and_csv() {
    let dir = tempdir().unwrap();
    let text = dir.path().join("team.txt");
    fs::write(&text, "Ana\n\n  Bruno  \nCarla\n").unwrap();
    let names: Vec<String> = io::import_employees_text(&text)
        .unwrap()
        .iter()
        .map(|e| e.as_str().to_string())
        .collect();
    assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);

    let csv = dir.path().join("team.csv");
    fs::write(&csv, "name\nAna\nBruno\n").unwrap();
    assert_eq!(
        io::import_employees_csv(&csv).unwrap(),
        vec![Employee::new("Ana"), Employee::new("Bruno")]
    );
}

#[test]
fn plan_roundtrips_through_storage() {
    let dir = tempdir().unwrap();
    let storage = JsonStorage::open(dir.path().join("plan.json")).unwrap();

    let mut plan = Plan::new(2024, 6).with_employees(["Ana", "Carla"]);
    plan.rules.exceptions.push(ExceptionRule::ShiftSpecific {
        day: 10,
        shift: ShiftType::Afternoon,
        employee: Employee::new("Ana"),
    });
    plan.rules.restrictions.push(ShiftRestriction {
        employee: Employee::new("Carla"),
        shifts: [ShiftType::Afternoon].into_iter().collect(),
    });
    storage.save(&plan).unwrap();

    let loaded = storage.load().unwrap();
    assert_eq!(loaded, plan);
}

#[test]
fn hand_written_plan_file_uses_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    fs::write(
        &path,
        r#"{
            "year": 2024,
            "month": 6,
            "employees": ["Ana", "Bruno"],
            "exceptions": [{"kind": "weekday", "employee": "Bruno", "weekday": 4}],
            "fixed": [{"kind": "day_fixed", "employee": "Ana", "days": [3], "shifts": ["afternoon"]}]
        }"#,
    )
    .unwrap();

    let plan = JsonStorage::open(&path).unwrap().load().unwrap();
    assert!(plan.options.balance_workload);
    assert!(plan.rules.restrictions.is_empty());
    assert_eq!(plan.rules.exceptions.len(), 1);
    assert_eq!(plan.rules.fixed.len(), 1);
}

#[test]
fn missing_plan_is_none_but_corrupt_plan_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.json");
    let storage = JsonStorage::open(&path).unwrap();
    assert!(!storage.exists());
    assert!(storage.load_optional().unwrap().is_none());

    fs::write(&path, "{ not json").unwrap();
    assert!(storage.exists());
    assert!(storage.load_optional().is_err());

    fs::write(&path, r#"{"year": 2024, "month": 13}"#).unwrap();
    let err = storage.load().unwrap_err();
    assert!(format!("{err:#}").contains("invalid calendar input"));
}
