#![forbid(unsafe_code)]
use chrono::NaiveDate;
use roulement::rules::{parse_day_list, parse_day_range, parse_weekday_list};
use roulement::{
    is_eligible, resolve_fixed, BusinessDay, Employee, ExceptionRule, FixedAllocationRule,
    RuleSet, SchedError, ShiftRestriction, ShiftType,
};
use std::collections::BTreeSet;

fn day(d: u32) -> BusinessDay {
    BusinessDay::new(NaiveDate::from_ymd_opt(2024, 6, d).unwrap())
}

fn set<T: Ord + Clone>(items: &[T]) -> BTreeSet<T> {
    items.iter().cloned().collect()
}

#[test]
fn every_exception_kind_blocks_its_slots() {
    let ana = Employee::new("Ana");
    let exceptions = vec![
        ExceptionRule::SpecificDay {
            employee: ana.clone(),
            day: 3,
        },
        ExceptionRule::DateRange {
            employee: ana.clone(),
            start: 11,
            end: 13,
        },
        ExceptionRule::Weekday {
            employee: ana.clone(),
            weekday: 4,
        },
        ExceptionRule::ShiftSpecific {
            day: 18,
            shift: ShiftType::Afternoon,
            employee: ana.clone(),
        },
    ];
    let eligible = |d: u32, s: ShiftType| is_eligible(&ana, &day(d), s, &exceptions, &[]);

    assert!(!eligible(3, ShiftType::Morning));
    assert!(!eligible(3, ShiftType::Afternoon));
    assert!(eligible(4, ShiftType::Morning));
    for d in 11..=13 {
        assert!(!eligible(d, ShiftType::Morning));
    }
    assert!(eligible(10, ShiftType::Afternoon));
    assert!(!eligible(14, ShiftType::Morning)); // vendredi
    assert!(!eligible(21, ShiftType::Afternoon));
    assert!(eligible(18, ShiftType::Morning));
    assert!(!eligible(18, ShiftType::Afternoon));
}

#[test]
fn rules_only_apply_to_their_employee() {
    let ana = Employee::new("Ana");
    let bruno = Employee::new("Bruno");
    let exceptions = vec![ExceptionRule::SpecificDay {
        employee: ana,
        day: 3,
    }];
    let restrictions = vec![ShiftRestriction {
        employee: Employee::new("Carla"),
        shifts: set(&[ShiftType::Afternoon]),
    }];
    assert!(is_eligible(
        &bruno,
        &day(3),
        ShiftType::Morning,
        &exceptions,
        &restrictions
    ));
}

#[test]
fn restriction_bans_shift_type_every_day() {
    let carla = Employee::new("Carla");
    let restrictions = vec![ShiftRestriction {
        employee: carla.clone(),
        shifts: set(&[ShiftType::Afternoon]),
    }];
    for d in [3, 4, 5, 28] {
        assert!(is_eligible(&carla, &day(d), ShiftType::Morning, &[], &restrictions));
        assert!(!is_eligible(&carla, &day(d), ShiftType::Afternoon, &[], &restrictions));
    }
}

#[test]
fn weekday_fixed_beats_day_fixed() {
    let employees = vec![Employee::new("Ana"), Employee::new("Bruno")];
    // 10 juin 2024 = lundi
    let fixed = vec![
        FixedAllocationRule::DayFixed {
            employee: Employee::new("Ana"),
            days: set(&[10]),
            shifts: set(&[ShiftType::Morning, ShiftType::Afternoon]),
        },
        FixedAllocationRule::WeekdayFixed {
            employee: Employee::new("Bruno"),
            weekdays: set(&[0]),
            shifts: set(&[ShiftType::Morning]),
        },
    ];
    let slots = resolve_fixed(&day(10), &fixed, &employees);
    assert_eq!(slots.morning, Some(Employee::new("Bruno")));
    assert_eq!(slots.afternoon, Some(Employee::new("Ana")));

    let slots = resolve_fixed(&day(11), &fixed, &employees);
    assert_eq!(slots.morning, None);
    assert_eq!(slots.afternoon, None);
}

#[test]
fn first_declared_employee_wins_within_a_family() {
    let employees = vec![Employee::new("Ana"), Employee::new("Bruno")];
    let fixed = vec![
        FixedAllocationRule::WeekdayFixed {
            employee: Employee::new("Bruno"),
            weekdays: set(&[0, 1]),
            shifts: set(&[ShiftType::Morning]),
        },
        FixedAllocationRule::WeekdayFixed {
            employee: Employee::new("Ana"),
            weekdays: set(&[0]),
            shifts: set(&[ShiftType::Morning]),
        },
    ];
    assert_eq!(
        resolve_fixed(&day(10), &fixed, &employees).morning,
        Some(Employee::new("Ana"))
    );
    assert_eq!(
        resolve_fixed(&day(11), &fixed, &employees).morning,
        Some(Employee::new("Bruno"))
    );
}

#[test]
fn validation_rejects_malformed_rules() {
    let employees = vec![Employee::new("Ana")];
    let out_of_month = RuleSet {
        exceptions: vec![ExceptionRule::SpecificDay {
            employee: Employee::new("Ana"),
            day: 31,
        }],
        ..RuleSet::default()
    };
    assert!(matches!(
        out_of_month.validate(&employees, 30),
        Err(SchedError::MalformedRuleInput(_))
    ));

    let reversed = RuleSet {
        exceptions: vec![ExceptionRule::DateRange {
            employee: Employee::new("Ana"),
            start: 12,
            end: 4,
        }],
        ..RuleSet::default()
    };
    assert!(matches!(
        reversed.validate(&employees, 30),
        Err(SchedError::MalformedRuleInput(_))
    ));

    let stranger = RuleSet {
        restrictions: vec![ShiftRestriction {
            employee: Employee::new("Zoé"),
            shifts: set(&[ShiftType::Morning]),
        }],
        ..RuleSet::default()
    };
    assert_eq!(
        stranger.validate(&employees, 30),
        Err(SchedError::UnknownEmployee("Zoé".to_string()))
    );

    let no_shift = RuleSet {
        fixed: vec![FixedAllocationRule::DayFixed {
            employee: Employee::new("Ana"),
            days: set(&[3]),
            shifts: BTreeSet::new(),
        }],
        ..RuleSet::default()
    };
    assert!(no_shift.validate(&employees, 30).is_err());
}

#[test]
fn day_lists_are_parsed_strictly() {
    assert_eq!(parse_day_list(" 3, 10,,17 ").unwrap(), vec![3, 10, 17]);
    assert_eq!(parse_day_list("").unwrap(), Vec::<u32>::new());
    assert!(matches!(
        parse_day_list("3,dix"),
        Err(SchedError::MalformedRuleInput(_))
    ));
    assert_eq!(parse_weekday_list("0,4").unwrap(), vec![0, 4]);
    assert!(parse_weekday_list("7").is_err());
    assert_eq!(parse_day_range("5-9").unwrap(), (5, 9));
    assert!(parse_day_range("5").is_err());
}

#[test]
fn shift_type_parsing() {
    assert_eq!("Morning".parse::<ShiftType>().unwrap(), ShiftType::Morning);
    assert_eq!("pm".parse::<ShiftType>().unwrap(), ShiftType::Afternoon);
    assert!("evening".parse::<ShiftType>().is_err());
}
