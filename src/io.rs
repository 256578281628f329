use crate::model::{Employee, Schedule};
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Import de membres depuis CSV: header `name`
pub fn import_employees_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid employee row (empty)");
        }
        out.push(Employee::new(name));
    }
    Ok(out)
}

/// Import de membres depuis un fichier texte : un nom par ligne.
pub fn import_employees_text<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Employee>> {
    let path = path.as_ref();
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_employee_lines(&raw))
}

/// Un nom par ligne ; les lignes vides sont ignorées.
pub fn parse_employee_lines(raw: &str) -> Vec<Employee> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Employee::new)
        .collect()
}

/// Planning en CSV: header `date,weekday,morning,afternoon` (créneau vide si non pourvu)
pub fn write_schedule_csv<W: Write>(out: W, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(out);
    w.write_record(["date", "weekday", "morning", "afternoon"])?;
    for e in &schedule.entries {
        let date = e.date.format("%Y-%m-%d").to_string();
        w.write_record([
            date.as_str(),
            e.weekday.as_str(),
            e.morning.as_ref().map(Employee::as_str).unwrap_or(""),
            e.afternoon.as_ref().map(Employee::as_str).unwrap_or(""),
        ])?;
    }
    w.flush()?;
    Ok(())
}

/// Statistiques en CSV: header `employee,shifts`
pub fn write_statistics_csv<W: Write>(out: W, schedule: &Schedule) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_writer(out);
    w.write_record(["employee", "shifts"])?;
    let mut buf = itoa::Buffer::new();
    for row in &schedule.statistics {
        w.write_record([row.employee.as_str(), buf.format(row.shifts)])?;
    }
    w.flush()?;
    Ok(())
}

pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_schedule_csv(file, schedule)
}

pub fn export_statistics_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
) -> anyhow::Result<()> {
    let path = path.as_ref();
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_statistics_csv(file, schedule)
}

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s)?;
    Ok(())
}
