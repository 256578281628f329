use crate::model::BusinessDay;
use crate::scheduler::SchedError;
use chrono::{Datelike, NaiveDate};

/// Dernier jour du mois (28..=31).
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32, SchedError> {
    let invalid = || SchedError::InvalidCalendarInput { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(invalid)?;
    Ok(next.signed_duration_since(first).num_days() as u32)
}

/// Jours ouvrés (lundi..vendredi) du mois, dans l'ordre chronologique.
pub fn business_days(year: i32, month: u32) -> Result<Vec<BusinessDay>, SchedError> {
    let last = last_day_of_month(year, month)?;
    let days = (1..=last)
        .filter_map(|d| NaiveDate::from_ymd_opt(year, month, d))
        .filter(|date| date.weekday().num_days_from_monday() < 5)
        .map(BusinessDay::new)
        .collect();
    Ok(days)
}
