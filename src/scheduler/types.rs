use crate::model::{Employee, ShiftType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options d'assignation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignOptions {
    /// Trie les candidats par charge croissante avant de choisir.
    pub balance_workload: bool,
}

impl Default for AssignOptions {
    fn default() -> Self {
        Self {
            balance_workload: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    Unfilled(ShiftType),
    DoubleBooking,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictKind::Unfilled(ShiftType::Morning) => "unfilled-morning",
            ConflictKind::Unfilled(ShiftType::Afternoon) => "unfilled-afternoon",
            ConflictKind::DoubleBooking => "double",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub date: NaiveDate,
    pub employee: Option<Employee>,
    pub kind: ConflictKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedError {
    #[error("invalid calendar input: {year}-{month}")]
    InvalidCalendarInput { year: i32, month: u32 },
    #[error("employee set is empty")]
    EmptyEmployeeSet,
    #[error("duplicate employee: {0}")]
    DuplicateEmployee(String),
    #[error("unknown employee: {0}")]
    UnknownEmployee(String),
    #[error("malformed rule input: {0}")]
    MalformedRuleInput(String),
}
