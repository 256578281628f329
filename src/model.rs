use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifiant d'un membre de l'équipe (son nom, unique dans un plan).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Employee(String);

impl Employee {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().trim().to_owned())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Employee {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Les deux créneaux d'une journée ouvrée.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ShiftType {
    Morning,
    Afternoon,
}

impl ShiftType {
    pub const ALL: [ShiftType; 2] = [ShiftType::Morning, ShiftType::Afternoon];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Morning => "morning",
            ShiftType::Afternoon => "afternoon",
        }
    }
}

impl fmt::Display for ShiftType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" | "am" | "matin" => Ok(ShiftType::Morning),
            "afternoon" | "pm" | "apres-midi" => Ok(ShiftType::Afternoon),
            other => Err(format!("unknown shift type: {other}")),
        }
    }
}

/// Jour ouvré (lundi..vendredi) du mois ciblé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BusinessDay {
    pub date: NaiveDate,
}

impl BusinessDay {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Jour du mois (1..=31).
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// 0 = lundi … 4 = vendredi.
    pub fn weekday_index(&self) -> u8 {
        self.date.weekday().num_days_from_monday() as u8
    }

    pub fn weekday_name(&self) -> String {
        self.date.format("%A").to_string()
    }
}

/// Ligne du planning : une par jour ouvré, dans l'ordre chronologique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub date: NaiveDate,
    pub weekday: String,
    pub morning: Option<Employee>,
    pub afternoon: Option<Employee>,
}

impl ScheduleEntry {
    pub fn assignee(&self, shift: ShiftType) -> Option<&Employee> {
        match shift {
            ShiftType::Morning => self.morning.as_ref(),
            ShiftType::Afternoon => self.afternoon.as_ref(),
        }
    }

    /// Nombre de créneaux tenus par `employee` ce jour-là (0, 1 ou 2).
    pub fn slots_held_by(&self, employee: &Employee) -> u32 {
        ShiftType::ALL
            .iter()
            .filter(|shift| self.assignee(**shift) == Some(employee))
            .count() as u32
    }
}

/// Charge finale d'un membre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub employee: Employee,
    pub shifts: u32,
}

/// Résultat d'une génération : planning + statistiques.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Schedule {
    pub entries: Vec<ScheduleEntry>,
    pub statistics: Vec<StatisticsRow>,
}

impl Schedule {
    pub fn find_entry(&self, date: NaiveDate) -> Option<&ScheduleEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn shifts_of(&self, employee: &Employee) -> Option<u32> {
        self.statistics
            .iter()
            .find(|row| &row.employee == employee)
            .map(|row| row.shifts)
    }
}
