//! Règles de disponibilité : exceptions, affectations fixes et restrictions.
//!
//! L'ordre des règles est significatif pour les affectations fixes
//! (premier trouvé, dans l'ordre de déclaration des membres), jamais pour
//! l'éligibilité qui est une simple conjonction.

use crate::model::{BusinessDay, Employee, ShiftType};
use crate::scheduler::SchedError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Indisponibilité d'un membre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExceptionRule {
    /// Absent toute la journée.
    SpecificDay { employee: Employee, day: u32 },
    /// Absent du `start` au `end` inclus.
    DateRange {
        employee: Employee,
        start: u32,
        end: u32,
    },
    /// Absent chaque semaine ce jour-là (0 = lundi).
    Weekday { employee: Employee, weekday: u8 },
    /// Absent sur un seul créneau.
    ShiftSpecific {
        day: u32,
        shift: ShiftType,
        employee: Employee,
    },
}

impl ExceptionRule {
    pub fn employee(&self) -> &Employee {
        match self {
            ExceptionRule::SpecificDay { employee, .. }
            | ExceptionRule::DateRange { employee, .. }
            | ExceptionRule::Weekday { employee, .. }
            | ExceptionRule::ShiftSpecific { employee, .. } => employee,
        }
    }

    fn blocks(&self, employee: &Employee, day: &BusinessDay, shift: ShiftType) -> bool {
        if self.employee() != employee {
            return false;
        }
        match self {
            ExceptionRule::SpecificDay { day: d, .. } => *d == day.day(),
            ExceptionRule::DateRange { start, end, .. } => (*start..=*end).contains(&day.day()),
            ExceptionRule::Weekday { weekday, .. } => *weekday == day.weekday_index(),
            ExceptionRule::ShiftSpecific { day: d, shift: s, .. } => {
                *d == day.day() && *s == shift
            }
        }
    }
}

/// Affectation imposée, qui court-circuite les contrôles de disponibilité.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixedAllocationRule {
    WeekdayFixed {
        employee: Employee,
        weekdays: BTreeSet<u8>,
        shifts: BTreeSet<ShiftType>,
    },
    DayFixed {
        employee: Employee,
        days: BTreeSet<u32>,
        shifts: BTreeSet<ShiftType>,
    },
}

impl FixedAllocationRule {
    pub fn employee(&self) -> &Employee {
        match self {
            FixedAllocationRule::WeekdayFixed { employee, .. }
            | FixedAllocationRule::DayFixed { employee, .. } => employee,
        }
    }

    pub fn shifts(&self) -> &BTreeSet<ShiftType> {
        match self {
            FixedAllocationRule::WeekdayFixed { shifts, .. }
            | FixedAllocationRule::DayFixed { shifts, .. } => shifts,
        }
    }

    fn matches_day(&self, day: &BusinessDay) -> bool {
        match self {
            FixedAllocationRule::WeekdayFixed { weekdays, .. } => {
                weekdays.contains(&day.weekday_index())
            }
            FixedAllocationRule::DayFixed { days, .. } => days.contains(&day.day()),
        }
    }
}

/// Interdiction globale d'un type de créneau pour un membre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRestriction {
    pub employee: Employee,
    pub shifts: BTreeSet<ShiftType>,
}

/// Ensemble des règles d'un plan, dans leur ordre de déclaration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exceptions: Vec<ExceptionRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed: Vec<FixedAllocationRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restrictions: Vec<ShiftRestriction>,
}

impl RuleSet {
    /// Vérifie que chaque règle vise un membre déclaré et un jour du mois.
    pub fn validate(&self, employees: &[Employee], last_day: u32) -> Result<(), SchedError> {
        let known = |e: &Employee| -> Result<(), SchedError> {
            if employees.contains(e) {
                Ok(())
            } else {
                Err(SchedError::UnknownEmployee(e.as_str().to_string()))
            }
        };
        let day_in_month = |d: u32| -> Result<(), SchedError> {
            if (1..=last_day).contains(&d) {
                Ok(())
            } else {
                Err(SchedError::MalformedRuleInput(format!(
                    "day {d} outside 1..={last_day}"
                )))
            }
        };
        let weekday_ok = |w: u8| -> Result<(), SchedError> {
            if w <= 6 {
                Ok(())
            } else {
                Err(SchedError::MalformedRuleInput(format!(
                    "weekday index {w} outside 0..=6"
                )))
            }
        };

        for rule in &self.exceptions {
            known(rule.employee())?;
            match rule {
                ExceptionRule::SpecificDay { day, .. } | ExceptionRule::ShiftSpecific { day, .. } => {
                    day_in_month(*day)?
                }
                ExceptionRule::DateRange { start, end, .. } => {
                    day_in_month(*start)?;
                    day_in_month(*end)?;
                    if start > end {
                        return Err(SchedError::MalformedRuleInput(format!(
                            "date range {start}-{end} is reversed"
                        )));
                    }
                }
                ExceptionRule::Weekday { weekday, .. } => weekday_ok(*weekday)?,
            }
        }

        for rule in &self.fixed {
            known(rule.employee())?;
            if rule.shifts().is_empty() {
                return Err(SchedError::MalformedRuleInput(format!(
                    "fixed allocation for {} names no shift",
                    rule.employee()
                )));
            }
            match rule {
                FixedAllocationRule::WeekdayFixed { weekdays, .. } => {
                    if weekdays.is_empty() {
                        return Err(SchedError::MalformedRuleInput(format!(
                            "fixed allocation for {} names no weekday",
                            rule.employee()
                        )));
                    }
                    weekdays.iter().try_for_each(|w| weekday_ok(*w))?;
                }
                FixedAllocationRule::DayFixed { days, .. } => {
                    if days.is_empty() {
                        return Err(SchedError::MalformedRuleInput(format!(
                            "fixed allocation for {} names no day",
                            rule.employee()
                        )));
                    }
                    days.iter().try_for_each(|d| day_in_month(*d))?;
                }
            }
        }

        for restriction in &self.restrictions {
            known(&restriction.employee)?;
            if restriction.shifts.is_empty() {
                return Err(SchedError::MalformedRuleInput(format!(
                    "restriction for {} names no shift",
                    restriction.employee
                )));
            }
        }

        Ok(())
    }
}

/// Vrai si aucune exception ni restriction n'exclut `employee` du créneau.
pub fn is_eligible(
    employee: &Employee,
    day: &BusinessDay,
    shift: ShiftType,
    exceptions: &[ExceptionRule],
    restrictions: &[ShiftRestriction],
) -> bool {
    let excepted = exceptions.iter().any(|r| r.blocks(employee, day, shift));
    let restricted = restrictions
        .iter()
        .any(|r| &r.employee == employee && r.shifts.contains(&shift));
    !excepted && !restricted
}

/// Créneaux pré-remplis par les affectations fixes pour un jour donné.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedSlots {
    pub morning: Option<Employee>,
    pub afternoon: Option<Employee>,
}

impl FixedSlots {
    pub fn get(&self, shift: ShiftType) -> Option<&Employee> {
        match shift {
            ShiftType::Morning => self.morning.as_ref(),
            ShiftType::Afternoon => self.afternoon.as_ref(),
        }
    }

    fn slot_mut(&mut self, shift: ShiftType) -> &mut Option<Employee> {
        match shift {
            ShiftType::Morning => &mut self.morning,
            ShiftType::Afternoon => &mut self.afternoon,
        }
    }
}

/// Résout les affectations fixes d'un jour.
///
/// Les règles par jour de semaine passent avant les règles par date ; dans
/// chaque famille, les membres sont parcourus dans leur ordre de déclaration
/// et le premier qui correspond occupe le créneau.
pub fn resolve_fixed(
    day: &BusinessDay,
    fixed: &[FixedAllocationRule],
    employees: &[Employee],
) -> FixedSlots {
    let mut slots = FixedSlots::default();
    let weekday_rules = fixed
        .iter()
        .filter(|r| matches!(r, FixedAllocationRule::WeekdayFixed { .. }));
    let day_rules = fixed
        .iter()
        .filter(|r| matches!(r, FixedAllocationRule::DayFixed { .. }));

    for family in [
        weekday_rules.collect::<Vec<_>>(),
        day_rules.collect::<Vec<_>>(),
    ] {
        for employee in employees {
            for rule in family.iter().filter(|r| r.employee() == employee) {
                if !rule.matches_day(day) {
                    continue;
                }
                for shift in rule.shifts() {
                    let slot = slots.slot_mut(*shift);
                    if slot.is_none() {
                        *slot = Some(employee.clone());
                    }
                }
            }
        }
    }

    slots
}

/// Lit une liste de jours du mois séparés par des virgules (`"3, 10,17"`).
pub fn parse_day_list(raw: &str) -> Result<Vec<u32>, SchedError> {
    raw.split(',')
        .map(str::trim)
        .filter(|tok| !tok.is_empty())
        .map(|tok| {
            tok.parse::<u32>()
                .map_err(|_| SchedError::MalformedRuleInput(format!("not a day number: {tok}")))
        })
        .collect()
}

/// Lit une liste d'indices de jour de semaine (`"0,4"`, 0 = lundi).
pub fn parse_weekday_list(raw: &str) -> Result<Vec<u8>, SchedError> {
    parse_day_list(raw)?
        .into_iter()
        .map(|d| {
            u8::try_from(d)
                .ok()
                .filter(|w| *w <= 6)
                .ok_or_else(|| SchedError::MalformedRuleInput(format!("not a weekday index: {d}")))
        })
        .collect()
}

/// Lit un intervalle `start-end` (bornes incluses).
pub fn parse_day_range(raw: &str) -> Result<(u32, u32), SchedError> {
    let (start, end) = raw
        .split_once('-')
        .ok_or_else(|| SchedError::MalformedRuleInput(format!("expected start-end: {raw}")))?;
    let parse = |tok: &str| {
        tok.trim()
            .parse::<u32>()
            .map_err(|_| SchedError::MalformedRuleInput(format!("not a day number: {tok}")))
    };
    Ok((parse(start)?, parse(end)?))
}
