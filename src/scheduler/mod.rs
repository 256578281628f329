mod assignment;
mod conflicts;
mod statistics;
mod types;

pub use types::{AssignOptions, Conflict, ConflictKind, SchedError};

use crate::calendar;
use crate::model::{BusinessDay, Employee, Schedule};
use crate::rules::{ExceptionRule, FixedAllocationRule, RuleSet, ShiftRestriction};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration complète d'une génération : mois, équipe, règles, options.
///
/// Assemblée entièrement par l'appelant puis passée en lecture seule au
/// moteur ; chaque génération part d'un état de charge vierge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(flatten)]
    pub rules: RuleSet,
    #[serde(default)]
    pub options: AssignOptions,
}

impl Plan {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            employees: Vec::new(),
            rules: RuleSet::default(),
            options: AssignOptions::default(),
        }
    }

    pub fn with_employees<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.employees.extend(names.into_iter().map(Employee::new));
        self
    }

    /// Valide le plan et renvoie les jours ouvrés du mois.
    pub fn validate(&self) -> Result<Vec<BusinessDay>, SchedError> {
        let days = calendar::business_days(self.year, self.month)?;
        let last_day = calendar::last_day_of_month(self.year, self.month)?;

        if self.employees.is_empty() {
            return Err(SchedError::EmptyEmployeeSet);
        }
        let mut seen = HashSet::new();
        for employee in &self.employees {
            if employee.as_str().trim().is_empty() {
                return Err(SchedError::MalformedRuleInput(
                    "employee name cannot be blank".to_string(),
                ));
            }
            if !seen.insert(employee.as_str()) {
                return Err(SchedError::DuplicateEmployee(employee.as_str().to_string()));
            }
        }

        self.rules.validate(&self.employees, last_day)?;
        Ok(days)
    }
}

/// Génère le planning du mois : une ligne par jour ouvré + la charge de chacun.
pub fn generate_schedule(plan: &Plan) -> Result<Schedule, SchedError> {
    let days = plan.validate()?;
    Ok(assignment::allocate(plan, &days))
}

/// Scheduler : encapsule un Plan en cours de construction
#[derive(Debug, Clone)]
pub struct Scheduler {
    plan: Plan,
}

impl Scheduler {
    pub fn new(plan: Plan) -> Self {
        Self { plan }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }
    pub fn into_plan(self) -> Plan {
        self.plan
    }

    /// Ajoute des membres en ignorant ceux déjà déclarés (l'ordre est conservé).
    pub fn add_employees(&mut self, employees: Vec<Employee>) {
        for employee in employees {
            if !self.plan.employees.contains(&employee) {
                self.plan.employees.push(employee);
            }
        }
    }

    pub fn add_exception(&mut self, rule: ExceptionRule) {
        self.plan.rules.exceptions.push(rule);
    }

    pub fn add_fixed(&mut self, rule: FixedAllocationRule) {
        self.plan.rules.fixed.push(rule);
    }

    pub fn add_restriction(&mut self, restriction: ShiftRestriction) {
        self.plan.rules.restrictions.push(restriction);
    }

    pub fn set_options(&mut self, options: AssignOptions) {
        self.plan.options = options;
    }

    pub fn generate(&self) -> Result<Schedule, SchedError> {
        generate_schedule(&self.plan)
    }

    pub fn detect_conflicts(&self, schedule: &Schedule) -> Vec<Conflict> {
        conflicts::detect_conflicts(schedule)
    }
}
