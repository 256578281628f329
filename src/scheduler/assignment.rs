use super::{statistics, Plan};
use crate::model::{BusinessDay, Employee, Schedule, ScheduleEntry, ShiftType};
use crate::rules::{self, RuleSet};

/// État propre à une génération : compteurs de charge et lignes produites.
struct Allocation<'a> {
    employees: &'a [Employee],
    /// Indexé par position de déclaration du membre.
    workload: Vec<u32>,
    entries: Vec<ScheduleEntry>,
}

pub(super) fn allocate(plan: &Plan, days: &[BusinessDay]) -> Schedule {
    #[cfg(feature = "logging")]
    tracing::debug!(
        year = plan.year,
        month = plan.month,
        employees = plan.employees.len(),
        business_days = days.len(),
        balance = plan.options.balance_workload,
        "generating schedule"
    );

    let mut run = Allocation::new(&plan.employees);
    for day in days {
        run.allocate_day(day, &plan.rules, plan.options.balance_workload);
    }
    run.into_schedule()
}

impl<'a> Allocation<'a> {
    fn new(employees: &'a [Employee]) -> Self {
        Self {
            employees,
            workload: vec![0; employees.len()],
            entries: Vec::new(),
        }
    }

    fn position(&self, employee: &Employee) -> Option<usize> {
        self.employees.iter().position(|e| e == employee)
    }

    /// Membres éligibles, dans l'ordre de déclaration.
    fn candidates(&self, day: &BusinessDay, shift: ShiftType, rule_set: &RuleSet) -> Vec<usize> {
        self.employees
            .iter()
            .enumerate()
            .filter(|(_, e)| {
                rules::is_eligible(e, day, shift, &rule_set.exceptions, &rule_set.restrictions)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    fn allocate_day(&mut self, day: &BusinessDay, rule_set: &RuleSet, balance: bool) {
        let fixed = rules::resolve_fixed(day, &rule_set.fixed, self.employees);
        let mut morning = fixed.morning.as_ref().and_then(|e| self.position(e));
        let mut afternoon = fixed.afternoon.as_ref().and_then(|e| self.position(e));
        let (fixed_morning, fixed_afternoon) = (morning, afternoon);
        for idx in morning.iter().chain(afternoon.iter()) {
            self.workload[*idx] += 1;
        }

        // un membre déjà imposé sur un créneau n'est pas candidat à l'autre
        let mut morning_candidates = match morning {
            Some(_) => Vec::new(),
            None => self.candidates(day, ShiftType::Morning, rule_set),
        };
        morning_candidates.retain(|idx| Some(*idx) != fixed_afternoon);
        let mut afternoon_candidates = match afternoon {
            Some(_) => Vec::new(),
            None => self.candidates(day, ShiftType::Afternoon, rule_set),
        };
        afternoon_candidates.retain(|idx| Some(*idx) != fixed_morning);

        if balance {
            // tri stable : à charge égale, l'ordre de déclaration départage
            let workload = &self.workload;
            morning_candidates.sort_by_key(|idx| workload[*idx]);
            afternoon_candidates.sort_by_key(|idx| workload[*idx]);
        }

        if morning.is_none() {
            if let Some(&chosen) = morning_candidates.first() {
                morning = Some(chosen);
                self.workload[chosen] += 1;
                // un candidat unique reste retenu, quitte à tenir les deux créneaux
                if fixed_afternoon.is_none() && afternoon_candidates.len() > 1 {
                    afternoon_candidates.retain(|idx| *idx != chosen);
                }
            }
        }

        if afternoon.is_none() {
            if let Some(&chosen) = afternoon_candidates.first() {
                afternoon = Some(chosen);
                self.workload[chosen] += 1;
            }
        }

        #[cfg(feature = "logging")]
        for (shift, slot) in [(ShiftType::Morning, morning), (ShiftType::Afternoon, afternoon)] {
            match slot {
                Some(idx) => tracing::debug!(
                    date = %day.date,
                    %shift,
                    employee = %self.employees[idx],
                    "slot assigned"
                ),
                None => tracing::warn!(date = %day.date, %shift, "no eligible employee, slot left unfilled"),
            }
        }

        self.entries.push(ScheduleEntry {
            date: day.date,
            weekday: day.weekday_name(),
            morning: morning.map(|idx| self.employees[idx].clone()),
            afternoon: afternoon.map(|idx| self.employees[idx].clone()),
        });
    }

    fn into_schedule(self) -> Schedule {
        Schedule {
            statistics: statistics::aggregate(self.employees, &self.workload),
            entries: self.entries,
        }
    }
}
