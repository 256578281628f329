#![forbid(unsafe_code)]
//! Roulement — répartition des créneaux matin / après-midi d'un mois ouvré.
//!
//! - Jours ouvrés uniquement (lundi..vendredi).
//! - Exceptions, affectations fixes, restrictions par type de créneau.
//! - Allocation gloutonne déterministe, équilibrage de charge optionnel.
//! - Plan et exports sur fichiers (JSON/CSV), sans base de données.

pub mod calendar;
pub mod io;
pub mod model;
pub mod rules;
pub mod scheduler;
pub mod storage;

pub use calendar::{business_days, last_day_of_month};
pub use model::{BusinessDay, Employee, Schedule, ScheduleEntry, ShiftType, StatisticsRow};
pub use rules::{
    is_eligible, resolve_fixed, ExceptionRule, FixedAllocationRule, FixedSlots, RuleSet,
    ShiftRestriction,
};
pub use scheduler::{
    generate_schedule, AssignOptions, Conflict, ConflictKind, Plan, SchedError, Scheduler,
};
pub use storage::{JsonStorage, Storage};
