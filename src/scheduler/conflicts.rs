use super::{Conflict, ConflictKind};
use crate::model::{Schedule, ShiftType};

pub(super) fn detect_conflicts(schedule: &Schedule) -> Vec<Conflict> {
    let mut out = Vec::new();

    for entry in &schedule.entries {
        for shift in ShiftType::ALL {
            if entry.assignee(shift).is_none() {
                out.push(Conflict {
                    date: entry.date,
                    employee: None,
                    kind: ConflictKind::Unfilled(shift),
                });
            }
        }

        if let (Some(m), Some(a)) = (&entry.morning, &entry.afternoon) {
            if m == a {
                out.push(Conflict {
                    date: entry.date,
                    employee: Some(m.clone()),
                    kind: ConflictKind::DoubleBooking,
                });
            }
        }
    }

    out
}
