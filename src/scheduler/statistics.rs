use crate::model::{Employee, StatisticsRow};

/// Une ligne par membre, dans l'ordre de déclaration.
pub(super) fn aggregate(employees: &[Employee], workload: &[u32]) -> Vec<StatisticsRow> {
    employees
        .iter()
        .zip(workload.iter())
        .map(|(employee, shifts)| StatisticsRow {
            employee: employee.clone(),
            shifts: *shifts,
        })
        .collect()
}
