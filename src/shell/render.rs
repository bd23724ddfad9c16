//! Console formatting for employee tables and store errors.

use crate::domain::Employee;
use crate::error::StoreError;

const RULE_WIDTH: usize = 66;

/// Render employees as a fixed-width table, header included.
pub fn render_table(employees: &[Employee]) -> String {
    let mut out = format!(
        "{:<10} {:<15} {:<15} {:<15} {:<10}\n",
        "emp_ID", "first_name", "last_name", "department", "salary"
    );
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for employee in employees {
        out.push_str(&format!(
            "{:<10} {:<15} {:<15} {:<15} {:<10.2}\n",
            employee.id.as_i64(),
            employee.first_name,
            employee.last_name.as_deref().unwrap_or(""),
            employee.department,
            employee.salary
        ));
    }
    out
}

/// User-facing line for a failed store operation.
pub fn render_error(err: &StoreError) -> String {
    match err {
        StoreError::NotFound(_) => err.to_string(),
        StoreError::Storage(msg) => format!("Error: {}", msg),
    }
}
