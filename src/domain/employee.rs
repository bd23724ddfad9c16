//! Employee entity, create payload and partial-update patch.

use std::fmt;

/// Database-assigned employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, sqlx::Type)]
#[sqlx(transparent)]
pub struct EmployeeId(pub i64);

impl EmployeeId {
    /// Create an EmployeeId from a raw row id.
    pub fn new(id: i64) -> Self {
        EmployeeId(id)
    }

    /// Get the underlying row id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A persisted employee row.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Employee {
    #[sqlx(rename = "emp_id")]
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub department: String,
    pub salary: f64,
}

/// Employee fields supplied on create, before the database assigns an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: Option<String>,
    pub department: String,
    pub salary: f64,
}

impl NewEmployee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: Option<String>,
        department: impl Into<String>,
        salary: f64,
    ) -> Self {
        NewEmployee {
            first_name: first_name.into(),
            last_name,
            department: department.into(),
            salary,
        }
    }

    /// Attach the id the database assigned to this record.
    pub fn with_id(self, id: EmployeeId) -> Employee {
        Employee {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            department: self.department,
            salary: self.salary,
        }
    }
}

/// Sparse update payload. `None` leaves the stored value untouched.
///
/// `last_name` is nullable in storage, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<Option<String>>,
    pub department: Option<String>,
    pub salary: Option<f64>,
}

impl EmployeePatch {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.department.is_none()
            && self.salary.is_none()
    }

    /// Set the salary using the old convention where zero meant "not supplied".
    ///
    /// Kept for callers that cannot express absence any other way. A zero
    /// salary cannot be written through this path; use the `salary` field
    /// directly for that.
    pub fn with_legacy_salary(mut self, salary: f64) -> Self {
        self.salary = if salary == 0.0 { None } else { Some(salary) };
        self
    }

    /// Resolve this patch against the currently stored row.
    pub fn merge(self, current: &Employee) -> Employee {
        Employee {
            id: current.id,
            first_name: self
                .first_name
                .unwrap_or_else(|| current.first_name.clone()),
            last_name: self
                .last_name
                .unwrap_or_else(|| current.last_name.clone()),
            department: self
                .department
                .unwrap_or_else(|| current.department.clone()),
            salary: self.salary.unwrap_or(current.salary),
        }
    }
}
