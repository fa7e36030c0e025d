use sqlx::FromRow;

/// Row of the `EMPLEADOS` table as read by the login lookup.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct EmployeeCredential {
    pub legajo: Option<String>,
    pub password: Option<String>,
}

impl EmployeeCredential {
    pub fn new(legajo: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            legajo: Some(legajo.into()),
            password: Some(password.into()),
        }
    }

    /// A row only identifies an employee when its legajo is present and non-empty.
    pub fn has_legajo(&self) -> bool {
        self.legajo.as_deref().is_some_and(|l| !l.is_empty())
    }
}
