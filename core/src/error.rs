use thiserror::Error;

#[derive(Error, Debug)]
pub enum GapError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    InputIncomplete(String),

    #[error("Required skills data not available for target role: {role}. Cannot perform analysis.")]
    RoleNotFound { role: String },

    #[error("Employee not found: {name}")]
    EmployeeNotFound { name: String },

    #[error("Malformed record at {location}: {reason}")]
    MalformedRecord { location: String, reason: String },

    #[error("Invalid numeric value for {field}: '{value}'")]
    InvalidNumericInput { field: &'static str, value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),
}

impl GapError {
    /// Errors caused by what the user entered or selected, as opposed to
    /// storage or configuration failures.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            GapError::InputIncomplete(_)
                | GapError::RoleNotFound { .. }
                | GapError::EmployeeNotFound { .. }
                | GapError::MalformedRecord { .. }
                | GapError::InvalidNumericInput { .. }
        )
    }

    /// Stable snake_case name, used by the IPC protocol.
    pub fn kind(&self) -> &'static str {
        match self {
            GapError::Database(_)               => "database",
            GapError::Serialization(_)          => "serialization",
            GapError::Io(_)                     => "io",
            GapError::InputIncomplete(_)        => "input_incomplete",
            GapError::RoleNotFound { .. }       => "role_not_found",
            GapError::EmployeeNotFound { .. }   => "employee_not_found",
            GapError::MalformedRecord { .. }    => "malformed_record",
            GapError::InvalidNumericInput { .. } => "invalid_numeric_input",
            GapError::Config(_)                 => "config",
        }
    }
}

pub type GapResult<T> = Result<T, GapError>;
