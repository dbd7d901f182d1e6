//! Error types for msorm

use std::fmt;
use thiserror::Error;

/// Result type alias for msorm operations
pub type OrmResult<T> = Result<T, OrmError>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error reported by the connection layer.
///
/// The driver's message text is kept verbatim: constraint classification
/// works by matching its prefix.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DriverError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl DriverError {
    /// Create a driver error from its message text.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Create a driver error wrapping the driver's own error value.
    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The raw message reported by the driver.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Category of a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    Check,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::Unique => f.write_str("unique"),
            ConstraintKind::ForeignKey => f.write_str("foreign key"),
            ConstraintKind::Check => f.write_str("check"),
        }
    }
}

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum OrmError {
    /// Statement execution error
    #[error("Query error: {0}")]
    Driver(#[from] DriverError),

    /// Unique constraint violation
    #[error("Unique constraint violation: {key}")]
    UniqueViolation {
        key: String,
        #[source]
        source: Option<DriverError>,
    },

    /// Foreign key constraint violation
    #[error("Foreign key violation: {key}")]
    ForeignKeyViolation {
        key: String,
        #[source]
        source: Option<DriverError>,
    },

    /// Check constraint violation
    #[error("Check constraint violation: {key}")]
    CheckViolation {
        key: String,
        #[source]
        source: Option<DriverError>,
    },

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Row decode error
    #[error("Decode error on column {index}: {message}")]
    Decode { index: usize, message: String },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation the SQL Server writers cannot render
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

/// Driver message prefixes, the constraint category they signal, and the
/// delimiters around the constraint name inside the message.
const CONSTRAINT_MESSAGES: &[(&str, ConstraintKind, &str, &str)] = &[
    (
        "mssql: Violation of PRIMARY KEY",
        ConstraintKind::Unique,
        "constraint '",
        "'",
    ),
    (
        "mssql: Violation of UNIQUE KEY",
        ConstraintKind::Unique,
        "constraint '",
        "'",
    ),
    (
        "mssql: The UPDATE statement conflicted with the FOREIGN KEY",
        ConstraintKind::ForeignKey,
        "FOREIGN KEY constraint \"",
        "\"",
    ),
    (
        "mssql: The INSERT statement conflicted with the FOREIGN KEY",
        ConstraintKind::ForeignKey,
        "FOREIGN KEY constraint \"",
        "\"",
    ),
    (
        "mssql: The DELETE statement conflicted with the REFERENCE",
        ConstraintKind::ForeignKey,
        "REFERENCE constraint \"",
        "\"",
    ),
    (
        "mssql: The UPDATE statement conflicted with the CHECK",
        ConstraintKind::Check,
        "CHECK constraint \"",
        "\"",
    ),
    (
        "mssql: The INSERT statement conflicted with the CHECK",
        ConstraintKind::Check,
        "CHECK constraint \"",
        "\"",
    ),
];

/// Return the text between `start` and the next `end` in `message`, or an
/// empty string when either delimiter is missing.
fn extract_between(message: &str, start: &str, end: &str) -> String {
    let Some(from) = message.find(start).map(|i| i + start.len()) else {
        return String::new();
    };
    match message[from..].find(end) {
        Some(len) => message[from..from + len].to_string(),
        None => String::new(),
    }
}

/// Classify a driver message into a constraint category and constraint name.
///
/// Matching is by message prefix, so it only recognizes the exact wording
/// the SQL Server driver produces.
pub fn classify_constraint(message: &str) -> Option<(ConstraintKind, String)> {
    CONSTRAINT_MESSAGES
        .iter()
        .find(|(prefix, ..)| message.starts_with(prefix))
        .map(|(_, kind, start, end)| (*kind, extract_between(message, start, end)))
}

impl OrmError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an unsupported operation error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(index: usize, message: impl Into<String>) -> Self {
        Self::Decode {
            index,
            message: message.into(),
        }
    }

    /// Build a constraint violation of the given kind.
    pub fn constraint(kind: ConstraintKind, key: impl Into<String>, source: Option<DriverError>) -> Self {
        let key = key.into();
        match kind {
            ConstraintKind::Unique => Self::UniqueViolation { key, source },
            ConstraintKind::ForeignKey => Self::ForeignKeyViolation { key, source },
            ConstraintKind::Check => Self::CheckViolation { key, source },
        }
    }

    /// The constraint category, if this is a constraint violation.
    pub fn constraint_kind(&self) -> Option<ConstraintKind> {
        match self {
            Self::UniqueViolation { .. } => Some(ConstraintKind::Unique),
            Self::ForeignKeyViolation { .. } => Some(ConstraintKind::ForeignKey),
            Self::CheckViolation { .. } => Some(ConstraintKind::Check),
            _ => None,
        }
    }

    /// Check if this is a unique violation error
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, Self::UniqueViolation { .. })
    }

    /// Check if this is a foreign key violation error
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, Self::ForeignKeyViolation { .. })
    }

    /// Check if this is a check constraint violation error
    pub fn is_check_violation(&self) -> bool {
        matches!(self, Self::CheckViolation { .. })
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Parse a driver error into a more specific OrmError
    pub fn from_driver_error(err: DriverError) -> Self {
        match classify_constraint(err.message()) {
            Some((kind, key)) => Self::constraint(kind, key, Some(err)),
            None => Self::Driver(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn classifies_primary_key_violation() {
        let err = OrmError::from_driver_error(DriverError::new(
            "mssql: Violation of PRIMARY KEY constraint 'PK_users'. Cannot insert duplicate key in object 'dbo.users'.",
        ));
        match err {
            OrmError::UniqueViolation { key, source } => {
                assert_eq!(key, "PK_users");
                assert!(source.is_some());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn classifies_unique_key_violation() {
        let err = OrmError::from_driver_error(DriverError::new(
            "mssql: Violation of UNIQUE KEY constraint 'UQ_users_email'. Cannot insert duplicate key.",
        ));
        assert!(err.is_unique_violation());
        assert_eq!(err.to_string(), "Unique constraint violation: UQ_users_email");
    }

    #[test]
    fn classifies_foreign_key_conflict() {
        let err = OrmError::from_driver_error(DriverError::new(
            "mssql: The UPDATE statement conflicted with the FOREIGN KEY constraint \"FK_orders_user\". The conflict occurred in database \"rel\".",
        ));
        assert!(err.is_foreign_key_violation());
        match err {
            OrmError::ForeignKeyViolation { key, .. } => assert_eq!(key, "FK_orders_user"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn classifies_check_conflict() {
        let err = OrmError::from_driver_error(DriverError::new(
            "mssql: The UPDATE statement conflicted with the CHECK constraint \"CK_price\".",
        ));
        assert_eq!(err.constraint_kind(), Some(ConstraintKind::Check));
        match err {
            OrmError::CheckViolation { key, .. } => assert_eq!(key, "CK_price"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn keeps_unknown_errors_as_driver_errors() {
        let err = OrmError::from_driver_error(DriverError::new("mssql: Invalid object name 'nope'."));
        assert!(matches!(err, OrmError::Driver(_)));
        assert_eq!(err.constraint_kind(), None);
    }

    #[test]
    fn constraint_keeps_driver_error_as_source() {
        let err = OrmError::from_driver_error(DriverError::new(
            "mssql: Violation of UNIQUE KEY constraint 'UQ_x'.",
        ));
        let source = err.source().expect("source");
        assert!(source.to_string().starts_with("mssql: Violation of UNIQUE KEY"));
    }

    #[test]
    fn missing_constraint_name_is_empty() {
        assert_eq!(
            classify_constraint("mssql: Violation of PRIMARY KEY"),
            Some((ConstraintKind::Unique, String::new()))
        );
    }
}
