use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for the sparrow-driver core
#[derive(Debug, Error)]
pub enum SparrowError {
    // Input errors
    #[error("Validation failed: {} errors", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    // Lookup errors
    #[error("Ride not found: {0}")]
    RideNotFound(String),
    #[error("Transaction not found: {0}")]
    TransactionNotFound(String),

    // Lifecycle errors
    #[error("Invalid transition for {id}: {from} -> {to}")]
    InvalidTransition { id: String, from: String, to: String },
    #[error("Driver is offline and cannot accept rides")]
    DriverOffline,

    // Seed and parsing errors
    #[error("JSON parsing error: {0}")]
    JsonParsing(String),
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
    #[error("I/O error: {0}")]
    Io(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Non-fatal notice shown by the app when an operation is rejected.
#[derive(Debug, Serialize)]
pub struct UserNotice {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// Convenience type alias for Results
pub type SparrowResult<T> = Result<T, SparrowError>;

impl From<serde_json::Error> for SparrowError {
    fn from(err: serde_json::Error) -> Self {
        SparrowError::JsonParsing(err.to_string())
    }
}

impl From<std::io::Error> for SparrowError {
    fn from(err: std::io::Error) -> Self {
        SparrowError::Io(err.to_string())
    }
}

impl From<chrono::ParseError> for SparrowError {
    fn from(err: chrono::ParseError) -> Self {
        SparrowError::InvalidFormat(format!("Invalid date/time format: {}", err))
    }
}

impl From<rust_decimal::Error> for SparrowError {
    fn from(err: rust_decimal::Error) -> Self {
        SparrowError::InvalidFormat(format!("Invalid decimal: {}", err))
    }
}

// Helper functions for creating common errors
impl SparrowError {
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        SparrowError::ValidationFailed(vec![ValidationError {
            field: field.into(),
            message: message.into(),
        }])
    }

    pub fn ride_not_found(ride_id: impl Into<String>) -> Self {
        SparrowError::RideNotFound(ride_id.into())
    }

    pub fn transaction_not_found(transaction_id: impl Into<String>) -> Self {
        SparrowError::TransactionNotFound(transaction_id.into())
    }

    pub fn invalid_transition(
        id: impl Into<String>,
        from: impl std::fmt::Display,
        to: impl std::fmt::Display,
    ) -> Self {
        SparrowError::InvalidTransition {
            id: id.into(),
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            SparrowError::RideNotFound(_) | SparrowError::TransactionNotFound(_)
        )
    }

    /// Maps the error onto the notice payload the screens render.
    pub fn to_notice(&self) -> UserNotice {
        let (error_type, details) = match self {
            SparrowError::ValidationFailed(errors) => {
                ("validation_failed", serde_json::to_value(errors).ok())
            }
            SparrowError::RideNotFound(_) => ("ride_not_found", None),
            SparrowError::TransactionNotFound(_) => ("transaction_not_found", None),
            SparrowError::InvalidTransition { .. } => ("invalid_transition", None),
            SparrowError::DriverOffline => ("driver_offline", None),
            // Everything else is an internal problem, not a user mistake
            _ => ("internal_error", None),
        };

        let message = match self {
            SparrowError::ValidationFailed(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; "),
            SparrowError::DriverOffline => "Go online to accept new rides".to_string(),
            other => other.to_string(),
        };

        UserNotice {
            error: error_type.to_string(),
            message,
            details,
        }
    }
}
