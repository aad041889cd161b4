//! Error types for Courrier.

use thiserror::Error;

/// Common error type for Courrier.
#[derive(Error, Debug)]
pub enum CourrierError {
    /// Database error.
    ///
    /// Generic database error wrapping faults the storage engine reports.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error (engine unreachable, pool exhausted).
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials, bad/expired token).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Caller is not the owner of the resource.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input or a business-rule violation.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors.
//
// Constraint violations surface as validation errors (the API answers 400),
// connectivity faults as connection errors (the API answers 503).
impl From<sqlx::Error> for CourrierError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) => {
                let msg = db.message();
                if msg.contains("UNIQUE constraint failed") {
                    CourrierError::Validation("resource already exists".to_string())
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    CourrierError::Validation("invalid reference".to_string())
                } else {
                    CourrierError::Database(msg.to_string())
                }
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                CourrierError::DatabaseConnection(e.to_string())
            }
            _ => CourrierError::Database(e.to_string()),
        }
    }
}

/// Result type alias for Courrier operations.
pub type Result<T> = std::result::Result<T, CourrierError>;
