//! Application error taxonomy and gRPC status mapping.
//!
//! The repository classifies every store failure into one of these variants.
//! Handlers currently collapse all of them into a single `Internal` status
//! carrying the error's display message; the variants stay structurally
//! distinct so finer-grained status codes can be mapped later without
//! touching the repository.

use thiserror::Error;
use tonic::Status;

/// Application error types.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Structured failure surfaced by the backing store, with the store's
    /// diagnostic fields preserved.
    #[error("SQL error: {message}, details: {detail}, where: {origin}")]
    Store {
        message: String,
        detail: String,
        origin: String,
    },

    /// No matching row for a keyed lookup.
    #[error("user not found")]
    NotFound,

    /// Reserved: no input validation exists beyond what the store enforces.
    #[error("validation error: {0}")]
    Validation(String),

    /// Any other failure from the store client.
    #[error("{0}")]
    Unknown(String),
}

impl AppError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    /// Create an unknown error
    pub fn unknown(msg: impl Into<String>) -> Self {
        AppError::Unknown(msg.into())
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

// =============================================================================
// gRPC Status (Tonic)
// =============================================================================

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        // Every repository failure surfaces as Internal; see the module doc.
        Status::internal(err.to_string())
    }
}

// =============================================================================
// Database error classification
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::DbErr;

        if matches!(err, DbErr::RecordNotFound(_)) {
            return AppError::NotFound;
        }

        // Which stage of the round-trip produced the failure.
        let origin = match &err {
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => "connect",
            DbErr::Exec(_) => "execute",
            DbErr::Query(_) => "query",
            _ => "client",
        };

        match err.sql_err() {
            Some(sql_err) => AppError::Store {
                message: sql_err.to_string(),
                detail: err.to_string(),
                origin: origin.to_string(),
            },
            None => AppError::Unknown(err.to_string()),
        }
    }
}
