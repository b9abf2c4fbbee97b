//! # App Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Batoi Books                            │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<T, AppError>                                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Storage Error? ──── DbError::QueryFailed("...") ──────┐                │
//! │         │                                              │                │
//! │         ▼                                              ▼                │
//! │  Remote Error? ───── ClientError::Status{..} ──────► AppError ────►     │
//! │         │                                              ▲                │
//! │         ▼                                              │                │
//! │  Form Error? ─────── FormErrors ───────────────────────┘                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Success ──────────────────────────────────────────────────────────►    │
//! │                                                                         │
//! │  The caller shows `message` as an error notification and may branch    │
//! │  on `code`.                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use batoi_api::ClientError;
use batoi_core::{CoreError, FormErrors};
use batoi_db::DbError;

/// Error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Book not found: 12"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Book, module or route not found
    NotFound,

    /// Form or argument validation failed
    ValidationError,

    /// Local storage failed
    StorageError,

    /// The books service could not be reached or rejected the request
    RemoteError,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Storage connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Local storage unavailable")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Storage migration failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Local storage migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Storage query failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
            DbError::CorruptValue { key, message } => {
                tracing::error!(key = %key, "Corrupt stored value: {}", message);
                AppError::new(
                    ErrorCode::StorageError,
                    format!("Stored data under '{}' is unreadable", key),
                )
            }
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::StorageError, "Local storage is busy")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal storage error: {}", e);
                AppError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
        }
    }
}

/// Converts core errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::BookNotFound(id) => AppError::not_found("Book", &id),
            CoreError::ModuleNotFound(code) => AppError::not_found("Module", &code),
            CoreError::UnknownRoute(path) => AppError::not_found("Page", &path),
            CoreError::InvalidPrice(_)
            | CoreError::SubCentPrice(_)
            | CoreError::Validation(_)
            | CoreError::InvalidForm(_) => {
                AppError::validation(err.to_string())
            }
        }
    }
}

impl From<FormErrors> for AppError {
    fn from(err: FormErrors) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts remote service errors. The message is kept as-is so the user
/// sees what the service said.
impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Status { status: 404, .. } => {
                AppError::new(ErrorCode::NotFound, err.to_string())
            }
            ClientError::InvalidUrl(_) => AppError::config(err.to_string()),
            other => AppError::new(ErrorCode::RemoteError, other.to_string()),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type alias for commands.
pub type AppResult<T> = Result<T, AppError>;
