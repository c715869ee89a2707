//! Error types for finboard-core
//!
//! Every failure of a record request is a `CoreError`. Each variant carries
//! an error code, a severity and a client/server classification so the HTTP
//! layer can pick a status without inspecting messages.

use std::fmt;
use std::io;
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Identifier does not resolve to a record
    RecordNotFound,
    /// Unrecognized or missing write intent
    BadRequest,
    /// Malformed or missing update fields
    BadInput,
    /// Identifier path parameter absent
    MissingIdentifier,
    /// Persistence layer failure
    StorageError,
    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RecordNotFound => "RECORD_NOT_FOUND",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::BadInput => "BAD_INPUT",
            ErrorCode::MissingIdentifier => "MISSING_IDENTIFIER",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::IoError => "IO_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How loudly a failure is logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Expected outcome of user navigation
    Info,
    /// Client sent something unusable
    Warning,
    /// Request failed on our side
    Error,
    /// Routing or wiring is broken
    Critical,
}

impl ErrorSeverity {
    pub fn log_level(&self) -> log::Level {
        match self {
            ErrorSeverity::Info => log::Level::Info,
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error | ErrorSeverity::Critical => log::Level::Error,
        }
    }
}

/// Main error type for finboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: String, id: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("Bad input for '{field}': {reason}")]
    BadInput { field: String, reason: String },

    #[error("id route parameter is required")]
    MissingIdentifier,

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Shorthand for a missing record of the given kind
    pub fn not_found(kind: &str, id: &str) -> Self {
        CoreError::RecordNotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            CoreError::BadRequest { .. } => ErrorCode::BadRequest,
            CoreError::BadInput { .. } => ErrorCode::BadInput,
            CoreError::MissingIdentifier => ErrorCode::MissingIdentifier,
            CoreError::StorageError { .. } => ErrorCode::StorageError,
            CoreError::Io(_) => ErrorCode::IoError,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::RecordNotFound { .. } => ErrorSeverity::Info,
            CoreError::BadRequest { .. } | CoreError::BadInput { .. } => ErrorSeverity::Warning,
            CoreError::MissingIdentifier => ErrorSeverity::Critical,
            CoreError::StorageError { .. } | CoreError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// True when the request itself was at fault (4xx), false for 5xx
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::RecordNotFound { .. } | CoreError::BadRequest { .. } | CoreError::BadInput { .. }
        )
    }

    /// Operator hint appended to the log line, where one helps
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CoreError::BadRequest { .. } => Some("submit intent=update or intent=delete"),
            CoreError::BadInput { .. } => Some("submit title, description and a numeric amount"),
            CoreError::MissingIdentifier => Some("check that the route declares an :id segment"),
            _ => None,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(error: serde_json::Error) -> Self {
        CoreError::StorageError {
            message: error.to_string(),
        }
    }
}

/// What the endpoint was doing when it logged
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// `<record kind>.<operation>`, e.g. "expense.update"
    pub operation: String,
    pub id: Option<String>,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: Option<&str>) -> Self {
        self.id = id.map(str::to_string);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "{} id={}", self.operation, id),
            None => write!(f, "{} id=-", self.operation),
        }
    }
}

/// Sink for endpoint outcomes
pub trait ErrorLogger: Send + Sync {
    /// Log a failed request
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log a completed mutation
    fn log_success(&self, message: &str, context: &ErrorContext);
}

/// Logs through the `log` facade, level chosen by severity
#[derive(Debug, Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = error.severity().log_level();
        match error.hint() {
            Some(hint) => log::log!(
                target: "finboard::error",
                level,
                "[{}] {} ({}; hint: {})",
                error.code(),
                error,
                context,
                hint
            ),
            None => log::log!(target: "finboard::error", level, "[{}] {} ({})", error.code(), error, context),
        }
    }

    fn log_success(&self, message: &str, context: &ErrorContext) {
        log::info!(target: "finboard::records", "{} ({})", message, context);
    }
}

// ==================== Tests ====================
