use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::{DatabaseErrorConverter, messages};

/// Application-wide error type covering validation failures, the typed
/// outcomes of store/registry/cluster calls, and everything else.
///
/// Classification happens at the boundary of each external call: the
/// registries report absence as `Ok(None)` (mapped to [`AppError::NonExistentProc`]
/// by the services), the store reports constraint violations as typed diesel
/// errors (converted by [`DatabaseErrorConverter`]), and the cluster client
/// returns typed errors of its own. Nothing inspects error message text.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request body could not be decoded as the expected shape.
    #[error("malformed request body")]
    MalformedRequest,

    /// Cron expression failed the 5-field grammar check.
    #[error("invalid cron expression: {expression}")]
    InvalidCronExpression { expression: String },

    /// A notification email address failed the syntax check.
    #[error("invalid notification email: {address}")]
    InvalidEmail { address: String },

    /// Tag list was empty or blank.
    #[error("tag list is empty")]
    InvalidTag,

    /// Job name is absent from the metadata registry.
    #[error("job has no metadata entry: {name}")]
    NonExistentProc { name: String },

    /// An enabled schedule with the same (name, args) pair already exists.
    #[error("duplicate (job name, args) combination")]
    DuplicateJobNameArgs,

    /// No schedule with the given ID.
    #[error("scheduled job not found: {id}")]
    ScheduleNotFound { id: String },

    /// Execution is unknown to the cluster, or has no log source.
    #[error("execution not found on the cluster: {name}")]
    ExecutionNotFound { name: String },

    /// Schedule/audit store operation failed.
    #[error("database operation failed: {operation}")]
    Database {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Metadata/secrets registry operation failed (other than absence).
    #[error("registry operation failed: {operation}")]
    Registry {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Cluster submission or query failed in transport.
    #[error("cluster request failed: {operation}")]
    Cluster {
        operation: String,
        #[source]
        source: anyhow::Error,
    },

    /// Database connection pool error.
    #[error("connection pool error")]
    ConnectionPool {
        #[source]
        source: anyhow::Error,
    },

    /// Configuration error with key information.
    #[error("configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal error for unexpected failures.
    #[error("internal error")]
    Internal {
        #[source]
        source: anyhow::Error,
    },
}

impl AppError {
    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MalformedRequest
            | AppError::InvalidCronExpression { .. }
            | AppError::InvalidEmail { .. }
            | AppError::InvalidTag => StatusCode::BAD_REQUEST,
            AppError::NonExistentProc { .. }
            | AppError::ScheduleNotFound { .. }
            | AppError::ExecutionNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::DuplicateJobNameArgs => StatusCode::CONFLICT,
            AppError::Database { .. }
            | AppError::Registry { .. }
            | AppError::Cluster { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The plain-text body served to the client.
    ///
    /// Anything that maps to 500 collapses to the generic message; internal
    /// details stay in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            AppError::MalformedRequest => messages::MALFORMED_REQUEST,
            AppError::InvalidCronExpression { .. } => messages::INVALID_CRON_EXPRESSION,
            AppError::InvalidEmail { .. } => messages::INVALID_EMAIL_ID,
            AppError::InvalidTag => messages::INVALID_TAG,
            AppError::NonExistentProc { .. } => messages::NON_EXISTENT_PROC,
            AppError::ScheduleNotFound { .. } => messages::SCHEDULE_NOT_FOUND,
            AppError::ExecutionNotFound { .. } => messages::JOB_NOT_FOUND,
            AppError::DuplicateJobNameArgs => messages::DUPLICATE_JOB_NAME_ARGS,
            AppError::Database { .. }
            | AppError::Registry { .. }
            | AppError::Cluster { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => messages::SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// Error responses are plain text, not JSON. Success responses on the
    /// same endpoints are JSON; existing clients depend on the asymmetry.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::debug!(error = ?self, "request rejected");
        }
        (status, self.client_message()).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::Internal { source: error }
    }
}

impl From<diesel::result::Error> for AppError {
    fn from(error: diesel::result::Error) -> Self {
        DatabaseErrorConverter::convert_diesel_error(error, "database operation")
    }
}

/// Type alias for Result with AppError to simplify function signatures
pub type AppResult<T> = Result<T, AppError>;
