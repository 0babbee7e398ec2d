use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppResult;
use crate::models::SubmissionStatus;

/// One execution lifecycle event, published after the submission outcome is
/// known. Carries no secrets and no argument values.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionEvent {
    pub job_name: String,
    pub execution_name: Option<String>,
    pub submitted_by: String,
    pub submission_status: String,
}

impl ExecutionEvent {
    pub fn new(
        job_name: &str,
        execution_name: Option<&str>,
        submitted_by: &str,
        status: SubmissionStatus,
    ) -> Self {
        Self {
            job_name: job_name.to_string(),
            execution_name: execution_name.map(String::from),
            submitted_by: submitted_by.to_string(),
            submission_status: status.as_str().to_string(),
        }
    }
}

/// Observer of execution events.
///
/// Implementations must be Send + Sync; they are shared across requests and
/// invoked on detached tasks.
#[async_trait]
pub trait ExecutionObserver: Send + Sync {
    async fn on_event(&self, event: &ExecutionEvent) -> AppResult<()>;

    /// Observer name for logging.
    fn name(&self) -> &'static str;
}
