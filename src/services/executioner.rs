//! Executioner: one-shot job submission and status resolution.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::cluster::{ClusterClient, JobState, JobSubmission};
use crate::error::{AppError, AppResult};
use crate::models::{ExecutionStatus, NewExecutionAuditLog, SubmissionStatus};
use crate::registry::{MetadataRegistry, SecretsRegistry};
use crate::services::AuditService;
use crate::services::notifications::{ExecutionEvent, ExecutionObserver};

/// An execution submission after body decoding.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub job_name: String,
    pub args: HashMap<String, String>,
    pub submitted_by: String,
}

/// What a successful submission hands back to the caller: the name under
/// which the cluster tracks this execution.
#[derive(Debug, Clone)]
pub struct ExecutionReceipt {
    pub job_name: String,
    pub execution_name: String,
}

// Outcome polling window: one status probe every interval, bounded so an
// execution the cluster never finishes does not leak a task.
const OUTCOME_POLL_INTERVAL: Duration = Duration::from_secs(5);
const OUTCOME_POLL_ATTEMPTS: u32 = 360;

#[derive(Clone)]
pub struct ExecutionerService {
    metadata_registry: Arc<dyn MetadataRegistry>,
    secrets_registry: Arc<dyn SecretsRegistry>,
    cluster: Arc<dyn ClusterClient>,
    audit: AuditService,
    observers: Arc<Vec<Arc<dyn ExecutionObserver>>>,
    outcome_poll_interval: Duration,
    outcome_poll_attempts: u32,
}

impl ExecutionerService {
    pub fn new(
        metadata_registry: Arc<dyn MetadataRegistry>,
        secrets_registry: Arc<dyn SecretsRegistry>,
        cluster: Arc<dyn ClusterClient>,
        audit: AuditService,
        observers: Vec<Arc<dyn ExecutionObserver>>,
    ) -> Self {
        Self {
            metadata_registry,
            secrets_registry,
            cluster,
            audit,
            observers: Arc::new(observers),
            outcome_poll_interval: OUTCOME_POLL_INTERVAL,
            outcome_poll_attempts: OUTCOME_POLL_ATTEMPTS,
        }
    }

    pub fn with_outcome_polling(mut self, interval: Duration, attempts: u32) -> Self {
        self.outcome_poll_interval = interval;
        self.outcome_poll_attempts = attempts;
        self
    }

    /// Submits one execution of a job.
    ///
    /// Resolves the image from the metadata registry, merges caller args with
    /// registry secrets (secrets win on key collision, so a caller cannot
    /// override an injected credential), and hands the result to the cluster.
    /// Every path through here, success or failure, leaves an audit record.
    pub async fn execute(&self, request: ExecutionRequest) -> AppResult<ExecutionReceipt> {
        let metadata = match self.metadata_registry.get_job_metadata(&request.job_name).await {
            Ok(Some(metadata)) => metadata,
            Ok(None) => {
                self.record(&request, SubmissionStatus::ClientError, None, None);
                return Err(AppError::NonExistentProc {
                    name: request.job_name,
                });
            }
            Err(error) => {
                self.record(&request, SubmissionStatus::ServerError, None, None);
                return Err(error);
            }
        };

        let secrets = match self.secrets_registry.get_job_secrets(&request.job_name).await {
            Ok(secrets) => secrets,
            Err(error) => {
                self.record(
                    &request,
                    SubmissionStatus::ServerError,
                    Some(&metadata.image_name),
                    None,
                );
                return Err(error);
            }
        };

        let mut env = request.args.clone();
        env.extend(secrets);

        let submission = JobSubmission {
            job_name: request.job_name.clone(),
            image_name: metadata.image_name.clone(),
            env,
        };
        let execution_name = match self.cluster.submit_job(submission).await {
            Ok(name) => name,
            Err(error) => {
                self.record(
                    &request,
                    SubmissionStatus::ServerError,
                    Some(&metadata.image_name),
                    None,
                );
                return Err(error);
            }
        };

        self.record(
            &request,
            SubmissionStatus::Success,
            Some(&metadata.image_name),
            Some(&execution_name),
        );
        self.track_outcome(execution_name.clone());

        tracing::info!(
            job_name = %request.job_name,
            execution_name = %execution_name,
            "job submitted"
        );
        Ok(ExecutionReceipt {
            job_name: request.job_name,
            execution_name,
        })
    }

    /// Current status of a previously submitted execution.
    ///
    /// Resolution is total: a failed state query is itself a status, so this
    /// never errors on the cluster's account.
    pub async fn status(&self, execution_name: &str) -> ExecutionStatus {
        match self.cluster.job_state(execution_name).await {
            Ok(state) => resolve_status(&state),
            Err(error) => {
                tracing::warn!(
                    execution_name = %execution_name,
                    error = ?error,
                    "execution status fetch failed"
                );
                ExecutionStatus::StatusFetchError
            }
        }
    }

    /// Audits the submission outcome and publishes it to observers. Called on
    /// every path out of `execute`, success and failure alike.
    fn record(
        &self,
        request: &ExecutionRequest,
        status: SubmissionStatus,
        image_name: Option<&str>,
        execution_name: Option<&str>,
    ) {
        let mut entry = NewExecutionAuditLog::new(
            &request.job_name,
            &request.args,
            &request.submitted_by,
            status,
        );
        if let Some(image) = image_name {
            entry = entry.with_image(image);
        }
        if let Some(name) = execution_name {
            entry = entry.with_execution_name(name);
        }
        self.audit.record(entry);
        self.publish(ExecutionEvent::new(
            &request.job_name,
            execution_name,
            &request.submitted_by,
            status,
        ));
    }

    /// Follows a submitted execution until it succeeds or fails, then
    /// back-fills the audit row with the outcome.
    ///
    /// Detached and best-effort: state-query failures are retried on the next
    /// tick, and an execution still unresolved when the polling window closes
    /// keeps an empty outcome.
    fn track_outcome(&self, execution_name: String) {
        let cluster = self.cluster.clone();
        let audit = self.audit.clone();
        let interval = self.outcome_poll_interval;
        let attempts = self.outcome_poll_attempts;
        tokio::spawn(async move {
            for _ in 0..attempts {
                if let Ok(state) = cluster.job_state(&execution_name).await {
                    let status = resolve_status(&state);
                    if matches!(status, ExecutionStatus::Succeeded | ExecutionStatus::Failed) {
                        audit.record_outcome(execution_name, status);
                        return;
                    }
                }
                tokio::time::sleep(interval).await;
            }
            tracing::warn!(
                execution_name = %execution_name,
                "execution outcome unresolved, audit row left without one"
            );
        });
    }

    fn publish(&self, event: ExecutionEvent) {
        for observer in self.observers.iter().cloned() {
            let event = event.clone();
            tokio::spawn(async move {
                if let Err(error) = observer.on_event(&event).await {
                    tracing::warn!(
                        observer = observer.name(),
                        job_name = %event.job_name,
                        error = ?error,
                        "execution event delivery failed"
                    );
                }
            });
        }
    }
}

/// Maps raw cluster job state onto the canonical status.
///
/// A failure condition dominates, then completion; anything still running is
/// waiting, as is a job the cluster has not started units for yet. Only the
/// residual case (finished units but no terminal condition) is indefinite.
pub fn resolve_status(state: &JobState) -> ExecutionStatus {
    if state.failed_condition {
        ExecutionStatus::Failed
    } else if state.complete {
        ExecutionStatus::Succeeded
    } else if state.active > 0 {
        ExecutionStatus::Waiting
    } else if state.succeeded == 0 && state.failed == 0 {
        ExecutionStatus::Waiting
    } else {
        ExecutionStatus::NoDefinitiveStatus
    }
}
