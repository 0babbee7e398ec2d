//! In-memory fakes for the service-layer trait seams.
//!
//! Only compiled for tests. Each fake is a deliberately small stand-in with
//! counters where tests assert on call ordering.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Bytes;
use chrono::Utc;
use futures::StreamExt;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::cluster::{ClusterClient, JobState, JobSubmission, LogStream};
use crate::error::{AppError, AppResult};
use crate::models::{
    ExecutionStatus, JobMetadata, JobSecrets, NewExecutionAuditLog, NewScheduledJob, ScheduledJob,
};
use crate::registry::{MetadataRegistry, SecretsRegistry};
use crate::repositories::{AuditStore, ScheduleStore};
use crate::services::notifications::{ExecutionEvent, ExecutionObserver};

fn infrastructure_error(operation: &str) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("injected failure"),
    }
}

// ---------------------------------------------------------------------------
// Schedule store

#[derive(Clone, Copy)]
enum StoreMode {
    Working,
    DuplicateOnInsert,
    Failing,
}

pub struct FakeScheduleStore {
    mode: StoreMode,
    rows: Mutex<Vec<ScheduledJob>>,
    inserts: AtomicUsize,
}

impl Default for FakeScheduleStore {
    fn default() -> Self {
        Self {
            mode: StoreMode::Working,
            rows: Mutex::new(Vec::new()),
            inserts: AtomicUsize::new(0),
        }
    }
}

impl FakeScheduleStore {
    pub fn duplicate_on_insert() -> Self {
        Self {
            mode: StoreMode::DuplicateOnInsert,
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: StoreMode::Failing,
            ..Default::default()
        }
    }

    pub fn insert_count(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScheduleStore for FakeScheduleStore {
    async fn insert(&self, job: NewScheduledJob) -> AppResult<ScheduledJob> {
        match self.mode {
            StoreMode::Failing => return Err(infrastructure_error("insert schedule")),
            StoreMode::DuplicateOnInsert => return Err(AppError::DuplicateJobNameArgs),
            StoreMode::Working => {}
        }
        self.inserts.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now().naive_utc();
        let stored = ScheduledJob {
            id: Uuid::new_v4(),
            job_name: job.job_name,
            args: job.args,
            cron_expression: job.cron_expression,
            notification_emails: job.notification_emails,
            tags: job.tags,
            submitted_by: job.submitted_by,
            enabled: job.enabled,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn list_enabled(&self) -> AppResult<Vec<ScheduledJob>> {
        if matches!(self.mode, StoreMode::Failing) {
            return Err(infrastructure_error("list schedules"));
        }
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.enabled)
            .cloned()
            .collect())
    }

    async fn get_enabled(&self, id: Uuid) -> AppResult<ScheduledJob> {
        if matches!(self.mode, StoreMode::Failing) {
            return Err(infrastructure_error("get schedule"));
        }
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|row| row.id == id && row.enabled)
            .cloned()
            .ok_or(AppError::ScheduleNotFound { id: id.to_string() })
    }

    async fn disable(&self, id: Uuid) -> AppResult<()> {
        if matches!(self.mode, StoreMode::Failing) {
            return Err(infrastructure_error("disable schedule"));
        }
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|row| row.id == id && row.enabled) {
            Some(row) => {
                row.enabled = false;
                Ok(())
            }
            None => Err(AppError::ScheduleNotFound { id: id.to_string() }),
        }
    }
}

// ---------------------------------------------------------------------------
// Audit store

enum AuditMode {
    Recording {
        entries: mpsc::UnboundedSender<NewExecutionAuditLog>,
        outcomes: mpsc::UnboundedSender<(String, ExecutionStatus)>,
    },
    Failing,
}

pub struct FakeAuditStore {
    mode: AuditMode,
}

impl FakeAuditStore {
    /// Store that forwards every insert to a channel the test can drain.
    pub fn recording() -> (Self, mpsc::UnboundedReceiver<NewExecutionAuditLog>) {
        let (store, entries, _outcomes) = Self::recording_with_outcomes();
        (store, entries)
    }

    /// Like `recording`, but also exposes the outcome back-fills as
    /// `(execution_name, status)` pairs.
    pub fn recording_with_outcomes() -> (
        Self,
        mpsc::UnboundedReceiver<NewExecutionAuditLog>,
        mpsc::UnboundedReceiver<(String, ExecutionStatus)>,
    ) {
        let (entry_sender, entry_receiver) = mpsc::unbounded_channel();
        let (outcome_sender, outcome_receiver) = mpsc::unbounded_channel();
        (
            Self {
                mode: AuditMode::Recording {
                    entries: entry_sender,
                    outcomes: outcome_sender,
                },
            },
            entry_receiver,
            outcome_receiver,
        )
    }

    pub fn failing() -> Self {
        Self {
            mode: AuditMode::Failing,
        }
    }
}

#[async_trait]
impl AuditStore for FakeAuditStore {
    async fn insert(&self, entry: NewExecutionAuditLog) -> AppResult<()> {
        match &self.mode {
            AuditMode::Recording { entries, .. } => {
                let _ = entries.send(entry);
                Ok(())
            }
            AuditMode::Failing => Err(infrastructure_error("insert audit log")),
        }
    }

    async fn update_execution_status(
        &self,
        execution_name: &str,
        status: ExecutionStatus,
    ) -> AppResult<()> {
        match &self.mode {
            AuditMode::Recording { outcomes, .. } => {
                let _ = outcomes.send((execution_name.to_string(), status));
                Ok(())
            }
            AuditMode::Failing => Err(infrastructure_error("update audit log")),
        }
    }
}

// ---------------------------------------------------------------------------
// Registries

enum RegistryMode {
    Empty,
    Known(String),
    Failing,
}

pub struct FakeMetadataRegistry {
    mode: RegistryMode,
    lookups: AtomicUsize,
}

impl Default for FakeMetadataRegistry {
    fn default() -> Self {
        Self {
            mode: RegistryMode::Empty,
            lookups: AtomicUsize::new(0),
        }
    }
}

impl FakeMetadataRegistry {
    pub fn with_job(job_name: &str) -> Self {
        Self {
            mode: RegistryMode::Known(job_name.to_string()),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            mode: RegistryMode::Failing,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataRegistry for FakeMetadataRegistry {
    async fn get_job_metadata(&self, job_name: &str) -> AppResult<Option<JobMetadata>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            RegistryMode::Empty => Ok(None),
            RegistryMode::Known(known) if known == job_name => Ok(Some(JobMetadata {
                image_name: format!("registry.example.com/{job_name}:latest"),
                ..Default::default()
            })),
            RegistryMode::Known(_) => Ok(None),
            RegistryMode::Failing => Err(AppError::Registry {
                operation: "get metadata".to_string(),
                source: anyhow::anyhow!("injected failure"),
            }),
        }
    }
}

#[derive(Default)]
pub struct FakeSecretsRegistry {
    secrets: HashMap<String, JobSecrets>,
}

impl FakeSecretsRegistry {
    pub fn with_secrets(job_name: &str, secrets: JobSecrets) -> Self {
        Self {
            secrets: HashMap::from([(job_name.to_string(), secrets)]),
        }
    }
}

#[async_trait]
impl SecretsRegistry for FakeSecretsRegistry {
    async fn get_job_secrets(&self, job_name: &str) -> AppResult<JobSecrets> {
        Ok(self.secrets.get(job_name).cloned().unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Cluster client

#[derive(Clone, Copy)]
enum ClusterMode {
    Working,
    FailingSubmit,
    FailingState,
}

pub struct FakeClusterClient {
    mode: ClusterMode,
    state: Mutex<JobState>,
    submissions: Mutex<Vec<JobSubmission>>,
    logs: Mutex<HashMap<String, Vec<String>>>,
    stream_open: Arc<AtomicBool>,
}

impl Default for FakeClusterClient {
    fn default() -> Self {
        Self {
            mode: ClusterMode::Working,
            state: Mutex::new(JobState::default()),
            submissions: Mutex::new(Vec::new()),
            logs: Mutex::new(HashMap::new()),
            stream_open: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl FakeClusterClient {
    pub fn failing_submit() -> Self {
        Self {
            mode: ClusterMode::FailingSubmit,
            ..Default::default()
        }
    }

    pub fn failing_state() -> Self {
        Self {
            mode: ClusterMode::FailingState,
            ..Default::default()
        }
    }

    pub fn with_logs(execution_name: &str, lines: Vec<&str>) -> Self {
        let client = Self::default();
        client.logs.lock().unwrap().insert(
            execution_name.to_string(),
            lines.into_iter().map(String::from).collect(),
        );
        client
    }

    pub fn submit_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    pub fn last_submission(&self) -> Option<JobSubmission> {
        self.submissions.lock().unwrap().last().cloned()
    }

    pub fn last_execution_name(&self) -> String {
        let submissions = self.submissions.lock().unwrap();
        let last = submissions.last().expect("no job submitted");
        format!("{}-00000000", last.job_name)
    }

    /// Whether a log stream handle is currently held.
    pub fn stream_open(&self) -> bool {
        self.stream_open.load(Ordering::SeqCst)
    }

    /// State that subsequent `job_state` queries report.
    pub fn set_job_state(&self, state: JobState) {
        *self.state.lock().unwrap() = state;
    }
}

/// Flags the upstream handle released when the relayed stream is dropped.
struct StreamGuard(std::sync::Arc<AtomicBool>);

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

#[async_trait]
impl ClusterClient for FakeClusterClient {
    async fn submit_job(&self, submission: JobSubmission) -> AppResult<String> {
        if matches!(self.mode, ClusterMode::FailingSubmit) {
            return Err(AppError::Cluster {
                operation: "submit job".to_string(),
                source: anyhow::anyhow!("injected failure"),
            });
        }
        let execution_name = format!("{}-00000000", submission.job_name);
        self.submissions.lock().unwrap().push(submission);
        Ok(execution_name)
    }

    async fn job_state(&self, _execution_name: &str) -> AppResult<JobState> {
        if matches!(self.mode, ClusterMode::FailingState) {
            return Err(AppError::Cluster {
                operation: "query job state".to_string(),
                source: anyhow::anyhow!("injected failure"),
            });
        }
        Ok(*self.state.lock().unwrap())
    }

    async fn stream_logs(&self, execution_name: &str) -> AppResult<LogStream> {
        let lines = self
            .logs
            .lock()
            .unwrap()
            .get(execution_name)
            .cloned()
            .ok_or(AppError::ExecutionNotFound {
                name: execution_name.to_string(),
            })?;

        self.stream_open.store(true, Ordering::SeqCst);
        let guard = StreamGuard(self.stream_open.clone());
        let stream = futures::stream::unfold(
            (lines.into_iter(), guard),
            |(mut lines, guard)| async move {
                lines
                    .next()
                    .map(|line| (Ok(Bytes::from(line)), (lines, guard)))
            },
        );
        Ok(stream.boxed())
    }
}

// ---------------------------------------------------------------------------
// Observers

pub struct RecordingObserver {
    sender: mpsc::UnboundedSender<ExecutionEvent>,
    receiver: tokio::sync::Mutex<mpsc::UnboundedReceiver<ExecutionEvent>>,
}

impl Default for RecordingObserver {
    fn default() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: tokio::sync::Mutex::new(receiver),
        }
    }
}

impl RecordingObserver {
    pub async fn next_event(&self) -> ExecutionEvent {
        tokio::time::timeout(
            std::time::Duration::from_secs(1),
            self.receiver.lock().await.recv(),
        )
        .await
        .expect("event must be delivered")
        .expect("channel open")
    }
}

#[async_trait]
impl ExecutionObserver for RecordingObserver {
    async fn on_event(&self, event: &ExecutionEvent) -> AppResult<()> {
        let _ = self.sender.send(event.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
