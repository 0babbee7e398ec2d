//! Persistence layer for schedules and the execution audit trail.
//!
//! The traits are the contract the services depend on; the diesel-backed
//! implementations are the production wiring. Store errors come back as
//! typed `AppError` variants, classified structurally at this boundary.

mod audit_repo;
mod schedule_repo;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{ExecutionStatus, NewExecutionAuditLog, NewScheduledJob, ScheduledJob};

pub use audit_repo::AuditRepository;
pub use schedule_repo::ScheduleRepository;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Persists a new schedule, returning it with the store-assigned ID.
    /// A (job_name, args) uniqueness violation among enabled schedules
    /// surfaces as `AppError::DuplicateJobNameArgs`.
    async fn insert(&self, job: NewScheduledJob) -> AppResult<ScheduledJob>;

    /// All enabled schedules, in store-defined order.
    async fn list_enabled(&self) -> AppResult<Vec<ScheduledJob>>;

    /// One enabled schedule by ID.
    async fn get_enabled(&self, id: Uuid) -> AppResult<ScheduledJob>;

    /// Logical delete: flips `enabled` off, preserving history linkage.
    async fn disable(&self, id: Uuid) -> AppResult<()>;
}

#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Appends one audit row.
    async fn insert(&self, entry: NewExecutionAuditLog) -> AppResult<()>;

    /// Back-fills the resolved execution outcome on the row written at
    /// submission time. The outcome column is the only mutable part of the
    /// trail; rows are otherwise append-only.
    async fn update_execution_status(
        &self,
        execution_name: &str,
        status: ExecutionStatus,
    ) -> AppResult<()>;
}
