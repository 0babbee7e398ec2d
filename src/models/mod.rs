//! Domain models: persisted rows, registry values and canonical statuses.

mod audit;
mod execution;
mod metadata;
mod schedule;

pub use audit::{NewExecutionAuditLog, SubmissionStatus};
pub use execution::ExecutionStatus;
pub use metadata::{JobMetadata, JobSecrets};
pub use schedule::{NewScheduledJob, ScheduledJob};
