//! Scheduler: validation and persistence of recurring job schedules.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewScheduledJob, ScheduledJob};
use crate::registry::MetadataRegistry;
use crate::repositories::ScheduleStore;
use crate::utils::validate;

/// A schedule submission after body decoding, before validation.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub job_name: String,
    pub args: HashMap<String, String>,
    pub cron_expression: String,
    pub notification_emails: String,
    pub tags: String,
    pub submitted_by: String,
}

#[derive(Clone)]
pub struct SchedulerService {
    store: Arc<dyn ScheduleStore>,
    metadata_registry: Arc<dyn MetadataRegistry>,
}

impl SchedulerService {
    pub fn new(store: Arc<dyn ScheduleStore>, metadata_registry: Arc<dyn MetadataRegistry>) -> Self {
        Self {
            store,
            metadata_registry,
        }
    }

    /// Validates and persists a schedule.
    ///
    /// Checks run cheapest-first: cron grammar, then the email list, then
    /// tags, all before any registry or store round-trip. The (name, args)
    /// uniqueness invariant is enforced by the store's constraint, not here;
    /// under concurrent attempts exactly one insert wins.
    pub async fn schedule(&self, request: ScheduleRequest) -> AppResult<ScheduledJob> {
        validate::validate_cron_expression(&request.cron_expression)?;
        validate::validate_notification_emails(&request.notification_emails)?;
        validate::validate_tags(&request.tags)?;

        if self
            .metadata_registry
            .get_job_metadata(&request.job_name)
            .await?
            .is_none()
        {
            return Err(AppError::NonExistentProc {
                name: request.job_name,
            });
        }

        let scheduled = self
            .store
            .insert(NewScheduledJob::new(
                request.job_name,
                request.args,
                request.cron_expression,
                request.notification_emails,
                request.tags,
                request.submitted_by,
            ))
            .await?;

        tracing::info!(
            schedule_id = %scheduled.id,
            job_name = %scheduled.job_name,
            "job scheduled"
        );
        Ok(scheduled)
    }

    /// All enabled schedules. Order is store-defined and carries no meaning.
    pub async fn list(&self) -> AppResult<Vec<ScheduledJob>> {
        self.store.list_enabled().await
    }

    pub async fn get(&self, id: &str) -> AppResult<ScheduledJob> {
        let id = parse_schedule_id(id)?;
        self.store.get_enabled(id).await
    }

    /// Logical removal: the schedule is disabled, never deleted, so audit
    /// history keeps pointing at it.
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let id = parse_schedule_id(id)?;
        self.store.disable(id).await?;
        tracing::info!(schedule_id = %id, "schedule disabled");
        Ok(())
    }
}

/// A syntactically invalid ID can match no schedule, so it reports the same
/// not-found condition a well-formed unknown ID does.
fn parse_schedule_id(id: &str) -> AppResult<Uuid> {
    id.parse().map_err(|_| AppError::ScheduleNotFound {
        id: id.to_string(),
    })
}
