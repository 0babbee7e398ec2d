use std::collections::HashMap;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::schema::scheduled_jobs;

/// A persisted recurring job schedule.
///
/// `args` is stored as JSONB so the (job_name, args) uniqueness index can
/// compare argument maps independent of key order.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = scheduled_jobs)]
pub struct ScheduledJob {
    pub id: Uuid,
    pub job_name: String,
    pub args: JsonValue,
    pub cron_expression: String,
    pub notification_emails: String,
    pub tags: String,
    pub submitted_by: String,
    pub enabled: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl ScheduledJob {
    /// Argument mapping as a plain string map. Non-string values cannot occur
    /// through the API; anything unexpected decodes to an empty map.
    pub fn args_map(&self) -> HashMap<String, String> {
        serde_json::from_value(self.args.clone()).unwrap_or_default()
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = scheduled_jobs)]
pub struct NewScheduledJob {
    pub job_name: String,
    pub args: JsonValue,
    pub cron_expression: String,
    pub notification_emails: String,
    pub tags: String,
    pub submitted_by: String,
    pub enabled: bool,
}

impl NewScheduledJob {
    pub fn new(
        job_name: String,
        args: HashMap<String, String>,
        cron_expression: String,
        notification_emails: String,
        tags: String,
        submitted_by: String,
    ) -> Self {
        Self {
            job_name,
            args: serde_json::to_value(args).unwrap_or_else(|_| JsonValue::Object(Default::default())),
            cron_expression,
            notification_emails,
            tags,
            submitted_by,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_round_trip_through_jsonb_value() {
        let mut args = HashMap::new();
        args.insert("COUNTRY".to_string(), "ID".to_string());
        args.insert("DRY_RUN".to_string(), "true".to_string());

        let new_job = NewScheduledJob::new(
            "run-report".to_string(),
            args.clone(),
            "* 2 * * *".to_string(),
            String::new(),
            "reports".to_string(),
            "mrproctor@example.com".to_string(),
        );

        let decoded: HashMap<String, String> =
            serde_json::from_value(new_job.args).expect("args must stay a string map");
        assert_eq!(decoded, args);
    }
}
