//! Schedule wire types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::ScheduledJob;
use crate::services::ScheduleRequest;

/// Schedule submission body. `time` carries the cron expression; the field
/// name is part of the wire contract.
#[derive(Debug, Deserialize)]
pub struct CreateScheduleRequest {
    pub name: String,
    #[serde(default)]
    pub args: HashMap<String, String>,
    pub time: String,
    #[serde(default)]
    pub notification_emails: String,
    #[serde(default)]
    pub tags: String,
}

impl CreateScheduleRequest {
    pub fn into_schedule_request(self, submitted_by: String) -> ScheduleRequest {
        ScheduleRequest {
            job_name: self.name,
            args: self.args,
            cron_expression: self.time,
            notification_emails: self.notification_emails,
            tags: self.tags,
            submitted_by,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub id: String,
    pub name: String,
    pub args: HashMap<String, String>,
    pub time: String,
    pub notification_emails: String,
    pub tags: String,
    pub user_email: String,
}

impl From<ScheduledJob> for ScheduleResponse {
    fn from(job: ScheduledJob) -> Self {
        Self {
            id: job.id.to_string(),
            args: job.args_map(),
            name: job.job_name,
            time: job.cron_expression,
            notification_emails: job.notification_emails,
            tags: job.tags,
            user_email: job.submitted_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_decodes_with_optional_fields_absent() {
        let request: CreateScheduleRequest = serde_json::from_str(
            r#"{"name": "run-report", "time": "* 2 * * *", "tags": "reports"}"#,
        )
        .expect("must decode");
        assert_eq!(request.name, "run-report");
        assert!(request.args.is_empty());
        assert!(request.notification_emails.is_empty());
    }

    #[test]
    fn request_maps_time_onto_cron_expression() {
        let request: CreateScheduleRequest = serde_json::from_str(
            r#"{"name": "run-report", "time": "0 2 * * *", "tags": "reports"}"#,
        )
        .unwrap();
        let schedule = request.into_schedule_request("mrproctor@example.com".to_string());
        assert_eq!(schedule.cron_expression, "0 2 * * *");
        assert_eq!(schedule.submitted_by, "mrproctor@example.com");
    }
}
