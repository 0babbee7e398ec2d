use std::collections::HashMap;

use diesel::prelude::*;
use serde_json::Value as JsonValue;

use crate::schema::execution_audit_logs;

/// Outcome of the submission step itself, recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    Success,
    ClientError,
    ServerError,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Success => "success",
            SubmissionStatus::ClientError => "client_error",
            SubmissionStatus::ServerError => "server_error",
        }
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One append-only audit row. Written for every execution attempt, including
/// ones that failed before the cluster assigned an execution name.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = execution_audit_logs)]
pub struct NewExecutionAuditLog {
    pub job_name: String,
    pub job_args: JsonValue,
    pub image_name: Option<String>,
    pub execution_name: Option<String>,
    pub submitted_by: String,
    pub job_submission_status: String,
    pub job_execution_status: Option<String>,
}

impl NewExecutionAuditLog {
    pub fn new(
        job_name: &str,
        args: &HashMap<String, String>,
        submitted_by: &str,
        submission_status: SubmissionStatus,
    ) -> Self {
        Self {
            job_name: job_name.to_string(),
            job_args: serde_json::to_value(args)
                .unwrap_or_else(|_| JsonValue::Object(Default::default())),
            image_name: None,
            execution_name: None,
            submitted_by: submitted_by.to_string(),
            job_submission_status: submission_status.as_str().to_string(),
            job_execution_status: None,
        }
    }

    pub fn with_image(mut self, image_name: &str) -> Self {
        self.image_name = Some(image_name.to_string());
        self
    }

    pub fn with_execution_name(mut self, execution_name: &str) -> Self {
        self.execution_name = Some(execution_name.to_string());
        self
    }
}
