use std::collections::HashMap;

use axum::body::Bytes;
use futures::stream::BoxStream;

use crate::error::AppError;

/// A job execution handed to the cluster: resolved image plus the merged
/// environment (caller args with secrets already applied).
#[derive(Debug, Clone)]
pub struct JobSubmission {
    pub job_name: String,
    pub image_name: String,
    pub env: HashMap<String, String>,
}

/// Cluster-reported state of one job execution, unresolved.
///
/// `active`, `succeeded` and `failed` are execution-unit (pod) counts;
/// `complete` and `failed_condition` reflect the job's terminal conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JobState {
    pub active: i32,
    pub succeeded: i32,
    pub failed: i32,
    pub complete: bool,
    pub failed_condition: bool,
}

/// Live log bytes relayed from the cluster. Backpressure from the consumer
/// throttles the upstream read; dropping the stream closes it.
pub type LogStream = BoxStream<'static, Result<Bytes, AppError>>;
