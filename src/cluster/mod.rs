//! Cluster execution substrate client.
//!
//! The server never runs jobs itself; it submits them to an external
//! Kubernetes cluster and queries job state and pod logs back. The trait is
//! the seam the Executioner and Log Streamer depend on, so tests substitute
//! an in-memory cluster.

mod kubernetes;
mod types;

use async_trait::async_trait;

use crate::error::AppResult;

pub use kubernetes::KubernetesClient;
pub use types::{JobState, JobSubmission, LogStream};

#[async_trait]
pub trait ClusterClient: Send + Sync {
    /// Submits one execution of a job. The client derives a unique execution
    /// name from the job name and returns it.
    async fn submit_job(&self, submission: JobSubmission) -> AppResult<String>;

    /// Raw state of the named execution as the cluster reports it. Errors
    /// here (transport, auth, unknown job) are infrastructure failures of
    /// the query itself; interpreting the state is the Executioner's job.
    async fn job_state(&self, execution_name: &str) -> AppResult<JobState>;

    /// Opens the live log byte stream of the named execution. Fails with a
    /// not-found error before any bytes flow when the execution is unknown.
    /// Dropping the returned stream releases the upstream handle.
    async fn stream_logs(&self, execution_name: &str) -> AppResult<LogStream>;
}
