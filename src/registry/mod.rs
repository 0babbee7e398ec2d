//! Metadata and secrets registries.
//!
//! Both registries are Redis-backed key/value stores mapping a job name to,
//! respectively, its runnable definition and its sensitive execution inputs.
//! Absence of a key is a sentinel outcome (`Ok(None)` / empty map), distinct
//! from operational failures, so callers classify structurally instead of
//! inspecting error text.

mod redis_registry;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{JobMetadata, JobSecrets};

pub use redis_registry::RedisRegistry;

#[async_trait]
pub trait MetadataRegistry: Send + Sync {
    /// Fetches metadata for a job name. `Ok(None)` means the job is unknown.
    async fn get_job_metadata(&self, job_name: &str) -> AppResult<Option<JobMetadata>>;
}

#[async_trait]
pub trait SecretsRegistry: Send + Sync {
    /// Fetches secrets for a job name. Absence is not an error; jobs without
    /// secrets get an empty map.
    async fn get_job_secrets(&self, job_name: &str) -> AppResult<JobSecrets>;
}
