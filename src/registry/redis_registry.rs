//! Redis implementation of the metadata and secrets registries,
//! using a bb8 connection pool.

use async_trait::async_trait;
use bb8::{Pool, PooledConnection};
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};

use crate::config::RegistryConfig;
use crate::error::{AppError, AppResult};
use crate::models::{JobMetadata, JobSecrets};
use crate::registry::{MetadataRegistry, SecretsRegistry};

type RedisPool = Pool<Client>;

/// Redis-backed registry. One instance serves both the metadata and the
/// secrets namespace; keys are `{prefix}:metadata:{job}` and
/// `{prefix}:secret:{job}`, values are JSON documents.
#[derive(Clone)]
pub struct RedisRegistry {
    pool: RedisPool,
    key_prefix: String,
}

impl RedisRegistry {
    pub async fn new(config: &RegistryConfig) -> AppResult<Self> {
        let client = Client::open(config.url.as_str()).map_err(|e| AppError::Registry {
            operation: "open redis client".to_string(),
            source: anyhow::Error::from(e),
        })?;

        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_timeout(std::time::Duration::from_secs(config.connection_timeout))
            .build(client)
            .await
            .map_err(|e| AppError::Registry {
                operation: "build redis pool".to_string(),
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            pool,
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn metadata_key(&self, job_name: &str) -> String {
        format!("{}:metadata:{}", self.key_prefix, job_name)
    }

    fn secrets_key(&self, job_name: &str) -> String {
        format!("{}:secret:{}", self.key_prefix, job_name)
    }

    async fn get_conn(&self, operation: &str) -> AppResult<PooledConnection<'_, Client>> {
        self.pool.get().await.map_err(|e| AppError::Registry {
            operation: operation.to_string(),
            source: anyhow::anyhow!("redis pool: {e}"),
        })
    }

    async fn get_raw(&self, key: &str, operation: &str) -> AppResult<Option<Vec<u8>>> {
        let mut conn = self.get_conn(operation).await?;
        let conn_ref: &mut MultiplexedConnection = &mut conn;
        conn_ref.get(key).await.map_err(|e| AppError::Registry {
            operation: operation.to_string(),
            source: anyhow::Error::from(e),
        })
    }
}

#[async_trait]
impl MetadataRegistry for RedisRegistry {
    async fn get_job_metadata(&self, job_name: &str) -> AppResult<Option<JobMetadata>> {
        let operation = "get job metadata";
        let Some(raw) = self.get_raw(&self.metadata_key(job_name), operation).await? else {
            return Ok(None);
        };

        let metadata = serde_json::from_slice(&raw).map_err(|e| AppError::Registry {
            operation: operation.to_string(),
            source: anyhow::Error::from(e),
        })?;
        Ok(Some(metadata))
    }
}

#[async_trait]
impl SecretsRegistry for RedisRegistry {
    async fn get_job_secrets(&self, job_name: &str) -> AppResult<JobSecrets> {
        let operation = "get job secrets";
        let Some(raw) = self.get_raw(&self.secrets_key(job_name), operation).await? else {
            return Ok(JobSecrets::default());
        };

        serde_json::from_slice(&raw).map_err(|e| AppError::Registry {
            operation: operation.to_string(),
            source: anyhow::Error::from(e),
        })
    }
}
