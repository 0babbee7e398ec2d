use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{ExecutionStatus, NewExecutionAuditLog};
use crate::repositories::AuditStore;
use crate::schema::execution_audit_logs;

#[derive(Clone)]
pub struct AuditRepository {
    pool: AsyncDbPool,
}

impl AuditRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for AuditRepository {
    async fn insert(&self, entry: NewExecutionAuditLog) -> AppResult<()> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        diesel::insert_into(execution_audit_logs::table)
            .values(&entry)
            .execute(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert audit entry"))?;

        Ok(())
    }

    async fn update_execution_status(
        &self,
        execution_name: &str,
        status: ExecutionStatus,
    ) -> AppResult<()> {
        let mut conn = self.pool.get().await.map_err(|e| AppError::ConnectionPool {
            source: anyhow::Error::from(e),
        })?;

        diesel::update(
            execution_audit_logs::table
                .filter(execution_audit_logs::execution_name.eq(execution_name)),
        )
        .set(execution_audit_logs::job_execution_status.eq(status.as_str()))
        .execute(&mut conn)
        .await
        .map_err(|e| {
            DatabaseErrorConverter::convert_diesel_error(e, "update audit execution status")
        })?;

        Ok(())
    }
}
