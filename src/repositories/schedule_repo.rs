use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{NewScheduledJob, ScheduledJob};
use crate::repositories::ScheduleStore;
use crate::schema::scheduled_jobs;

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: AsyncDbPool,
}

impl ScheduleRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(e: impl std::fmt::Display) -> AppError {
    AppError::ConnectionPool {
        source: anyhow::anyhow!("{e}"),
    }
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn insert(&self, job: NewScheduledJob) -> AppResult<ScheduledJob> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        diesel::insert_into(scheduled_jobs::table)
            .values(&job)
            .get_result(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert schedule"))
    }

    async fn list_enabled(&self) -> AppResult<Vec<ScheduledJob>> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        scheduled_jobs::table
            .filter(scheduled_jobs::enabled.eq(true))
            .order(scheduled_jobs::created_at.desc())
            .load(&mut conn)
            .await
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "list schedules"))
    }

    async fn get_enabled(&self, id: Uuid) -> AppResult<ScheduledJob> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        scheduled_jobs::table
            .find(id)
            .filter(scheduled_jobs::enabled.eq(true))
            .first(&mut conn)
            .await
            .map_err(|e| match e {
                diesel::result::Error::NotFound => AppError::ScheduleNotFound {
                    id: id.to_string(),
                },
                _ => DatabaseErrorConverter::convert_diesel_error(e, "get schedule"),
            })
    }

    async fn disable(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;

        let updated = diesel::update(
            scheduled_jobs::table
                .find(id)
                .filter(scheduled_jobs::enabled.eq(true)),
        )
        .set((
            scheduled_jobs::enabled.eq(false),
            scheduled_jobs::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "disable schedule"))?;

        if updated == 0 {
            Err(AppError::ScheduleNotFound {
                id: id.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
