//! Migrate command handler
//!
//! Applies embedded database migrations, with a dry-run mode that only
//! reports what is pending.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::config::Settings;
use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        self.config.database.validate()?;
        let database_url = self.config.database.url.clone();

        if dry_run {
            let pending = run_on_connection(database_url, |conn| {
                let migrations = conn
                    .pending_migrations(MIGRATIONS)
                    .map_err(|e| migration_error("check pending migrations", e))?;
                Ok(migrations
                    .iter()
                    .map(|m| m.name().to_string())
                    .collect::<Vec<String>>())
            })
            .await?;
            if report("pending", &pending) {
                println!("Run without --dry-run to apply them.");
            }
        } else {
            let applied = run_on_connection(database_url, |conn| {
                let versions = conn
                    .run_pending_migrations(MIGRATIONS)
                    .map_err(|e| migration_error("run pending migrations", e))?;
                Ok(versions
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<String>>())
            })
            .await?;
            report("applied", &applied);
        }

        Ok(())
    }
}

/// Runs a blocking migration operation on its own connection, off the async
/// runtime.
async fn run_on_connection<T, F>(database_url: String, operation: F) -> AppResult<T>
where
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut conn = PgConnection::establish(&database_url).map_err(|e| AppError::Database {
            operation: "establish migration connection".to_string(),
            source: anyhow::anyhow!("{e}"),
        })?;
        operation(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

fn migration_error(
    operation: &str,
    source: Box<dyn std::error::Error + Send + Sync>,
) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("{source}"),
    }
}

/// Prints the migration list; returns whether any were listed.
fn report(verb: &str, names: &[String]) -> bool {
    if names.is_empty() {
        println!("No {verb} migrations; database is up to date.");
        return false;
    }
    println!("{} migration(s) {verb}:", names.len());
    for name in names {
        println!("  - {name}");
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_database_url_fails_before_connecting() {
        let handler = MigrateCommandHandler::new(Settings::default());
        assert!(handler.execute(false).await.is_err());
    }
}
