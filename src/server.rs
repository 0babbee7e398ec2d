//! HTTP server lifecycle: wiring, bind and graceful shutdown.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::cluster::KubernetesClient;
use crate::config::{Environment, Settings};
use crate::db::establish_async_connection_pool;
use crate::registry::RedisRegistry;
use crate::repositories::{AuditRepository, ScheduleRepository};
use crate::services::Dependencies;
use crate::services::notifications::{ExecutionObserver, WebhookObserver};
use crate::state::AppState;

pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Wires the store, registries, cluster client and observers into the
    /// shared state, binds the configured address and serves until Ctrl+C
    /// or SIGTERM.
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            name = %self.settings.application.name,
            version = %self.settings.application.version,
            environment = %Environment::from_env(),
            namespace = %self.settings.cluster.namespace,
            cluster_token_configured = self.settings.cluster.token.is_some(),
            "starting"
        );

        let state = self.build_state().await?;
        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            anyhow::anyhow!("failed to bind to {address}: {e}")
        })?;
        tracing::info!(%address, "listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("shutdown complete");
        Ok(())
    }

    async fn build_state(&self) -> anyhow::Result<AppState> {
        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!(
            max_connections = self.settings.database.max_connections,
            "database pool ready"
        );

        let registry = Arc::new(RedisRegistry::new(&self.settings.registry).await?);
        tracing::info!(key_prefix = %self.settings.registry.key_prefix, "registry ready");

        let cluster = Arc::new(KubernetesClient::new(&self.settings.cluster)?);

        let mut observers: Vec<Arc<dyn ExecutionObserver>> = Vec::new();
        if let Some(webhook) = &self.settings.notifications.webhook {
            observers.push(Arc::new(WebhookObserver::new(webhook)?));
            tracing::info!(url = %webhook.url, "webhook observer configured");
        }

        Ok(AppState::new(Dependencies {
            schedule_store: Arc::new(ScheduleRepository::new(pool.clone())),
            audit_store: Arc::new(AuditRepository::new(pool)),
            metadata_registry: registry.clone(),
            secrets_registry: registry,
            cluster,
            observers,
        }))
    }
}

/// Resolves when the process receives Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
