//! Webhook execution-event observer.
//!
//! Posts each execution event as JSON to a configured URL.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::WebhookConfig;
use crate::error::{AppError, AppResult};
use crate::services::notifications::{ExecutionEvent, ExecutionObserver};

pub struct WebhookObserver {
    http: reqwest::Client,
    url: String,
}

impl WebhookObserver {
    pub fn new(config: &WebhookConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .use_rustls_tls()
            .build()
            .map_err(|e| AppError::Configuration {
                key: "notifications.webhook".to_string(),
                source: anyhow::Error::from(e),
            })?;

        Ok(Self {
            http,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl ExecutionObserver for WebhookObserver {
    async fn on_event(&self, event: &ExecutionEvent) -> AppResult<()> {
        let response = self
            .http
            .post(&self.url)
            .json(event)
            .send()
            .await
            .map_err(|e| AppError::Internal {
                source: anyhow::Error::from(e),
            })?;

        if !response.status().is_success() {
            return Err(AppError::Internal {
                source: anyhow::anyhow!("webhook returned {}", response.status()),
            });
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}
