//! Configuration settings structures for dispatchd
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::LoggerConfig;

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "dispatchd".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_registry_pool_size() -> u32 {
    5
}

fn default_registry_key_prefix() -> String {
    "dispatchd:jobs".to_string()
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_log_stream_timeout() -> u64 {
    3600
}

fn default_job_ttl_seconds() -> u32 {
    3600
}

fn default_webhook_timeout() -> u64 {
    10
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds. Does not apply to the log relay
    /// endpoint, which has its own streaming deadline.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
        }
    }
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "database.url",
                "database URL must be configured",
            ));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::validation(
                "database.max_connections",
                "connection pool size must be at least 1",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(ConfigError::validation(
                "database.min_connections",
                "minimum connections cannot exceed maximum connections",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Registry Configuration
// ============================================================================

/// Redis-backed metadata/secrets registry configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Redis connection URL
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_registry_pool_size")]
    pub pool_size: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Key namespace prefix for registry entries
    #[serde(default = "default_registry_key_prefix")]
    pub key_prefix: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            pool_size: default_registry_pool_size(),
            connection_timeout: default_connection_timeout(),
            key_prefix: default_registry_key_prefix(),
        }
    }
}

impl RegistryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.url.is_empty() {
            return Err(ConfigError::validation(
                "registry.url",
                "registry URL must be configured",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Cluster Configuration
// ============================================================================

/// Kubernetes cluster client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterConfig {
    /// Kubernetes API server URL
    #[serde(default)]
    pub api_url: String,

    /// Bearer token for API authentication. Optional for clusters behind
    /// an authenticating proxy.
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Timeout for submission and state queries, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Deadline for a single log-follow stream, in seconds
    #[serde(default = "default_log_stream_timeout")]
    pub log_stream_timeout: u64,

    /// TTL applied to finished jobs so the cluster garbage-collects them
    #[serde(default = "default_job_ttl_seconds")]
    pub job_ttl_seconds: u32,

    /// Skip TLS certificate verification. Development clusters only.
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            token: None,
            namespace: default_namespace(),
            request_timeout: default_request_timeout(),
            log_stream_timeout: default_log_stream_timeout(),
            job_ttl_seconds: default_job_ttl_seconds(),
            accept_invalid_certs: false,
        }
    }
}

impl ClusterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_url.is_empty() {
            return Err(ConfigError::validation(
                "cluster.api_url",
                "cluster API URL must be configured",
            ));
        }
        if self.namespace.is_empty() {
            return Err(ConfigError::validation(
                "cluster.namespace",
                "cluster namespace must not be empty",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Notifications Configuration
// ============================================================================

/// Webhook observer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Target URL for execution event POSTs
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_webhook_timeout")]
    pub timeout: u64,
}

/// Execution event notification configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Optional webhook observer. No webhook section means no observer.
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
}

// ============================================================================
// Settings
// ============================================================================

/// Complete application settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub cluster: ClusterConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub logger: LoggerConfig,
}

impl Settings {
    /// Validate the complete configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.registry.validate()?;
        self.cluster.validate()?;

        if self.server.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "server port must not be 0",
            ));
        }

        if let Some(webhook) = &self.notifications.webhook
            && webhook.url.is_empty()
        {
            return Err(ConfigError::validation(
                "notifications.webhook.url",
                "webhook URL must not be empty when the webhook section is present",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/dispatchd".to_string();
        settings.registry.url = "redis://localhost:6379".to_string();
        settings.cluster.api_url = "https://kubernetes.default.svc".to_string();
        settings
    }

    #[test]
    fn valid_settings_pass_validation() {
        assert!(valid_settings().validate().is_ok());
    }

    #[test]
    fn missing_database_url_fails() {
        let mut settings = valid_settings();
        settings.database.url.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn missing_cluster_api_url_fails() {
        let mut settings = valid_settings();
        settings.cluster.api_url.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn zero_port_fails() {
        let mut settings = valid_settings();
        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn empty_webhook_url_fails() {
        let mut settings = valid_settings();
        settings.notifications.webhook = Some(WebhookConfig {
            url: String::new(),
            timeout: 10,
        });
        assert!(settings.validate().is_err());
    }

    #[test]
    fn server_address_joins_host_and_port() {
        let settings = valid_settings();
        assert_eq!(settings.server.address(), "127.0.0.1:5000");
    }

    #[test]
    fn settings_deserialize_from_toml() {
        let settings: Settings = toml::from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 5000

            [database]
            url = "postgres://localhost/dispatchd"

            [registry]
            url = "redis://localhost:6379"
            key_prefix = "jobs"

            [cluster]
            api_url = "https://kubernetes.default.svc"
            namespace = "dispatchd"

            [notifications.webhook]
            url = "https://hooks.example.com/dispatchd"
            "#,
        )
        .expect("settings must deserialize");

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.registry.key_prefix, "jobs");
        assert_eq!(settings.cluster.namespace, "dispatchd");
        assert_eq!(settings.cluster.job_ttl_seconds, 3600);
        assert!(settings.notifications.webhook.is_some());
        assert!(settings.validate().is_ok());
    }
}
