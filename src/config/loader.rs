//! Layered configuration loading.
//!
//! Sources in order of priority (later wins):
//! 1. `default.toml` (required)
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `DISPATCHD_*` environment variables

use std::path::PathBuf;

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "DISPATCHD_CONFIG_DIR";
const CONFIG_FILE_ENV: &str = "DISPATCHD_CONFIG_FILE";
const DEFAULT_CONFIG_DIR: &str = "config";

/// Prefix and key separator for overrides, so
/// `DISPATCHD_SERVER__PORT` maps to `server.port`.
const ENV_PREFIX: &str = "DISPATCHD";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// Pinned single file; when set, the layered directory lookup is skipped.
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Builds a loader from the process environment.
    ///
    /// `DISPATCHD_CONFIG_DIR` and `DISPATCHD_CONFIG_FILE` are mutually
    /// exclusive; setting both is a configuration error.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let file_var = std::env::var(CONFIG_FILE_ENV).ok();

        if dir_var.is_some() && file_var.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "DISPATCHD_CONFIG_DIR and DISPATCHD_CONFIG_FILE cannot both be set. \
                 Use DISPATCHD_CONFIG_DIR for layered configuration or \
                 DISPATCHD_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file: file_var.map(PathBuf::from),
            environment: AppEnvironment::from_env(),
        })
    }

    /// Loader pinned to an explicit configuration file. Used for the CLI
    /// `--config` flag.
    pub fn with_config_file(path: PathBuf) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path),
            environment: AppEnvironment::from_env(),
        }
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Reads, merges and validates settings from every source.
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let mut builder = Config::builder();

        for (path, required) in self.file_sources() {
            if required && !path.exists() {
                return Err(ConfigError::file_not_found(format!(
                    "Required configuration file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(
                File::new(path.to_str().unwrap_or_default(), FileFormat::Toml)
                    .required(required),
            );
        }

        // Environment variables always win.
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: Settings = builder
            .build()?
            .try_deserialize()
            .map_err(|e| {
                ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// The TOML files to merge, lowest priority first, paired with whether
    /// their absence is an error.
    fn file_sources(&self) -> Vec<(PathBuf, bool)> {
        match &self.config_file {
            Some(file) => vec![(file.clone(), true)],
            None => vec![
                (self.config_dir.join("default.toml"), true),
                (
                    self.config_dir
                        .join(format!("{}.toml", self.environment.as_str())),
                    false,
                ),
                (self.config_dir.join("local.toml"), false),
            ],
        }
    }
}
