//! CLI argument parsing with clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use shadow_rs::shadow;
shadow!(build);

/// Job orchestration server for containerized one-shot and scheduled jobs
#[derive(Parser, Debug)]
#[command(name = "dispatchd")]
#[command(about = "Job orchestration server for containerized jobs")]
#[command(long_about = "
Dispatchd serves a job orchestration API: clients schedule recurring jobs,
submit one-shot executions to a Kubernetes cluster, query execution status
and follow live logs. Every execution attempt is recorded in an audit trail.

EXAMPLES:
    dispatchd serve
    dispatchd serve --host 0.0.0.0 --port 5000
    dispatchd --config /etc/dispatchd/config.toml serve
    dispatchd serve --dry-run
    dispatchd migrate --dry-run
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Single TOML configuration file, instead of the layered config directory
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Errors only
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    Serve {
        /// Bind address
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Listen port
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level; outranks the configuration file and --verbose/--quiet
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit without serving
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply pending database migrations
    Migrate {
        /// Report pending migrations without applying them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    Error,
    #[value(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_behavior_has_no_command() {
        let cli = Cli::try_parse_from(["dispatchd"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
    }

    #[test]
    fn serve_accepts_host_and_port() {
        let cli =
            Cli::try_parse_from(["dispatchd", "serve", "--host", "0.0.0.0", "--port", "5000"])
                .unwrap();
        if let Some(Commands::Serve { host, port, .. }) = cli.command {
            assert_eq!(host, Some("0.0.0.0".to_string()));
            assert_eq!(port, Some(5000));
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn migrate_accepts_dry_run() {
        let cli = Cli::try_parse_from(["dispatchd", "migrate", "--dry-run"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Migrate { dry_run: true })
        ));
    }

    #[test]
    fn log_level_names_are_lowercase() {
        let cli = Cli::try_parse_from(["dispatchd", "serve", "--log-level", "warn"]).unwrap();
        if let Some(Commands::Serve { log_level, .. }) = cli.command {
            assert_eq!(log_level.unwrap().as_str(), "warn");
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["dispatchd", "--verbose", "--quiet"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert!(Cli::try_parse_from(["dispatchd", "serve", "--port", "0"]).is_err());
    }
}
