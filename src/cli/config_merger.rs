//! Merges CLI flags into loaded settings.
//!
//! CLI flags outrank every configuration source, including environment
//! variables. Precedence within logging flags: --log-level beats
//! --verbose/--quiet.

use crate::config::Settings;

use super::parser::{Cli, Commands};

pub fn apply_cli_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if cli.verbose {
        settings.logger.level = "debug".to_string();
    } else if cli.quiet {
        settings.logger.level = "error".to_string();
    }

    if let Some(Commands::Serve {
        host,
        port,
        log_level,
        ..
    }) = &cli.command
    {
        if let Some(host) = host {
            settings.server.host = host.clone();
        }
        if let Some(port) = port {
            settings.server.port = *port;
        }
        if let Some(level) = log_level {
            settings.logger.level = level.as_str().to_string();
        }
    }

    settings
}
