//! Command executor for dispatching CLI commands

use crate::config::Settings;
use crate::error::AppResult;

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};

/// Execute a CLI command with the given settings.
///
/// `serve` without `--dry-run` returns Ok to signal that the server should
/// start; actual startup is handled in main.rs so the runtime owns it.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) if *dry_run => {
            ServeCommandHandler::new(settings).validate_only().await
        }
        Some(Commands::Serve { .. }) | None => Ok(()),
        Some(Commands::Migrate { dry_run }) => {
            MigrateCommandHandler::new(settings).execute(*dry_run).await
        }
    }
}

/// Whether this invocation should start the HTTP server after the command
/// dispatch returns.
pub fn should_serve(cli: &Cli) -> bool {
    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => !dry_run,
        None => true,
        Some(Commands::Migrate { .. }) => false,
    }
}
