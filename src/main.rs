use clap::Parser;

use dispatchd::cli::{self, Cli};
use dispatchd::config::ConfigLoader;
use dispatchd::logger::init_logger;
use dispatchd::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::with_config_file(path.clone()),
        None => ConfigLoader::new()?,
    };
    let settings = cli::apply_cli_overrides(loader.load()?, &cli);

    init_logger(settings.logger.clone())?;

    cli::execute_command(&cli, settings.clone()).await?;

    if cli::should_serve(&cli) {
        Server::new(settings).run().await?;
    }

    Ok(())
}
