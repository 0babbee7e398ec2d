//! Serve command handler
//!
//! Handles the serve command's dry-run validation; actual server startup
//! happens in main.rs.

use crate::config::Settings;
use crate::error::AppResult;

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates configuration and prints what a real start would use,
    /// without binding anything.
    pub async fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("Configuration valid.");
        println!("  bind address:   {}", self.config.server.address());
        println!("  namespace:      {}", self.config.cluster.namespace);
        println!(
            "  webhook:        {}",
            if self.config.notifications.webhook.is_some() {
                "configured"
            } else {
                "none"
            }
        );
        Ok(())
    }
}
