//! Command-line interface: parsing, validation and command dispatch.

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::apply_cli_overrides;
pub use executor::{execute_command, should_serve};
pub use parser::{Cli, Commands};
