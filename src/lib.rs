//! Dispatchd Library
//!
//! Core library modules for the dispatchd job orchestration server.

use shadow_rs::shadow;
shadow!(build);

pub mod api;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod models;
pub mod registry;
pub mod repositories;
pub mod schema;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod testkit;

pub use state::AppState;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
