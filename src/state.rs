//! Application state for the Axum server.

use crate::services::{Dependencies, Services};

/// Shared state handed to every request handler.
///
/// Cloning is cheap; all services hold their collaborators behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
}

impl AppState {
    pub fn new(deps: Dependencies) -> Self {
        Self {
            services: Services::new(deps),
        }
    }
}
