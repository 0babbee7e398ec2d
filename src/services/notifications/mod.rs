//! Execution event observers.
//!
//! Observers are a fire-and-forget side channel for execution lifecycle
//! events (chat notifications, webhooks). They run on detached tasks and
//! their failures are logged, never propagated into the primary response.

mod provider;
mod webhook;

pub use provider::{ExecutionEvent, ExecutionObserver};
pub use webhook::WebhookObserver;
