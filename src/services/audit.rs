//! Execution audit recording.
//!
//! Every execution attempt leaves one append-only row, including attempts
//! that failed before the cluster assigned an execution name. Writes are
//! detached from the request path: an audit failure is logged and recovered,
//! never surfaced to the caller.

use std::sync::Arc;

use crate::models::{ExecutionStatus, NewExecutionAuditLog};
use crate::repositories::AuditStore;

#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn AuditStore>,
}

impl AuditService {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Records one audit entry on a detached task.
    pub fn record(&self, entry: NewExecutionAuditLog) {
        let store = self.store.clone();
        tokio::spawn(async move {
            let job_name = entry.job_name.clone();
            if let Err(error) = store.insert(entry).await {
                tracing::error!(job_name = %job_name, error = ?error, "audit write failed");
            }
        });
    }

    /// Back-fills the resolved outcome onto the submission's audit row, on a
    /// detached task.
    pub fn record_outcome(&self, execution_name: String, status: ExecutionStatus) {
        let store = self.store.clone();
        tokio::spawn(async move {
            if let Err(error) = store.update_execution_status(&execution_name, status).await {
                tracing::error!(
                    execution_name = %execution_name,
                    error = ?error,
                    "audit outcome write failed"
                );
            }
        });
    }
}
