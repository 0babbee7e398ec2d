//! Service layer: the job lifecycle orchestration logic.
//!
//! Services coordinate the schedule store, the metadata/secrets registries
//! and the cluster client behind trait seams, so every collaborator can be
//! substituted in tests.

mod audit;
mod executioner;
mod log_streamer;
pub mod notifications;
mod scheduler;

use std::sync::Arc;

pub use audit::AuditService;
pub use executioner::{ExecutionReceipt, ExecutionRequest, ExecutionerService, resolve_status};
pub use log_streamer::LogStreamerService;
pub use scheduler::{ScheduleRequest, SchedulerService};

use crate::cluster::ClusterClient;
use crate::registry::{MetadataRegistry, SecretsRegistry};
use crate::repositories::{AuditStore, ScheduleStore};
use notifications::ExecutionObserver;

/// Process-wide collaborators, constructed once at startup and shared by
/// every request. All handles are safe for concurrent use.
pub struct Dependencies {
    pub schedule_store: Arc<dyn ScheduleStore>,
    pub audit_store: Arc<dyn AuditStore>,
    pub metadata_registry: Arc<dyn MetadataRegistry>,
    pub secrets_registry: Arc<dyn SecretsRegistry>,
    pub cluster: Arc<dyn ClusterClient>,
    pub observers: Vec<Arc<dyn ExecutionObserver>>,
}

/// Aggregates all services for convenient access from handlers.
///
/// Cloning is cheap; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub scheduler: SchedulerService,
    pub executioner: ExecutionerService,
    pub logs: LogStreamerService,
}

impl Services {
    pub fn new(deps: Dependencies) -> Self {
        let audit = AuditService::new(deps.audit_store);
        Self {
            scheduler: SchedulerService::new(deps.schedule_store, deps.metadata_registry.clone()),
            executioner: ExecutionerService::new(
                deps.metadata_registry,
                deps.secrets_registry,
                deps.cluster.clone(),
                audit,
                deps.observers,
            ),
            logs: LogStreamerService::new(deps.cluster),
        }
    }
}
