//! Application services for issue synchronization.

mod config_resolver;
mod gateway;
mod sync;

pub use config_resolver::{ConfigResolutionError, ConfigResolutionResult, ConfigResolver};
pub use gateway::IssueGateway;
pub use sync::{IssueSyncError, IssueSyncResult, IssueSyncService, TaskRefresh};
