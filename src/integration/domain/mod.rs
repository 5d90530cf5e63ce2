//! Domain model for issue tracker synchronization.
//!
//! Values here are pure: snapshots describe remote issues at one point in
//! time, and change detection and attachment mapping are side-effect-free
//! functions over them.

mod attachment;
mod changes;
mod config;
mod error;
mod ids;
mod issue;

pub use attachment::{AttachmentKind, AttachmentSnapshot, LocalAttachment, map_attachments};
pub use changes::{LocalTaskSyncState, TaskFieldChanges, add_task_data, detect_changes};
pub use config::{Credentials, IntegrationConfig};
pub use error::IntegrationDomainError;
pub use ids::{IssueKey, ProjectId};
pub use issue::{
    IssueRef, IssueSnapshot, ReducedIssueSnapshot, SearchResultItem, parse_remote_timestamp,
};
