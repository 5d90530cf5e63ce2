//! Port contracts for issue tracker synchronization.
//!
//! Ports define the collaborators the sync core depends on: the
//! configuration store and the remote API client.

mod config_store;
mod remote;

#[cfg(test)]
pub use config_store::MockConfigStore;
pub use config_store::{ConfigStore, ConfigStoreError, ConfigStoreResult};
#[cfg(test)]
pub use remote::MockRemoteIssueClient;
pub use remote::{
    RemoteAttachment, RemoteFetchError, RemoteFetchResult, RemoteIssue, RemoteIssueClient,
    RemoteIssueFields, RemotePickerIssue, RemoteStatus,
};
