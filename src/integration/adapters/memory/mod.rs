//! In-memory adapters for tests and local deterministic flows.

mod config_store;
mod remote_client;

pub use config_store::InMemoryConfigStore;
pub use remote_client::InMemoryRemoteIssueClient;
