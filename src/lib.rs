//! Issue sync: keeps local tasks consistent with external issue trackers.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure values and change detection with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the configuration store and the
//!   remote API client
//! - **Adapters**: Concrete implementations of ports (in-memory, JSON file)
//!
//! # Modules
//!
//! - [`integration`]: Configuration resolution, remote issue access and
//!   change detection
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use issue_sync::integration::{
//!     adapters::memory::{InMemoryConfigStore, InMemoryRemoteIssueClient},
//!     services::{ConfigResolver, IssueGateway, IssueSyncService},
//! };
//!
//! let service = IssueSyncService::new(
//!     ConfigResolver::new(Arc::new(InMemoryConfigStore::new())),
//!     IssueGateway::new(Arc::new(InMemoryRemoteIssueClient::new())),
//! );
//! # let _ = service;
//! ```

pub mod integration;
