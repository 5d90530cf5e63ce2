//! Issue tracker synchronization for local tasks.
//!
//! This module keeps a locally held task consistent with an issue in an
//! external tracker. It resolves the integration configuration governing a
//! project, fetches or searches remote issues through that configuration,
//! detects whether an issue changed since the last merge, and proposes the
//! field changes to apply. It never writes the task itself. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
