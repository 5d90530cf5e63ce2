//! Configuration store port for per-project integration settings.

use crate::integration::domain::{IntegrationConfig, ProjectId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for configuration store operations.
pub type ConfigStoreResult<T> = Result<T, ConfigStoreError>;

/// Source of integration configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Returns the configuration currently held for a project.
    ///
    /// Returns `None` when the project has no integration configured. Each
    /// call reads the store afresh.
    async fn config_for_project(
        &self,
        project_id: &ProjectId,
    ) -> ConfigStoreResult<Option<IntegrationConfig>>;
}

/// Errors returned by configuration store implementations.
#[derive(Debug, Clone, Error)]
pub enum ConfigStoreError {
    /// The stored configuration document is malformed.
    #[error("malformed integration configuration: {0}")]
    Malformed(String),

    /// The backing storage failed.
    #[error("configuration storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl ConfigStoreError {
    /// Wraps a storage-layer error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}
