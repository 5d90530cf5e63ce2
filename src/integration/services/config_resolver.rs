//! Resolution of the integration configuration governing a project.

use crate::integration::{
    domain::{IntegrationConfig, ProjectId},
    ports::{ConfigStore, ConfigStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while resolving a project's configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigResolutionError {
    /// No integration is configured for the project.
    #[error("no issue integration configured for project {0}")]
    ConfigNotFound(ProjectId),
    /// The configuration store failed.
    #[error(transparent)]
    Store(#[from] ConfigStoreError),
}

/// Result type for configuration resolution.
pub type ConfigResolutionResult<T> = Result<T, ConfigResolutionError>;

/// Resolves exactly one configuration per call, with no retained state.
#[derive(Clone)]
pub struct ConfigResolver<S>
where
    S: ConfigStore,
{
    store: Arc<S>,
}

impl<S> ConfigResolver<S>
where
    S: ConfigStore,
{
    /// Creates a resolver over a configuration store.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Resolves the configuration currently held for `project_id`.
    ///
    /// Disabled configurations are returned as-is; callers decide how to
    /// degrade.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigResolutionError::ConfigNotFound`] when the project has
    /// no configuration, or [`ConfigResolutionError::Store`] when the store
    /// fails.
    pub async fn resolve(
        &self,
        project_id: &ProjectId,
    ) -> ConfigResolutionResult<IntegrationConfig> {
        let config = self
            .store
            .config_for_project(project_id)
            .await?
            .ok_or_else(|| ConfigResolutionError::ConfigNotFound(project_id.clone()))?;
        debug!(
            project_id = %project_id,
            is_enabled = config.is_enabled(),
            "resolved issue integration config"
        );
        Ok(config)
    }
}
