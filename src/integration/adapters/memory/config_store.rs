//! In-memory configuration store backed by watch channels.

use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};
use tokio::sync::watch;

use crate::integration::{
    domain::{IntegrationConfig, ProjectId},
    ports::{ConfigStore, ConfigStoreError, ConfigStoreResult},
};

type ConfigSender = watch::Sender<Option<IntegrationConfig>>;

/// Thread-safe in-memory configuration store.
///
/// Each project has its own watch channel. [`ConfigStore::config_for_project`]
/// reads the current value once; [`InMemoryConfigStore::subscribe`] offers
/// live updates to callers that need them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    channels: Arc<RwLock<HashMap<ProjectId, ConfigSender>>>,
}

fn lock_error(err: impl std::fmt::Display) -> ConfigStoreError {
    ConfigStoreError::storage(std::io::Error::other(err.to_string()))
}

impl InMemoryConfigStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or replaces the configuration of its project.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn put(&self, config: IntegrationConfig) -> ConfigStoreResult<()> {
        let mut channels = self.channels.write().map_err(lock_error)?;
        match channels.entry(config.project_id().clone()) {
            Entry::Occupied(entry) => {
                entry.get().send_replace(Some(config));
            }
            Entry::Vacant(entry) => {
                entry.insert(watch::channel(Some(config)).0);
            }
        }
        Ok(())
    }

    /// Removes a project's configuration.
    ///
    /// Live subscribers observe `None`. A channel nobody listens to any more
    /// is dropped from the store.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn remove(&self, project_id: &ProjectId) -> ConfigStoreResult<()> {
        let mut channels = self.channels.write().map_err(lock_error)?;
        if let Entry::Occupied(entry) = channels.entry(project_id.clone()) {
            if entry.get().receiver_count() == 0 {
                entry.remove();
            } else {
                entry.get().send_replace(None);
            }
        }
        Ok(())
    }

    /// Subscribes to configuration changes for a project.
    ///
    /// Subscribing registers the project's channel even when no
    /// configuration has been stored yet, so a later [`Self::put`] reaches
    /// the receiver. The channel is kept until [`Self::remove`] runs with no
    /// receivers left.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn subscribe(
        &self,
        project_id: &ProjectId,
    ) -> ConfigStoreResult<watch::Receiver<Option<IntegrationConfig>>> {
        let mut channels = self.channels.write().map_err(lock_error)?;
        let sender = channels
            .entry(project_id.clone())
            .or_insert_with(|| watch::channel(None).0);
        Ok(sender.subscribe())
    }

    /// Returns the number of projects holding a channel.
    ///
    /// # Errors
    ///
    /// Returns storage errors when lock acquisition fails.
    pub fn tracked_projects(&self) -> ConfigStoreResult<usize> {
        let channels = self.channels.read().map_err(lock_error)?;
        Ok(channels.len())
    }
}

#[async_trait]
impl ConfigStore for InMemoryConfigStore {
    async fn config_for_project(
        &self,
        project_id: &ProjectId,
    ) -> ConfigStoreResult<Option<IntegrationConfig>> {
        let channels = self.channels.read().map_err(lock_error)?;
        Ok(channels
            .get(project_id)
            .and_then(|sender| sender.borrow().clone()))
    }
}
