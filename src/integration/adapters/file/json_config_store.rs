//! Configuration store reading a JSON document through a capability-scoped
//! directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use std::sync::Arc;

use crate::integration::{
    domain::{IntegrationConfig, ProjectId},
    ports::{ConfigStore, ConfigStoreError, ConfigStoreResult},
};

/// Configuration store over a JSON array of integration configs.
///
/// The document is re-read on every lookup. A missing file is treated as an
/// empty store.
#[derive(Debug, Clone)]
pub struct JsonConfigStore {
    dir: Arc<Dir>,
    file_name: Utf8PathBuf,
}

impl JsonConfigStore {
    /// Creates a store reading `file_name` inside `dir`.
    #[must_use]
    pub fn new(dir: Dir, file_name: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir: Arc::new(dir),
            file_name: file_name.into(),
        }
    }

    /// Opens the parent directory of `path` with ambient authority.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigStoreError::Storage`] when the path has no file name
    /// or the directory cannot be opened.
    pub fn open_ambient(path: &Utf8Path) -> ConfigStoreResult<Self> {
        let file_name = path.file_name().ok_or_else(|| {
            ConfigStoreError::storage(std::io::Error::other("path must include a file name"))
        })?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir =
            Dir::open_ambient_dir(parent, ambient_authority()).map_err(ConfigStoreError::storage)?;
        Ok(Self::new(dir, file_name))
    }

    fn load(dir: &Dir, file_name: &Utf8Path) -> ConfigStoreResult<Vec<IntegrationConfig>> {
        let contents = match dir.read_to_string(file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(ConfigStoreError::storage(err)),
        };
        serde_json::from_str(&contents).map_err(|err| ConfigStoreError::Malformed(err.to_string()))
    }
}

#[async_trait]
impl ConfigStore for JsonConfigStore {
    async fn config_for_project(
        &self,
        project_id: &ProjectId,
    ) -> ConfigStoreResult<Option<IntegrationConfig>> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let configs = tokio::task::spawn_blocking(move || Self::load(&dir, &file_name))
            .await
            .map_err(ConfigStoreError::storage)??;
        Ok(configs
            .into_iter()
            .find(|config| config.project_id() == project_id))
    }
}
