//! Façade composing configuration resolution, remote access and change
//! detection.

use super::{ConfigResolutionError, ConfigResolver, IssueGateway};
use crate::integration::{
    domain::{
        IntegrationConfig, IntegrationDomainError, IssueKey, IssueRef, IssueSnapshot,
        LocalAttachment, LocalTaskSyncState, ProjectId, ReducedIssueSnapshot, SearchResultItem,
        TaskFieldChanges, add_task_data, detect_changes, map_attachments,
    },
    ports::{ConfigStore, ConfigStoreError, RemoteFetchError, RemoteIssueClient},
};
use thiserror::Error;
use tracing::debug;

/// Service-level errors for issue synchronization.
#[derive(Debug, Error)]
pub enum IssueSyncError {
    /// No integration is configured for the project.
    #[error("no issue integration configured for project {0}")]
    ConfigNotFound(ProjectId),
    /// The configuration store failed.
    #[error(transparent)]
    ConfigStore(ConfigStoreError),
    /// A required identifier was missing or empty.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] IntegrationDomainError),
    /// The remote fetch failed.
    #[error(transparent)]
    RemoteFetch(#[from] RemoteFetchError),
}

impl From<ConfigResolutionError> for IssueSyncError {
    fn from(err: ConfigResolutionError) -> Self {
        match err {
            ConfigResolutionError::ConfigNotFound(project_id) => Self::ConfigNotFound(project_id),
            ConfigResolutionError::Store(store_err) => Self::ConfigStore(store_err),
        }
    }
}

/// Result type for issue synchronization operations.
pub type IssueSyncResult<T> = Result<T, IssueSyncError>;

/// Outcome of refreshing a task whose remote issue changed.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskRefresh {
    /// Changes the caller should merge into the task.
    pub changes: TaskFieldChanges,
    /// Snapshot the changes were computed from.
    pub snapshot: IssueSnapshot,
    /// Title for notifying the user; the remote issue key.
    pub display_title: String,
}

/// Entry point for callers synchronizing local tasks with remote issues.
///
/// Every operation resolves the project's configuration afresh, performs at
/// most one remote call, and computes its result without writing state.
/// Persisting returned changes is the caller's job.
#[derive(Clone)]
pub struct IssueSyncService<S, C>
where
    S: ConfigStore,
    C: RemoteIssueClient,
{
    resolver: ConfigResolver<S>,
    gateway: IssueGateway<C>,
}

impl<S, C> IssueSyncService<S, C>
where
    S: ConfigStore,
    C: RemoteIssueClient,
{
    /// Creates a new synchronization service.
    #[must_use]
    pub const fn new(resolver: ConfigResolver<S>, gateway: IssueGateway<C>) -> Self {
        Self { resolver, gateway }
    }

    async fn resolve(&self, project_id: &ProjectId) -> IssueSyncResult<IntegrationConfig> {
        Ok(self.resolver.resolve(project_id).await?)
    }

    /// Fetches the current snapshot of an issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSyncError::InvalidArgument`] for empty identifiers,
    /// [`IssueSyncError::ConfigNotFound`] when the project has no
    /// integration, and [`IssueSyncError::RemoteFetch`] when the fetch fails
    /// or the integration is disabled.
    pub async fn get_by_id(
        &self,
        issue_key: &str,
        project_id: &str,
    ) -> IssueSyncResult<IssueSnapshot> {
        let issue_ref = IssueRef::from_parts(issue_key, project_id)?;
        let config = self.resolve(issue_ref.project_id()).await?;
        Ok(self.gateway.fetch_by_id(&issue_ref, &config).await?)
    }

    /// Searches the project's tracker for issue suggestions.
    ///
    /// Remote failures, disabled integrations and projects without an
    /// integration yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSyncError::InvalidArgument`] for an empty project
    /// identifier and [`IssueSyncError::ConfigStore`] when the configuration
    /// store fails.
    pub async fn search(
        &self,
        term: &str,
        project_id: &str,
    ) -> IssueSyncResult<Vec<SearchResultItem>> {
        let project = ProjectId::new(project_id)?;
        let config = match self.resolver.resolve(&project).await {
            Ok(config) => config,
            Err(ConfigResolutionError::ConfigNotFound(_)) => {
                debug!(project_id = %project, "issue search skipped, no integration configured");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(self.gateway.search(term, &config).await)
    }

    /// Checks a linked task against its remote issue.
    ///
    /// Returns `Ok(None)` when the remote issue is not newer than the task's
    /// last merge.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSyncError::InvalidArgument`] when the task lacks a
    /// project or issue identifier, configuration resolution errors, and
    /// remote fetch errors.
    pub async fn refresh_task(
        &self,
        task: &LocalTaskSyncState,
    ) -> IssueSyncResult<Option<TaskRefresh>> {
        let project_id = ProjectId::new(task.project_id.as_deref().unwrap_or_default())?;
        let issue_key = IssueKey::new(task.issue_id.as_deref().unwrap_or_default())?;
        let issue_ref = IssueRef::new(issue_key, project_id);

        let config = self.resolve(issue_ref.project_id()).await?;
        let snapshot = self.gateway.fetch_by_id(&issue_ref, &config).await?;

        let Some(changes) = detect_changes(task.issue_last_updated, snapshot.reduced()) else {
            debug!(issue_key = %issue_ref.issue_key(), "remote issue unchanged");
            return Ok(None);
        };
        debug!(issue_key = %issue_ref.issue_key(), "remote issue updated");
        let display_title = snapshot.key().to_string();
        Ok(Some(TaskRefresh {
            changes,
            snapshot,
            display_title,
        }))
    }

    /// Builds the browser link for an issue.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSyncError::InvalidArgument`] when either identifier is
    /// empty, and configuration resolution errors.
    pub async fn issue_link(&self, issue_key: &str, project_id: &str) -> IssueSyncResult<String> {
        let issue_ref = IssueRef::from_parts(issue_key, project_id)?;
        let config = self.resolve(issue_ref.project_id()).await?;
        Ok(config.browse_url(issue_ref.issue_key()))
    }

    /// Lists remote issues available for import into the project.
    ///
    /// Exclusion of `existing` keys is delegated to the remote client.
    ///
    /// # Errors
    ///
    /// Returns [`IssueSyncError::InvalidArgument`] for an empty project
    /// identifier, configuration resolution errors, and remote fetch errors.
    pub async fn list_new_issues_for_import(
        &self,
        project_id: &str,
        existing: &[IssueKey],
    ) -> IssueSyncResult<Vec<ReducedIssueSnapshot>> {
        let project = ProjectId::new(project_id)?;
        let config = self.resolve(&project).await?;
        Ok(self.gateway.list_new_for_import(&config, existing).await?)
    }

    /// Maps a snapshot's attachments into local attachments.
    #[expect(
        clippy::unused_self,
        reason = "Exposed on the service so callers depend on one entry point"
    )]
    #[must_use]
    pub fn map_attachments(&self, snapshot: Option<&IssueSnapshot>) -> Vec<LocalAttachment> {
        map_attachments(snapshot)
    }

    /// Returns the fields for a new task created from a snapshot.
    #[expect(
        clippy::unused_self,
        reason = "Exposed on the service so callers depend on one entry point"
    )]
    #[must_use]
    pub fn add_task_data(&self, snapshot: &ReducedIssueSnapshot) -> TaskFieldChanges {
        add_task_data(snapshot)
    }
}
