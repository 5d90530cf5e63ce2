//! In-memory remote API client for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::integration::{
    domain::{IntegrationConfig, IssueKey},
    ports::{
        RemoteFetchError, RemoteFetchResult, RemoteIssue, RemoteIssueClient, RemotePickerIssue,
    },
};

/// Remote client serving canned payloads.
///
/// A failure message set through [`InMemoryRemoteIssueClient::fail_with`]
/// makes every call fail with a transport error until cleared.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemoteIssueClient {
    state: Arc<RwLock<InMemoryRemoteState>>,
    calls: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct InMemoryRemoteState {
    issues: HashMap<String, RemoteIssue>,
    picker: Vec<RemotePickerIssue>,
    import_candidates: Vec<RemoteIssue>,
    failure: Option<String>,
}

fn lock_error(err: impl std::fmt::Display) -> RemoteFetchError {
    RemoteFetchError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryRemoteIssueClient {
    /// Creates a client with no issues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn write_state(
        &self,
        update: impl FnOnce(&mut InMemoryRemoteState),
    ) -> RemoteFetchResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        update(&mut state);
        Ok(())
    }

    /// Stores or replaces an issue, keyed by its issue key.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn insert_issue(&self, issue: RemoteIssue) -> RemoteFetchResult<()> {
        self.write_state(|state| {
            state.issues.insert(issue.key.clone(), issue);
        })
    }

    /// Replaces the issue picker catalogue.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn set_picker_results(&self, results: Vec<RemotePickerIssue>) -> RemoteFetchResult<()> {
        self.write_state(|state| state.picker = results)
    }

    /// Replaces the import candidate list.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn set_import_candidates(&self, candidates: Vec<RemoteIssue>) -> RemoteFetchResult<()> {
        self.write_state(|state| state.import_candidates = candidates)
    }

    /// Makes subsequent calls fail with a transport error.
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn fail_with(&self, message: impl Into<String>) -> RemoteFetchResult<()> {
        let text = message.into();
        self.write_state(|state| state.failure = Some(text))
    }

    /// Clears a failure set with [`Self::fail_with`].
    ///
    /// # Errors
    ///
    /// Returns transport errors when lock acquisition fails.
    pub fn recover(&self) -> RemoteFetchResult<()> {
        self.write_state(|state| state.failure = None)
    }

    /// Returns how many remote calls were attempted.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn read_state<T>(
        &self,
        read: impl FnOnce(&InMemoryRemoteState) -> RemoteFetchResult<T>,
    ) -> RemoteFetchResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.read().map_err(lock_error)?;
        if let Some(message) = &state.failure {
            return Err(RemoteFetchError::transport(std::io::Error::other(
                message.clone(),
            )));
        }
        read(&*state)
    }
}

#[async_trait]
impl RemoteIssueClient for InMemoryRemoteIssueClient {
    async fn fetch_issue(
        &self,
        issue_key: &IssueKey,
        _config: &IntegrationConfig,
    ) -> RemoteFetchResult<RemoteIssue> {
        self.read_state(|state| {
            state
                .issues
                .get(issue_key.as_str())
                .cloned()
                .ok_or_else(|| RemoteFetchError::NotFound(issue_key.clone()))
        })
    }

    async fn search_issues(
        &self,
        term: &str,
        _config: &IntegrationConfig,
    ) -> RemoteFetchResult<Vec<RemotePickerIssue>> {
        let needle = term.trim().to_lowercase();
        self.read_state(|state| {
            Ok(state
                .picker
                .iter()
                .filter(|item| {
                    item.key.to_lowercase().contains(&needle)
                        || item.summary_text.to_lowercase().contains(&needle)
                })
                .cloned()
                .collect())
        })
    }

    async fn list_import_candidates(
        &self,
        _config: &IntegrationConfig,
        existing: &[IssueKey],
    ) -> RemoteFetchResult<Vec<RemoteIssue>> {
        self.read_state(|state| {
            Ok(state
                .import_candidates
                .iter()
                .filter(|issue| !existing.iter().any(|key| key.as_str() == issue.key))
                .cloned()
                .collect())
        })
    }
}
