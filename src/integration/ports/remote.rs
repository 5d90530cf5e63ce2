//! Remote API client port and the raw payloads it returns.

use crate::integration::domain::{IntegrationConfig, IssueKey, ProjectId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;

/// Result type for remote fetch operations.
pub type RemoteFetchResult<T> = Result<T, RemoteFetchError>;

/// Client for the remote tracker API.
///
/// Implementations own transport, authentication, retries and timeouts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteIssueClient: Send + Sync {
    /// Fetches one issue by key.
    async fn fetch_issue(
        &self,
        issue_key: &IssueKey,
        config: &IntegrationConfig,
    ) -> RemoteFetchResult<RemoteIssue>;

    /// Runs the tracker's issue picker for a search term.
    async fn search_issues(
        &self,
        term: &str,
        config: &IntegrationConfig,
    ) -> RemoteFetchResult<Vec<RemotePickerIssue>>;

    /// Lists issues eligible for import, excluding `existing` keys.
    async fn list_import_candidates(
        &self,
        config: &IntegrationConfig,
        existing: &[IssueKey],
    ) -> RemoteFetchResult<Vec<RemoteIssue>>;
}

/// Errors surfaced by remote fetches.
#[derive(Debug, Clone, Error)]
pub enum RemoteFetchError {
    /// The project's integration is disabled, so no remote call was made.
    #[error("issue integration for project {0} is disabled")]
    IntegrationDisabled(ProjectId),

    /// The remote tracker has no issue with this key.
    #[error("remote issue {0} not found")]
    NotFound(IssueKey),

    /// The remote payload could not be interpreted.
    #[error("invalid remote payload: {0}")]
    InvalidPayload(String),

    /// Transport-level failure reported by the client.
    #[error("remote transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RemoteFetchError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}

/// Issue as returned by the tracker REST API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteIssue {
    /// Tracker-internal identity.
    pub id: String,
    /// Human-readable key.
    pub key: String,
    /// Issue fields.
    pub fields: RemoteIssueFields,
}

/// Field block of a [`RemoteIssue`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteIssueFields {
    /// Summary line.
    pub summary: String,
    /// Description markup.
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status.
    #[serde(default)]
    pub status: Option<RemoteStatus>,
    /// Last update timestamp as sent by the tracker.
    pub updated: String,
    /// Attachments; older tracker versions omit this field.
    #[serde(default)]
    pub attachment: Option<Vec<RemoteAttachment>>,
    /// Custom fields keyed by field identifier.
    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl RemoteIssueFields {
    /// Reads a numeric custom field.
    #[must_use]
    pub fn custom_number(&self, field: &str) -> Option<f64> {
        self.custom.get(field).and_then(Value::as_f64)
    }
}

/// Workflow status of a [`RemoteIssue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteStatus {
    /// Status name.
    pub name: String,
}

/// Attachment entry of a [`RemoteIssue`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteAttachment {
    /// Attachment identity.
    pub id: String,
    /// File name.
    pub filename: String,
    /// Content download URL.
    pub content: String,
    /// Thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// MIME type.
    #[serde(rename = "mimeType", default)]
    pub mime_type: Option<String>,
}

/// Suggestion entry from the tracker's issue picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemotePickerIssue {
    /// Issue key.
    pub key: String,
    /// Plain-text summary.
    #[serde(rename = "summaryText")]
    pub summary_text: String,
    /// Summary with highlight markup.
    #[serde(default)]
    pub summary: Option<String>,
    /// Issue type icon URL.
    #[serde(default)]
    pub img: Option<String>,
}
