//! Issue references and normalized remote issue snapshots.

use super::{AttachmentSnapshot, IntegrationDomainError, IssueKey, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used by the tracker REST API (`2024-03-01T10:15:30.000+0000`).
const REMOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Parses a remote `updated` value into a comparable instant.
///
/// Accepts RFC 3339 and the tracker's colon-less offset layout.
///
/// # Errors
///
/// Returns [`IntegrationDomainError::InvalidTimestamp`] when neither layout
/// matches.
pub fn parse_remote_timestamp(value: &str) -> Result<DateTime<Utc>, IntegrationDomainError> {
    let trimmed = value.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .or_else(|_| DateTime::parse_from_str(trimmed, REMOTE_TIMESTAMP_FORMAT))
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| IntegrationDomainError::InvalidTimestamp(value.to_owned()))
}

/// Key-based reference to a remote issue within a local project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    issue_key: IssueKey,
    project_id: ProjectId,
}

impl IssueRef {
    /// Creates an issue reference from validated components.
    #[must_use]
    pub const fn new(issue_key: IssueKey, project_id: ProjectId) -> Self {
        Self {
            issue_key,
            project_id,
        }
    }

    /// Creates an issue reference from raw values.
    ///
    /// # Errors
    ///
    /// Returns an [`IntegrationDomainError`] when either component is empty.
    pub fn from_parts(issue_key: &str, project_id: &str) -> Result<Self, IntegrationDomainError> {
        Ok(Self::new(IssueKey::new(issue_key)?, ProjectId::new(project_id)?))
    }

    /// Returns the issue key.
    #[must_use]
    pub const fn issue_key(&self) -> &IssueKey {
        &self.issue_key
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.project_id, self.issue_key)
    }
}

/// Reduced issue snapshot used for listing and import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedIssueSnapshot {
    /// Human-readable issue key.
    pub key: IssueKey,
    /// Tracker-internal identity; kept only for diagnostics.
    pub remote_id: String,
    /// Issue summary line.
    pub summary: String,
    /// Story points, when the integration maps a points field.
    pub story_points: Option<f64>,
    /// Last remote modification instant.
    pub updated_at: DateTime<Utc>,
    /// Attachments in remote order; `None` when the payload omitted them.
    pub attachments: Option<Vec<AttachmentSnapshot>>,
}

impl ReducedIssueSnapshot {
    /// Returns attachments in remote order, empty when absent.
    #[must_use]
    pub fn attachments(&self) -> &[AttachmentSnapshot] {
        self.attachments.as_deref().unwrap_or_default()
    }

    /// Returns the local task title, `"<key> <summary>"`.
    #[must_use]
    pub fn task_title(&self) -> String {
        format!("{} {}", self.key, self.summary)
    }
}

/// Full issue snapshot used for synchronization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSnapshot {
    /// Fields shared with the reduced form.
    pub reduced: ReducedIssueSnapshot,
    /// Raw issue description markup; rendering belongs to the caller.
    pub description: Option<String>,
    /// Workflow status name.
    pub status: Option<String>,
}

impl IssueSnapshot {
    /// Returns the issue key.
    #[must_use]
    pub const fn key(&self) -> &IssueKey {
        &self.reduced.key
    }

    /// Returns the reduced view of this snapshot.
    #[must_use]
    pub const fn reduced(&self) -> &ReducedIssueSnapshot {
        &self.reduced
    }

    /// Returns attachments in remote order, empty when absent.
    #[must_use]
    pub fn attachments(&self) -> &[AttachmentSnapshot] {
        self.reduced.attachments()
    }
}

/// Issue suggestion returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Reference to the suggested issue.
    pub issue_ref: IssueRef,
    /// Plain display title, `"<key> <summary>"`.
    pub title: String,
    /// Summary with match highlighting markup, if the tracker supplied one.
    pub title_highlighted: Option<String>,
    /// Issue type icon URL, if the tracker supplied one.
    pub icon_url: Option<String>,
}
