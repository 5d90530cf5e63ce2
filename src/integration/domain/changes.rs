//! Change detection between a local task and a remote issue snapshot.

use super::ReducedIssueSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synchronization-relevant subset of a local task.
///
/// The task store owns and persists this state; the sync core only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTaskSyncState {
    /// Owning project, if the task belongs to one.
    pub project_id: Option<String>,
    /// Remote issue key the task is linked to.
    pub issue_id: Option<String>,
    /// Remote update instant recorded at the last merge.
    pub issue_last_updated: Option<DateTime<Utc>>,
    /// Whether the task carries unseen remote updates.
    pub issue_was_updated: bool,
}

impl LocalTaskSyncState {
    /// Creates state for a task linked to an issue that was never synced.
    #[must_use]
    pub fn linked(project_id: impl Into<String>, issue_id: impl Into<String>) -> Self {
        Self {
            project_id: Some(project_id.into()),
            issue_id: Some(issue_id.into()),
            issue_last_updated: None,
            issue_was_updated: false,
        }
    }

    /// Sets the last merged remote update instant.
    #[must_use]
    pub const fn with_last_updated(mut self, last_updated: DateTime<Utc>) -> Self {
        self.issue_last_updated = Some(last_updated);
        self
    }
}

/// Field changes to merge into a local task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskFieldChanges {
    /// New task title, `"<key> <summary>"`.
    pub title: String,
    /// Story points from the snapshot.
    pub issue_points: Option<f64>,
    /// Number of attachments in the snapshot.
    pub issue_attachment_nr: usize,
    /// Whether the task should be flagged as remotely updated.
    pub issue_was_updated: bool,
    /// Remote update instant of the merged snapshot.
    pub issue_last_updated: DateTime<Utc>,
}

/// Returns the fields for a task created from `snapshot`.
#[must_use]
pub fn add_task_data(snapshot: &ReducedIssueSnapshot) -> TaskFieldChanges {
    TaskFieldChanges {
        title: snapshot.task_title(),
        issue_points: snapshot.story_points,
        issue_attachment_nr: snapshot.attachments().len(),
        issue_was_updated: false,
        issue_last_updated: snapshot.updated_at,
    }
}

/// Computes the changes for a task whose last merge saw `last_known_updated_at`.
///
/// Returns `None` unless the snapshot is strictly newer. A task that was
/// never synced treats every snapshot as newer.
#[must_use]
pub fn detect_changes(
    last_known_updated_at: Option<DateTime<Utc>>,
    snapshot: &ReducedIssueSnapshot,
) -> Option<TaskFieldChanges> {
    let is_newer = last_known_updated_at.is_none_or(|known| snapshot.updated_at > known);
    is_newer.then(|| TaskFieldChanges {
        issue_was_updated: true,
        ..add_task_data(snapshot)
    })
}
