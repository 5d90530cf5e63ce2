//! Gateway translating remote payloads into normalized snapshots.

use crate::integration::{
    domain::{
        AttachmentSnapshot, IntegrationConfig, IssueKey, IssueRef, IssueSnapshot,
        ReducedIssueSnapshot, SearchResultItem, parse_remote_timestamp,
    },
    ports::{
        RemoteAttachment, RemoteFetchError, RemoteFetchResult, RemoteIssue, RemoteIssueClient,
        RemotePickerIssue,
    },
};
use std::sync::Arc;
use tracing::debug;

/// Typed access to remote issues for one resolved configuration at a time.
#[derive(Clone)]
pub struct IssueGateway<C>
where
    C: RemoteIssueClient,
{
    client: Arc<C>,
}

impl<C> IssueGateway<C>
where
    C: RemoteIssueClient,
{
    /// Creates a gateway over a remote API client.
    #[must_use]
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Fetches and normalizes one issue.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteFetchError::IntegrationDisabled`] without contacting
    /// the tracker when the integration is disabled, client errors unchanged,
    /// and [`RemoteFetchError::InvalidPayload`] when the payload cannot be
    /// normalized.
    pub async fn fetch_by_id(
        &self,
        issue_ref: &IssueRef,
        config: &IntegrationConfig,
    ) -> RemoteFetchResult<IssueSnapshot> {
        ensure_enabled(config)?;
        debug!(issue_key = %issue_ref.issue_key(), "fetching remote issue");
        let issue = self.client.fetch_issue(issue_ref.issue_key(), config).await?;
        normalize_issue(issue, config)
    }

    /// Searches for issue suggestions.
    ///
    /// Never fails: a disabled integration or any remote failure yields an
    /// empty list.
    pub async fn search(&self, term: &str, config: &IntegrationConfig) -> Vec<SearchResultItem> {
        if !config.is_enabled() {
            return Vec::new();
        }
        match self.client.search_issues(term, config).await {
            Ok(found) => found
                .into_iter()
                .filter_map(|item| to_search_result(item, config))
                .collect(),
            Err(err) => {
                debug!(
                    project_id = %config.project_id(),
                    error = %err,
                    "issue search degraded to no results"
                );
                Vec::new()
            }
        }
    }

    /// Lists issues the tracker offers for import.
    ///
    /// # Errors
    ///
    /// Returns [`RemoteFetchError::IntegrationDisabled`] when the integration
    /// is disabled, client errors unchanged, and
    /// [`RemoteFetchError::InvalidPayload`] for unusable payloads.
    pub async fn list_new_for_import(
        &self,
        config: &IntegrationConfig,
        existing: &[IssueKey],
    ) -> RemoteFetchResult<Vec<ReducedIssueSnapshot>> {
        ensure_enabled(config)?;
        let candidates = self.client.list_import_candidates(config, existing).await?;
        debug!(
            project_id = %config.project_id(),
            count = candidates.len(),
            "listed import candidates"
        );
        candidates
            .into_iter()
            .map(|issue| normalize_issue(issue, config).map(|snapshot| snapshot.reduced))
            .collect()
    }
}

fn ensure_enabled(config: &IntegrationConfig) -> RemoteFetchResult<()> {
    if config.is_enabled() {
        Ok(())
    } else {
        Err(RemoteFetchError::IntegrationDisabled(config.project_id().clone()))
    }
}

fn normalize_issue(
    issue: RemoteIssue,
    config: &IntegrationConfig,
) -> RemoteFetchResult<IssueSnapshot> {
    let key = IssueKey::new(issue.key)
        .map_err(|err| RemoteFetchError::InvalidPayload(err.to_string()))?;
    let updated_at = parse_remote_timestamp(&issue.fields.updated)
        .map_err(|err| RemoteFetchError::InvalidPayload(err.to_string()))?;
    let story_points = config
        .story_points_field()
        .and_then(|field| issue.fields.custom_number(field));
    let attachments = issue
        .fields
        .attachment
        .map(|list| list.into_iter().map(to_attachment_snapshot).collect());

    Ok(IssueSnapshot {
        reduced: ReducedIssueSnapshot {
            key,
            remote_id: issue.id,
            summary: issue.fields.summary,
            story_points,
            updated_at,
            attachments,
        },
        description: issue.fields.description,
        status: issue.fields.status.map(|status| status.name),
    })
}

fn to_attachment_snapshot(attachment: RemoteAttachment) -> AttachmentSnapshot {
    AttachmentSnapshot {
        remote_id: attachment.id,
        filename: attachment.filename,
        content_url: attachment.content,
        thumbnail_url: attachment.thumbnail,
        mime_type: attachment.mime_type,
    }
}

fn to_search_result(
    item: RemotePickerIssue,
    config: &IntegrationConfig,
) -> Option<SearchResultItem> {
    let issue_key = IssueKey::new(item.key).ok()?;
    Some(SearchResultItem {
        title: format!("{issue_key} {}", item.summary_text),
        issue_ref: IssueRef::new(issue_key, config.project_id().clone()),
        title_highlighted: item.summary,
        icon_url: item.img,
    })
}
