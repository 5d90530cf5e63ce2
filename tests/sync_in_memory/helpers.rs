//! Shared helpers for in-memory issue synchronization tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use issue_sync::integration::{
    adapters::memory::{InMemoryConfigStore, InMemoryRemoteIssueClient},
    domain::{Credentials, IntegrationConfig, ProjectId},
    ports::RemoteIssue,
    services::{ConfigResolver, IssueGateway, IssueSyncService},
};
use rstest::fixture;
use serde_json::json;

/// Service type wired to in-memory adapters.
pub type InMemorySyncService = IssueSyncService<InMemoryConfigStore, InMemoryRemoteIssueClient>;

/// Adapters and the service built over them.
pub struct SyncContext {
    pub store: Arc<InMemoryConfigStore>,
    pub client: Arc<InMemoryRemoteIssueClient>,
    pub service: InMemorySyncService,
}

/// Provides a service with an enabled integration for project `P1`.
#[fixture]
pub fn context() -> SyncContext {
    let store = Arc::new(InMemoryConfigStore::new());
    store
        .put(enabled_config("P1"))
        .expect("seed config for P1");
    let client = Arc::new(InMemoryRemoteIssueClient::new());
    let service = IssueSyncService::new(
        ConfigResolver::new(Arc::clone(&store)),
        IssueGateway::new(Arc::clone(&client)),
    );
    SyncContext {
        store,
        client,
        service,
    }
}

/// Builds an enabled configuration with a story points field.
pub fn enabled_config(project_id: &str) -> IntegrationConfig {
    IntegrationConfig::new(
        ProjectId::new(project_id).expect("valid project id"),
        "https://tracker.test/",
        Credentials::new("alice", "token"),
    )
    .expect("valid config")
    .with_story_points_field("customfield_10004")
}

/// Converts epoch milliseconds into an instant.
pub fn at_millis(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .expect("valid test timestamp")
}

/// Formats epoch milliseconds the way the tracker REST API does.
pub fn tracker_timestamp(millis: i64) -> String {
    at_millis(millis)
        .format("%Y-%m-%dT%H:%M:%S%.3f%z")
        .to_string()
}

/// Builds a remote issue payload from its JSON wire shape.
pub fn remote_issue(
    key: &str,
    summary: &str,
    updated_millis: i64,
    points: f64,
    attachment_names: &[&str],
) -> RemoteIssue {
    let attachments: Vec<_> = attachment_names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            json!({
                "id": format!("{}", 100 + index),
                "filename": name,
                "content": format!("https://tracker.test/secure/attachment/{name}"),
                "mimeType": "text/plain"
            })
        })
        .collect();
    serde_json::from_value(json!({
        "id": "10001",
        "key": key,
        "fields": {
            "summary": summary,
            "updated": tracker_timestamp(updated_millis),
            "status": { "name": "In Progress" },
            "attachment": attachments,
            "customfield_10004": points
        }
    }))
    .expect("valid remote issue payload")
}
