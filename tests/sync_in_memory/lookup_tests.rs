//! Search, link, import listing and configuration lifecycle flows.

use super::helpers::{SyncContext, context, enabled_config, remote_issue};
use issue_sync::integration::{
    domain::{IssueKey, ProjectId},
    ports::{RemoteFetchError, RemotePickerIssue},
    services::IssueSyncError,
};
use rstest::rstest;

fn picker(key: &str, summary: &str) -> RemotePickerIssue {
    RemotePickerIssue {
        key: key.to_owned(),
        summary_text: summary.to_owned(),
        summary: None,
        img: None,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_returns_matching_suggestions(context: SyncContext) {
    context
        .client
        .set_picker_results(vec![picker("KEY-1", "Fix login bug"), picker("KEY-2", "Docs")])
        .expect("seed picker");

    let results = context
        .service
        .search("login", "P1")
        .await
        .expect("search should succeed");

    let titles: Vec<&str> = results.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["KEY-1 Fix login bug"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_for_unconfigured_project_returns_no_suggestions(context: SyncContext) {
    context
        .client
        .set_picker_results(vec![picker("KEY-1", "Fix login bug")])
        .expect("seed picker");

    let results = context
        .service
        .search("login", "P-unconfigured")
        .await
        .expect("search should degrade to no suggestions");

    assert!(results.is_empty());
    assert_eq!(context.client.call_count(), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabling_the_integration_degrades_search_and_blocks_fetch(context: SyncContext) {
    context
        .client
        .insert_issue(remote_issue("KEY-1", "Fix bug", 2000, 1.0, &[]))
        .expect("seed issue");
    context
        .store
        .put(enabled_config("P1").with_enabled(false))
        .expect("disable integration");

    let results = context
        .service
        .search("x", "P1")
        .await
        .expect("search should succeed");
    let fetched = context.service.get_by_id("KEY-1", "P1").await;

    assert!(results.is_empty());
    assert!(matches!(
        fetched,
        Err(IssueSyncError::RemoteFetch(
            RemoteFetchError::IntegrationDisabled(_)
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_by_id_reports_missing_remote_issue(context: SyncContext) {
    let result = context.service.get_by_id("KEY-404", "P1").await;

    assert!(matches!(
        result,
        Err(IssueSyncError::RemoteFetch(RemoteFetchError::NotFound(key))) if key.as_str() == "KEY-404"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn issue_link_trims_host_separator(context: SyncContext) {
    let link = context
        .service
        .issue_link("KEY-1", "P1")
        .await
        .expect("link should resolve");

    assert_eq!(link, "https://tracker.test/browse/KEY-1");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_listing_excludes_existing_issues(context: SyncContext) {
    context
        .client
        .set_import_candidates(vec![
            remote_issue("KEY-1", "Already tracked", 1000, 1.0, &[]),
            remote_issue("KEY-2", "New work", 2000, 2.0, &["spec.txt"]),
        ])
        .expect("seed import candidates");
    let existing = vec![IssueKey::new("KEY-1").expect("valid issue key")];

    let listed = context
        .service
        .list_new_issues_for_import("P1", &existing)
        .await
        .expect("listing should succeed");

    let keys: Vec<&str> = listed.iter().map(|issue| issue.key.as_str()).collect();
    assert_eq!(keys, vec!["KEY-2"]);
    let data: Vec<_> = listed
        .iter()
        .map(|issue| context.service.add_task_data(issue))
        .collect();
    assert_eq!(
        data.first().map(|fields| fields.title.as_str()),
        Some("KEY-2 New work")
    );
    assert_eq!(data.first().map(|fields| fields.issue_attachment_nr), Some(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn import_listing_propagates_remote_failure(context: SyncContext) {
    context.client.fail_with("503").expect("set failure");

    let result = context.service.list_new_issues_for_import("P1", &[]).await;

    assert!(matches!(
        result,
        Err(IssueSyncError::RemoteFetch(RemoteFetchError::Transport(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removed_configuration_is_not_found_on_next_call(context: SyncContext) {
    let project = ProjectId::new("P1").expect("valid project id");
    let mut updates = context.store.subscribe(&project).expect("subscribe");

    context.store.remove(&project).expect("remove config");

    updates.changed().await.expect("store publishes removal");
    assert!(updates.borrow().is_none());
    let result = context.service.issue_link("KEY-1", "P1").await;
    assert!(matches!(result, Err(IssueSyncError::ConfigNotFound(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscription_for_unknown_project_is_released_on_remove(context: SyncContext) {
    let project = ProjectId::new("P-watched").expect("valid project id");
    let updates = context.store.subscribe(&project).expect("subscribe");
    assert_eq!(context.store.tracked_projects().expect("count"), 2);

    drop(updates);
    context.store.remove(&project).expect("remove config");

    assert_eq!(context.store.tracked_projects().expect("count"), 1);
    let results = context
        .service
        .search("login", "P-watched")
        .await
        .expect("search degrades");
    assert!(results.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn subscription_receives_configuration_stored_later(context: SyncContext) {
    let project = ProjectId::new("P2").expect("valid project id");
    let mut updates = context.store.subscribe(&project).expect("subscribe");

    context.store.put(enabled_config("P2")).expect("store config");

    updates.changed().await.expect("store publishes config");
    assert!(updates.borrow().as_ref().is_some_and(|config| config.is_enabled()));
}
