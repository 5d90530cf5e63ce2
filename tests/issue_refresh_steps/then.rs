//! Then steps for issue refresh BDD scenarios.

use super::world::{SyncWorld, at_millis};
use issue_sync::integration::{
    domain::TaskFieldChanges, ports::RemoteFetchError, services::IssueSyncError,
};
use rstest_bdd_macros::then;

fn proposed_changes(world: &SyncWorld) -> Result<&TaskFieldChanges, eyre::Report> {
    let result = world
        .last_refresh
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing refresh result in scenario world"))?;
    let refresh = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected refresh failure: {err}"))?;
    refresh
        .as_ref()
        .map(|outcome| &outcome.changes)
        .ok_or_else(|| eyre::eyre!("expected changes, refresh reported none"))
}

#[then(r#"the proposed title is "{title}""#)]
fn proposed_title(world: &SyncWorld, title: String) -> Result<(), eyre::Report> {
    let changes = proposed_changes(world)?;
    if changes.title != title {
        return Err(eyre::eyre!("expected title '{title}', got '{}'", changes.title));
    }
    Ok(())
}

#[then("the proposed attachment count is {count:usize}")]
fn proposed_attachment_count(world: &SyncWorld, count: usize) -> Result<(), eyre::Report> {
    let changes = proposed_changes(world)?;
    if changes.issue_attachment_nr != count {
        return Err(eyre::eyre!(
            "expected {count} attachments, got {}",
            changes.issue_attachment_nr
        ));
    }
    Ok(())
}

#[then("the proposed story points are {points:u32}")]
fn proposed_story_points(world: &SyncWorld, points: u32) -> Result<(), eyre::Report> {
    let changes = proposed_changes(world)?;
    let proposed = changes.issue_points.map(|value| value.to_string());
    if proposed.as_deref() != Some(points.to_string().as_str()) {
        return Err(eyre::eyre!(
            "expected {points} story points, got {:?}",
            changes.issue_points
        ));
    }
    Ok(())
}

#[then("the proposed last update is {updated:i64}")]
fn proposed_last_update(world: &SyncWorld, updated: i64) -> Result<(), eyre::Report> {
    let changes = proposed_changes(world)?;
    if changes.issue_last_updated != at_millis(updated)? {
        return Err(eyre::eyre!(
            "expected last update {updated}, got {}",
            changes.issue_last_updated.timestamp_millis()
        ));
    }
    Ok(())
}

#[then("the task is flagged as updated")]
fn task_flagged_as_updated(world: &SyncWorld) -> Result<(), eyre::Report> {
    if !proposed_changes(world)?.issue_was_updated {
        return Err(eyre::eyre!("expected the update flag to be set"));
    }
    Ok(())
}

#[then("no changes are proposed")]
fn no_changes_proposed(world: &SyncWorld) -> Result<(), eyre::Report> {
    match world.last_refresh.as_ref() {
        Some(Ok(None)) => Ok(()),
        Some(Ok(Some(_))) => Err(eyre::eyre!("expected no changes, got some")),
        Some(Err(err)) => Err(eyre::eyre!("unexpected refresh failure: {err}")),
        None => Err(eyre::eyre!("missing refresh result in scenario world")),
    }
}

#[then("the search returns {count:usize} suggestions")]
fn search_returns(world: &SyncWorld, count: usize) -> Result<(), eyre::Report> {
    let results = world
        .last_search
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing search result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected search failure: {err}"))?;
    if results.len() != count {
        return Err(eyre::eyre!("expected {count} suggestions, got {}", results.len()));
    }
    Ok(())
}

#[then("the fetch fails because the integration is disabled")]
fn fetch_fails_disabled(world: &SyncWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing fetch result in scenario world"))?;
    if !matches!(
        result,
        Err(IssueSyncError::RemoteFetch(
            RemoteFetchError::IntegrationDisabled(_)
        ))
    ) {
        return Err(eyre::eyre!("expected disabled integration error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the link is "{expected}""#)]
fn link_is(world: &SyncWorld, expected: String) -> Result<(), eyre::Report> {
    let link = world
        .last_link
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing link result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected link failure: {err}"))?;
    if *link != expected {
        return Err(eyre::eyre!("expected link '{expected}', got '{link}'"));
    }
    Ok(())
}
