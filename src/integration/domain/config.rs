//! Per-project issue tracker integration configuration.

use super::{IntegrationDomainError, IssueKey, ProjectId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque credentials handed to the remote API client.
///
/// The core never inspects these values. `Debug` output redacts the secret.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    secret: Option<String>,
}

impl Credentials {
    /// Creates credentials from a user name and secret.
    #[must_use]
    pub fn new(user_name: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
            secret: Some(secret.into()),
        }
    }

    /// Returns the user name, if any.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Returns the secret, if any.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_name", &self.user_name)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Integration settings governing one local project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IntegrationConfigDocument", rename_all = "camelCase")]
pub struct IntegrationConfig {
    project_id: ProjectId,
    is_enabled: bool,
    host: String,
    credentials: Credentials,
    #[serde(skip_serializing_if = "Option::is_none")]
    story_points_field: Option<String>,
}

impl IntegrationConfig {
    /// Creates an enabled configuration for a project.
    ///
    /// Trailing slashes are removed from `host` so issue links never contain
    /// a doubled separator.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationDomainError::EmptyHost`] when the host is empty.
    pub fn new(
        project_id: ProjectId,
        host: impl Into<String>,
        credentials: Credentials,
    ) -> Result<Self, IntegrationDomainError> {
        let raw_host = host.into();
        let normalized = raw_host.trim().trim_end_matches('/');
        if normalized.is_empty() {
            return Err(IntegrationDomainError::EmptyHost);
        }
        Ok(Self {
            project_id,
            is_enabled: true,
            host: normalized.to_owned(),
            credentials,
            story_points_field: None,
        })
    }

    /// Sets whether the integration is active.
    #[must_use]
    pub const fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }

    /// Sets the remote custom field that carries story points.
    #[must_use]
    pub fn with_story_points_field(mut self, field: impl Into<String>) -> Self {
        let value = field.into();
        let normalized = value.trim();
        self.story_points_field = (!normalized.is_empty()).then(|| normalized.to_owned());
        self
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Returns whether the integration is active.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    /// Returns the tracker base URL without a trailing slash.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the credentials for the remote API client.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the story points custom field name, if configured.
    #[must_use]
    pub fn story_points_field(&self) -> Option<&str> {
        self.story_points_field.as_deref()
    }

    /// Builds the browser URL for an issue.
    #[must_use]
    pub fn browse_url(&self, issue_key: &IssueKey) -> String {
        format!("{}/browse/{issue_key}", self.host)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntegrationConfigDocument {
    project_id: ProjectId,
    #[serde(default)]
    is_enabled: bool,
    host: String,
    #[serde(default)]
    credentials: Credentials,
    #[serde(default)]
    story_points_field: Option<String>,
}

impl TryFrom<IntegrationConfigDocument> for IntegrationConfig {
    type Error = IntegrationDomainError;

    fn try_from(document: IntegrationConfigDocument) -> Result<Self, Self::Error> {
        let mut config = Self::new(document.project_id, document.host, document.credentials)?
            .with_enabled(document.is_enabled);
        if let Some(field) = document.story_points_field {
            config = config.with_story_points_field(field);
        }
        Ok(config)
    }
}
