//! Identifier types for the integration domain.

use super::IntegrationDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a local project that may own an issue tracker integration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a validated project identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationDomainError::EmptyProjectId`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IntegrationDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IntegrationDomainError::EmptyProjectId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectId {
    type Error = IntegrationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProjectId> for String {
    fn from(value: ProjectId) -> Self {
        value.0
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable issue key in the remote tracker (for example `KEY-12`).
///
/// The key is what local tasks store as their issue identifier. It is not the
/// tracker's internal numeric identity, and callers must not parse it as a
/// number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IssueKey(String);

impl IssueKey {
    /// Creates a validated issue key.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationDomainError::EmptyIssueKey`] when the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IntegrationDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IntegrationDomainError::EmptyIssueKey);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the key as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for IssueKey {
    type Error = IntegrationDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IssueKey> for String {
    fn from(value: IssueKey) -> Self {
        value.0
    }
}

impl AsRef<str> for IssueKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for IssueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
