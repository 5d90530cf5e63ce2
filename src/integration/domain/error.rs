//! Error types for integration domain validation.

use thiserror::Error;

/// Errors returned while constructing integration domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntegrationDomainError {
    /// The project identifier is empty after trimming.
    #[error("project identifier must not be empty")]
    EmptyProjectId,

    /// The issue key is empty after trimming.
    #[error("issue key must not be empty")]
    EmptyIssueKey,

    /// The integration host is empty after trimming.
    #[error("integration host must not be empty")]
    EmptyHost,

    /// A remote timestamp could not be parsed.
    #[error("unparseable remote timestamp '{0}'")]
    InvalidTimestamp(String),
}
