// ============================================================================
// domain/error.rs - VALIDATION AND NAMING ERRORS
// ============================================================================

use std::fmt;
use thiserror::Error;

use crate::error::ErrorCategory;

/// A manifest field checked by the config validator.
///
/// Pipeline names carry the directory they were loaded from so that a
/// project with many pipelines still points at the right file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    ProjectName,
    Org,
    Kind,
    Network,
    Version,
    GithubRepo,
    PipelineName { dir: String },
}

impl Field {
    /// The YAML key this field is read from.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::ProjectName | Self::PipelineName { .. } => "name",
            Self::Org => "org",
            Self::Kind => "kind",
            Self::Network => "network",
            Self::Version => "version",
            Self::GithubRepo => "githubRepo",
        }
    }

    /// The manifest file this field lives in.
    pub const fn manifest(&self) -> &'static str {
        match self {
            Self::PipelineName { .. } => crate::domain::PIPELINE_MANIFEST,
            _ => crate::domain::PROJECT_MANIFEST,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProjectName => f.write_str("project name"),
            Self::Org => f.write_str("org"),
            Self::Kind => f.write_str("kind"),
            Self::Network => f.write_str("network"),
            Self::Version => f.write_str("version"),
            Self::GithubRepo => f.write_str("github repo"),
            Self::PipelineName { dir } => write!(f, "pipeline name (in '{dir}')"),
        }
    }
}

/// First rule a project record violated.
///
/// The three variants are the three kinds of failure callers need to tell
/// apart: a required value is missing, a name disagrees with its folder, or a
/// value is present but malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} should not be empty")]
    EmptyField { field: Field },

    #[error("{field} '{declared}' should be the same as its folder name '{directory}'")]
    NameMismatch {
        field: Field,
        declared: String,
        directory: String,
    },

    #[error("invalid {field} '{value}': {reason}")]
    InvalidFormat {
        field: Field,
        value: String,
        reason: String,
    },
}

impl ValidationError {
    pub fn field(&self) -> &Field {
        match self {
            Self::EmptyField { field }
            | Self::NameMismatch { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        let field = self.field();
        match self {
            Self::EmptyField { .. } => vec![
                format!("Set `{}` in {}", field.key(), field.manifest()),
                "Re-run `zrunner init` in an empty folder to see a complete example".into(),
            ],
            Self::NameMismatch { directory, .. } => vec![
                format!("Set `{}: {}` in {}", field.key(), directory, field.manifest()),
                "Or rename the folder to match the declared name".into(),
            ],
            Self::InvalidFormat { .. } => match field {
                Field::Org => vec![
                    "org may only contain letters, digits and underscores".into(),
                    "Example: org: my_company".into(),
                ],
                Field::Version => vec![
                    "version must be a semantic version: MAJOR.MINOR.PATCH".into(),
                    "Examples: 0.1.0, v1.2.3, 1.0.0-rc.1".into(),
                ],
                Field::GithubRepo => vec![
                    "githubRepo must point at a repository on github.com".into(),
                    "Example: githubRepo: https://github.com/my-org/my-repo".into(),
                ],
                _ => vec![format!("Check `{}` in {}", field.key(), field.manifest())],
            },
        }
    }
}

/// Errors raised by domain rules outside record validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid {entity} name '{name}': {reason}")]
    InvalidName {
        entity: &'static str,
        name: String,
        reason: String,
    },

    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion { value: String, reason: String },

    #[error("Required credential missing: {name}")]
    MissingCredential { name: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidName { entity, .. } => vec![
                format!("A {entity} name may only use letters, digits, '_' and '-'"),
                "Examples: my-pipeline, transfers_v2".into(),
            ],
            Self::InvalidVersion { .. } => vec![
                "Use a semantic version such as 1.2.3 or v1.2.3".into(),
            ],
            Self::MissingCredential { name } => vec![
                format!("Pass --{name} or set ZRUNNER_{}", name.replace('-', "_").to_uppercase()),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidName { .. } | Self::InvalidVersion { .. } => ErrorCategory::Validation,
            Self::MissingCredential { .. } => ErrorCategory::Configuration,
        }
    }
}
