//! Domain value objects: validated project and pipeline names.
//!
//! Names are checked once, when a scaffold request is made. After that the
//! newtype is proof the name is safe to use as a directory name and to drop
//! into a YAML template.

use std::fmt;
use std::path::Path;

use crate::domain::error::DomainError;

// ── ProjectName ──────────────────────────────────────────────────────────────

/// Name of a project, always the basename of the project directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidName {
            entity: "project",
            name: raw.to_string(),
            reason: reason.to_string(),
        };

        if raw.is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if raw.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(invalid(
                "only letters, digits, '_', '-' and '.' are allowed",
            ));
        }

        Ok(Self(raw.to_string()))
    }

    /// Derive the project name from the directory that will hold it.
    pub fn from_dir(dir: &Path) -> Result<Self, DomainError> {
        let base = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| DomainError::InvalidName {
                entity: "project",
                name: dir.display().to_string(),
                reason: "cannot derive a project name from this path".into(),
            })?;
        Self::parse(base)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ── PipelineName ─────────────────────────────────────────────────────────────

/// Name of a pipeline, also its directory name: `^[A-Za-z0-9_-]+$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PipelineName(String);

impl PipelineName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::InvalidName {
                entity: "pipeline",
                name: raw.to_string(),
                reason: "name cannot be empty".into(),
            });
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        {
            return Err(DomainError::InvalidName {
                entity: "pipeline",
                name: raw.to_string(),
                reason: "only letters, digits, '_' and '-' are allowed".into(),
            });
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PipelineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PipelineName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
