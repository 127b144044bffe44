//! Application layer errors.
//!
//! These errors represent failures at the edges of a use case: the file
//! system, a manifest on disk, the remote service. Rule violations on loaded
//! data are `ValidationError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::TemplateKind;
use crate::error::ErrorCategory;

/// A manifest could not be located.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiscoveryError {
    #[error("No {file_name} found under {}", root.display())]
    NotFound {
        file_name: &'static str,
        root: PathBuf,
    },

    #[error("Cannot read directory {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
}

impl DiscoveryError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { file_name, root } => vec![
                format!("Check that {} or one of its subfolders holds {file_name}", root.display()),
                "Create a project with: zrunner init <DIR>".into(),
                "Or point at the project with --path".into(),
            ],
            Self::Io { path, .. } => vec![
                format!("Check read permissions on {}", path.display()),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Io { .. } => ErrorCategory::Internal,
        }
    }
}

/// A manifest exists but is not well-formed YAML.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Cannot parse {}: {reason}", path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub reason: String,
}

impl ParseError {
    pub fn suggestions(&self) -> Vec<String> {
        vec![
            format!("Fix the YAML syntax in {}", self.path.display()),
            "Manifests are flat `key: value` documents".into(),
        ]
    }
}

/// The dependency manifest does not pin a usable version.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Cannot read {}: {reason}", path.display())]
    ManifestUnreadable { path: PathBuf, reason: String },

    #[error("{}:{line}: {reason}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Dependency {dependency} is not declared in {}", path.display())]
    NotDeclared { dependency: String, path: PathBuf },

    #[error("Dependency {dependency} has invalid version '{version}': {reason}")]
    InvalidVersion {
        dependency: String,
        version: String,
        reason: String,
    },
}

impl DependencyError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ManifestUnreadable { path, .. } => vec![
                format!("Make sure {} exists next to project.yml", path.display()),
                "Run `go mod init` in the project folder if it is missing".into(),
            ],
            Self::Malformed { path, line, .. } => {
                vec![format!("Fix line {line} of {}", path.display())]
            }
            Self::NotDeclared { dependency, .. } => vec![
                format!("Add it with: go get {dependency}"),
            ],
            Self::InvalidVersion { dependency, .. } => vec![
                format!("Pin {dependency} to a tagged release, e.g. v0.1.0"),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ManifestUnreadable { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Validation,
        }
    }
}

/// The deployment request did not succeed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Cannot encode deployment request: {reason}")]
    Encode { reason: String },

    #[error("Deployment rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },
}

impl SubmissionError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Encode { .. } => vec!["This is likely a bug; re-run with -vvv".into()],
            Self::Rejected { status: 401 | 403, .. } => vec![
                "Check the API key passed with --api-key or ZRUNNER_API_KEY".into(),
            ],
            Self::Rejected { .. } => vec![
                "Read the service response above for details".into(),
                "Inspect the request with: zrunner deploy --dry-run".into(),
            ],
            Self::Transport { .. } => vec![
                "Check your network connection".into(),
                "Override the service URL with --endpoint or deploy.endpoint".into(),
                "Raise the timeout with --timeout if the service is slow".into(),
            ],
        }
    }
}

/// Scaffolding could not complete.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScaffoldError {
    #[error("Filesystem error at {}: {reason}", path.display())]
    Filesystem { path: PathBuf, reason: String },

    #[error("Template {kind} is not available")]
    TemplateMissing { kind: TemplateKind },

    #[error("Cannot load template {}: {reason}", path.display())]
    TemplateUnreadable { path: PathBuf, reason: String },
}

impl ScaffoldError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Filesystem { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure are left in place".into(),
            ],
            Self::TemplateMissing { kind } => vec![
                format!("Add {} to templates.local_path", kind.template_file_name()),
                "Or unset templates.local_path to use the built-in templates".into(),
            ],
            Self::TemplateUnreadable { path, .. } => vec![
                format!("Check read permissions on {}", path.display()),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Filesystem { .. } => ErrorCategory::Internal,
            Self::TemplateMissing { .. } | Self::TemplateUnreadable { .. } => {
                ErrorCategory::Configuration
            }
        }
    }
}
