//! Application ports (traits) for external dependencies.
//!
//! Ports define what the use cases need from the outside world. Adapters in
//! `zrunner-adapters` implement them.
//!
//! ## Driven ports
//!
//! - `Filesystem`: directory creation and file writes for scaffolding
//! - `TemplateStore`: raw template text by kind
//! - `ManifestLocator`: finding `project.yml` / `pipeline.yml` under a root
//! - `ManifestLoader`: typed deserialization of one manifest
//! - `DependencyResolver`: reading a pinned version out of `go.mod`
//! - `DeploySubmitter`: the single POST to the deployment service

use std::path::{Path, PathBuf};

use crate::domain::{DeploymentPayload, PipelineRecord, ProjectRecord, TemplateKind};
use crate::error::ZrunnerResult;

/// Port for filesystem writes.
///
/// Implemented by:
/// - `zrunner_adapters::filesystem::LocalFilesystem` (production)
/// - `zrunner_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Existing directories are fine.
    fn create_dir_all(&self, path: &Path) -> ZrunnerResult<()>;

    /// Write content to a file, replacing any existing content.
    fn write_file(&self, path: &Path, content: &str) -> ZrunnerResult<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// Port for template retrieval.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateStore: Send + Sync {
    /// Raw, unrendered text of one template.
    fn get(&self, kind: TemplateKind) -> ZrunnerResult<String>;
}

/// Port for manifest discovery.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestLocator: Send + Sync {
    /// Absolute path of the first `project.yml` under `root`.
    fn find_project_manifest(&self, root: &Path) -> ZrunnerResult<PathBuf>;

    /// Absolute paths of every `pipeline.yml` under `root`, in traversal order.
    fn find_pipeline_manifests(&self, root: &Path) -> ZrunnerResult<Vec<PathBuf>>;
}

/// Port for manifest deserialization.
#[cfg_attr(test, mockall::automock)]
pub trait ManifestLoader: Send + Sync {
    fn load_project(&self, path: &Path) -> ZrunnerResult<ProjectRecord>;

    fn load_pipeline(&self, path: &Path) -> ZrunnerResult<PipelineRecord>;
}

/// Port for dependency version lookup.
#[cfg_attr(test, mockall::automock)]
pub trait DependencyResolver: Send + Sync {
    /// Canonical version of `dependency` as pinned in the manifest at `path`.
    fn resolve(&self, path: &Path, dependency: &str) -> ZrunnerResult<String>;
}

/// Port for the deployment request.
#[cfg_attr(test, mockall::automock)]
pub trait DeploySubmitter: Send + Sync {
    /// Send `payload` once. Only an HTTP 200 counts as success.
    fn submit(&self, payload: &DeploymentPayload, api_key: &str, endpoint: &str)
    -> ZrunnerResult<()>;
}
