//! Core domain layer for zrunner.
//!
//! Pure logic only: records, names, versions, validation rules, the payload
//! shape and template rendering. All I/O happens behind the ports defined in
//! the application layer.

pub mod entities;
pub mod error;
pub mod template;
pub mod validation;
pub mod value_objects;
pub mod version;

/// Project manifest file name.
pub const PROJECT_MANIFEST: &str = "project.yml";

/// Pipeline manifest file name.
pub const PIPELINE_MANIFEST: &str = "pipeline.yml";

/// Dependency manifest at the project root.
pub const DEPENDENCY_MANIFEST: &str = "go.mod";

pub const BLOCK_HANDLERS: &str = "block_handlers.go";
pub const EVENT_HANDLERS: &str = "event_handlers.go";

/// Directory of the pipeline created alongside a new project.
pub const EXAMPLE_PIPELINE_DIR: &str = "example-pipeline";

/// Module whose version is reported as `zsource_version`.
pub const DEFAULT_DEPENDENCY: &str = "github.com/Zettablock/zsource";

pub use entities::{
    DeploymentPayload, PipelineManifest, PipelinePayload, PipelineRecord, ProjectManifest,
    ProjectRecord,
    payload::REDACTED,
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
};
pub use error::{DomainError, Field, ValidationError};
pub use template::{RenderContext, TemplateKind};
pub use validation::ConfigValidator;
pub use value_objects::{PipelineName, ProjectName};
pub use version::canonical_version;
