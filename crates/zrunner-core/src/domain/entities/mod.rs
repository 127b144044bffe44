pub mod payload;
pub mod project;
pub mod project_structure;

pub use payload::{DeploymentPayload, PipelinePayload};
pub use project::{PipelineManifest, PipelineRecord, ProjectManifest, ProjectRecord};
pub use project_structure::ProjectStructure;
