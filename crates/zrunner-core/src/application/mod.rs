//! Application layer for zrunner.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`ScaffoldService`, `DeployService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: failures at the edges of a use case
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Those live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    Credentials, DeployService, DeploySettings, DiscoveredProject, ScaffoldService,
};

pub use ports::{
    DependencyResolver, DeploySubmitter, Filesystem, ManifestLoader, ManifestLocator,
    TemplateStore,
};

pub use error::{DependencyError, DiscoveryError, ParseError, ScaffoldError, SubmissionError};
