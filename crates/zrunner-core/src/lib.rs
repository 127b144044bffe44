//! zrunner Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the zrunner
//! project tool: scaffolding a project tree, and reading that tree back into
//! a validated deployment request.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            zrunner-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (ScaffoldService, DeployService)    │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │  (Filesystem, TemplateStore, Locator,   │
//! │   Loader, Resolver, Submitter)          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     zrunner-adapters (Infrastructure)   │
//! └─────────────────────────────────────────┘
//!
//!  Domain layer (pure): records, names, versions, validation, payload
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use zrunner_core::prelude::*;
//!
//! let service = DeployService::new(locator, loader, resolver, submitter);
//! let credentials = Credentials::new("api-key", None)?;
//! let settings = DeploySettings::new("https://example.invalid/deploy");
//! service.deploy(Path::new("."), &settings, &credentials)?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Credentials, DeployService, DeploySettings, DiscoveredProject, ScaffoldService,
        ports::{
            DependencyResolver, DeploySubmitter, Filesystem, ManifestLoader, ManifestLocator,
            TemplateStore,
        },
    };
    pub use crate::domain::{
        ConfigValidator, DeploymentPayload, PipelineName, PipelineRecord, ProjectName,
        ProjectRecord, ProjectStructure, RenderContext, TemplateKind,
    };
    pub use crate::error::{ErrorCategory, ZrunnerError, ZrunnerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
