//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! use cases: scaffold a tree, and deploy the tree that was scaffolded.

pub mod deploy_service;
pub mod scaffold_service;

pub use deploy_service::{Credentials, DeployService, DeploySettings, DiscoveredProject};
pub use scaffold_service::ScaffoldService;
