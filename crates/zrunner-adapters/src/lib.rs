//! Infrastructure adapters for zrunner.
//!
//! This crate implements the ports defined in `zrunner_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod dependency;
pub mod discovery;
pub mod filesystem;
pub mod http;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use dependency::GoModResolver;
pub use discovery::{DirectoryLocator, YamlManifestLoader};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use http::HttpDeploySubmitter;
pub use template_store::InMemoryStore;
