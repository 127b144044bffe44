//! Manifest discovery adapters.

mod loader;
mod locator;

pub use loader::YamlManifestLoader;
pub use locator::DirectoryLocator;
