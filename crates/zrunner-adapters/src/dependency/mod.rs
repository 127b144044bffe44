//! Dependency manifest adapters.

mod gomod;

pub use gomod::GoModResolver;
