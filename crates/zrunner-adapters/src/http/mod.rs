//! HTTP adapters.

mod submitter;

pub use submitter::{API_KEY_HEADER, DEFAULT_TIMEOUT, HttpDeploySubmitter};
