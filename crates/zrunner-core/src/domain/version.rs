//! Semantic version normalization.
//!
//! Accepted grammar: one optional leading `v` followed by a strict SemVer 2.0.0
//! version (`MAJOR.MINOR.PATCH[-pre][+build]`). Two-component versions such as
//! `1.0` are rejected. The canonical form never carries the `v`, so Go module
//! versions (`v0.3.1`) and hand-written ones (`0.3.1`) compare equal.

use semver::Version;

use crate::domain::error::DomainError;

/// Parse `raw` and return its canonical string form.
pub fn canonical_version(raw: &str) -> Result<String, DomainError> {
    let digits = raw.strip_prefix('v').unwrap_or(raw);

    Version::parse(digits)
        .map(|v| v.to_string())
        .map_err(|e| DomainError::InvalidVersion {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}
