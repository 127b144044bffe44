//! `go.mod` requirement lookup.
//!
//! Only `require` directives are read, in both forms:
//!
//! ```text
//! require github.com/Zettablock/zsource v0.3.1
//!
//! require (
//!     github.com/Zettablock/zsource v0.3.1 // indirect
//!     gorm.io/gorm v1.25.0
//! )
//! ```
//!
//! Everything after `//` on a line is a comment. Other directives are
//! skipped without being checked.

use std::fs;
use std::path::Path;

use tracing::{debug, instrument};

use zrunner_core::{
    application::{DependencyError, ports::DependencyResolver},
    domain::{DomainError, canonical_version},
    error::ZrunnerResult,
};

/// Reads pinned versions out of a `go.mod` file.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoModResolver;

impl GoModResolver {
    pub fn new() -> Self {
        Self
    }
}

impl DependencyResolver for GoModResolver {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn resolve(&self, path: &Path, dependency: &str) -> ZrunnerResult<String> {
        let text = fs::read_to_string(path).map_err(|e| DependencyError::ManifestUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let requirements = parse_requirements(&text).map_err(|(line, reason)| {
            DependencyError::Malformed {
                path: path.to_path_buf(),
                line,
                reason,
            }
        })?;

        let raw = requirements
            .into_iter()
            .find(|req| req.module == dependency)
            .map(|req| req.version)
            .ok_or_else(|| DependencyError::NotDeclared {
                dependency: dependency.to_string(),
                path: path.to_path_buf(),
            })?;
        debug!(version = %raw, "Found requirement");

        let version = canonical_version(&raw).map_err(|e| DependencyError::InvalidVersion {
            dependency: dependency.to_string(),
            version: raw.clone(),
            reason: match e {
                DomainError::InvalidVersion { reason, .. } => reason,
                other => other.to_string(),
            },
        })?;

        Ok(version)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Requirement {
    module: String,
    version: String,
}

/// Collect every `require` entry. Errors carry a 1-based line number.
fn parse_requirements(text: &str) -> Result<Vec<Requirement>, (usize, String)> {
    let mut requirements = Vec::new();
    let mut block_start = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        if block_start.is_some() {
            if line == ")" {
                block_start = None;
            } else {
                requirements.push(parse_entry(line).map_err(|r| (line_no, r))?);
            }
            continue;
        }

        // `require (` and `require(` both open a block.
        let rest = match line.strip_prefix("require") {
            Some(rest) if rest.is_empty() || rest.starts_with([' ', '\t', '(']) => rest.trim(),
            _ => continue,
        };

        if rest == "()" {
            continue;
        }
        if rest == "(" {
            block_start = Some(line_no);
        } else {
            requirements.push(parse_entry(rest).map_err(|r| (line_no, r))?);
        }
    }

    if let Some(line_no) = block_start {
        return Err((line_no, "require block is never closed".into()));
    }

    Ok(requirements)
}

fn parse_entry(line: &str) -> Result<Requirement, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [module, version] => Ok(Requirement {
            module: module.trim_matches('"').to_string(),
            version: version.to_string(),
        }),
        _ => Err(format!("expected `<module> <version>`, found `{line}`")),
    }
}

fn strip_comment(line: &str) -> &str {
    line.split_once("//").map_or(line, |(code, _)| code)
}
