//! YAML manifest loader.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::{debug, instrument};

use zrunner_core::{
    application::{DiscoveryError, ParseError, ports::ManifestLoader},
    domain::{PipelineManifest, PipelineRecord, ProjectManifest, ProjectRecord},
    error::ZrunnerResult,
};

/// Reads `project.yml` and `pipeline.yml` with `serde_yaml`.
///
/// An empty document (or one holding only comments) loads as an all-empty
/// manifest. Anything that is not a mapping at the top level is a parse error.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlManifestLoader;

impl YamlManifestLoader {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestLoader for YamlManifestLoader {
    #[instrument(skip(self), fields(path = %path.display()))]
    fn load_project(&self, path: &Path) -> ZrunnerResult<ProjectRecord> {
        let manifest: ProjectManifest = read_manifest(path)?;
        debug!(name = %manifest.name, "Loaded project manifest");
        Ok(ProjectRecord::new(manifest, parent_name(path)))
    }

    #[instrument(skip(self), fields(path = %path.display()))]
    fn load_pipeline(&self, path: &Path) -> ZrunnerResult<PipelineRecord> {
        let manifest: PipelineManifest = read_manifest(path)?;
        debug!(name = %manifest.name, "Loaded pipeline manifest");
        Ok(PipelineRecord::new(manifest, parent_name(path)))
    }
}

fn read_manifest<T: DeserializeOwned + Default>(path: &Path) -> ZrunnerResult<T> {
    let text = fs::read_to_string(path).map_err(|e| DiscoveryError::Io {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_manifest(&text).map_err(|reason| {
        ParseError {
            path: path.to_path_buf(),
            reason,
        }
        .into()
    })
}

fn parse_manifest<T: DeserializeOwned + Default>(text: &str) -> Result<T, String> {
    let blank = text
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if blank {
        return Ok(T::default());
    }

    // Shape check only. Fields are read from the text itself so scalars keep
    // their spelling (`1.10` stays `1.10`, `0x10` stays `0x10`).
    let value: Value = serde_yaml::from_str(text).map_err(|e| e.to_string())?;
    match value {
        Value::Null => Ok(T::default()),
        Value::Mapping(_) => serde_yaml::from_str(text).map_err(|e| e.to_string()),
        _ => Err("expected a mapping of `key: value` pairs".into()),
    }
}

/// Basename of the directory holding `path`.
fn parent_name(path: &Path) -> String {
    path.parent()
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
