//! Command handlers. Each one turns parsed arguments into a core service call
//! and reports the result; no business rules live here.

use std::path::{Path, PathBuf};

use tracing::debug;
use zrunner_adapters::{InMemoryStore, LocalFilesystem};
use zrunner_core::prelude::{ProjectStructure, ScaffoldService};

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub mod completions;
pub mod config;
pub mod deploy;
pub mod init;
pub mod pipeline;

/// Absolute form of `dir`, or the current directory when it is `None`.
///
/// The path does not need to exist yet.
pub(crate) fn resolve_dir(dir: Option<&Path>) -> CliResult<PathBuf> {
    let resolved = match dir {
        Some(path) => std::path::absolute(path),
        None => std::env::current_dir(),
    };
    resolved.map_err(|source| CliError::PathUnresolvable {
        path: dir.unwrap_or(Path::new(".")).to_path_buf(),
        source,
    })
}

/// Scaffolder writing to the local disk, with `templates.local_path`
/// overrides applied when configured.
pub(crate) fn scaffold_service(config: &AppConfig) -> CliResult<ScaffoldService> {
    let store = match &config.templates.local_path {
        Some(dir) => {
            debug!(path = %dir.display(), "Using template overrides");
            InMemoryStore::with_overrides(dir)?
        }
        None => InMemoryStore::with_builtin()?,
    };
    Ok(ScaffoldService::new(
        Box::new(store),
        Box::new(LocalFilesystem::new()),
    ))
}

/// List the files a scaffold run wrote, relative to its root.
pub(crate) fn report_files(structure: &ProjectStructure, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        let files: Vec<String> = structure
            .file_paths()
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        output.json(&files)?;
        return Ok(());
    }

    for file in structure.files() {
        output.item(&file.path.display().to_string())?;
    }
    Ok(())
}
