//! Depth-first manifest search.
//!
//! Each directory level is listed in file-name order, so results only depend
//! on what is on disk. The project search stops at the first directory that
//! directly holds `project.yml`; the pipeline search collects every
//! `pipeline.yml` in the subtree, a directory's own manifest ahead of those
//! below it. Hidden directories below the root are skipped and symbolic links
//! are never followed.

use std::path::{Path, PathBuf};

use tracing::{instrument, trace};
use walkdir::WalkDir;

use zrunner_core::{
    application::{DiscoveryError, ports::ManifestLocator},
    domain::{PIPELINE_MANIFEST, PROJECT_MANIFEST},
    error::ZrunnerResult,
};

/// Filesystem-backed [`ManifestLocator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryLocator;

impl DirectoryLocator {
    pub fn new() -> Self {
        Self
    }
}

impl ManifestLocator for DirectoryLocator {
    #[instrument(skip(self), fields(root = %root.display()))]
    fn find_project_manifest(&self, root: &Path) -> ZrunnerResult<PathBuf> {
        let root = absolute_root(root, PROJECT_MANIFEST)?;
        let mut found = Vec::new();
        search(&root, PROJECT_MANIFEST, true, &mut found)?;

        found.into_iter().next().ok_or_else(|| {
            DiscoveryError::NotFound {
                file_name: PROJECT_MANIFEST,
                root,
            }
            .into()
        })
    }

    #[instrument(skip(self), fields(root = %root.display()))]
    fn find_pipeline_manifests(&self, root: &Path) -> ZrunnerResult<Vec<PathBuf>> {
        let root = absolute_root(root, PIPELINE_MANIFEST)?;
        let mut found = Vec::new();
        search(&root, PIPELINE_MANIFEST, false, &mut found)?;
        Ok(found)
    }
}

fn absolute_root(root: &Path, file_name: &'static str) -> ZrunnerResult<PathBuf> {
    let root = std::path::absolute(root).map_err(|e| DiscoveryError::Io {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    if !root.is_dir() {
        return Err(DiscoveryError::NotFound { file_name, root }.into());
    }
    Ok(root)
}

/// Visit `dir`, pushing matches onto `found`. With `first_only` the walk ends
/// at the first match.
fn search(
    dir: &Path,
    file_name: &str,
    first_only: bool,
    found: &mut Vec<PathBuf>,
) -> ZrunnerResult<()> {
    trace!(dir = %dir.display(), "Scanning");

    let mut subdirs = Vec::new();
    let listing = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for entry in listing {
        let entry = entry.map_err(|e| DiscoveryError::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            reason: e.to_string(),
        })?;
        let file_type = entry.file_type();

        if file_type.is_file() && entry.file_name() == file_name {
            found.push(entry.into_path());
            if first_only {
                return Ok(());
            }
            continue;
        }
        if file_type.is_dir() && !is_hidden(entry.file_name()) {
            subdirs.push(entry.into_path());
        }
    }

    for subdir in subdirs {
        search(&subdir, file_name, first_only, found)?;
        if first_only && !found.is_empty() {
            break;
        }
    }

    Ok(())
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|n| n.starts_with('.'))
}
