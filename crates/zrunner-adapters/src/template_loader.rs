//! Filesystem-based template loader.
//!
//! Reads template overrides from a single directory. A file is picked up when
//! its name is the template file name of a [`TemplateKind`]:
//!
//! ```text
//! templates/
//! ├── project.yml.tmpl        ← overrides the project manifest
//! ├── go.mod.tmpl             ← overrides the dependency manifest
//! └── notes.txt               ← ignored
//! ```
//!
//! Subdirectories are not searched. Kinds without a file keep the built-in
//! template.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use zrunner_core::{
    application::ScaffoldError,
    domain::TemplateKind,
    error::ZrunnerResult,
};

/// Loads `*.tmpl` files from one directory.
#[derive(Debug, Clone)]
pub struct FilesystemTemplateLoader {
    root: PathBuf,
}

impl FilesystemTemplateLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every recognised template in the directory, sorted by file name.
    ///
    /// A missing directory is an error; the caller asked for it explicitly.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn load_all(&self) -> ZrunnerResult<Vec<(TemplateKind, String)>> {
        if !self.root.is_dir() {
            return Err(ScaffoldError::TemplateUnreadable {
                path: self.root.clone(),
                reason: "not a directory".into(),
            }
            .into());
        }

        let mut templates = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| ScaffoldError::TemplateUnreadable {
                path: e.path().map_or_else(|| self.root.clone(), Path::to_path_buf),
                reason: e.to_string(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(kind) = TemplateKind::from_template_file_name(name) else {
                if name.ends_with(".tmpl") {
                    warn!(file = name, "Unknown template file, ignoring");
                }
                continue;
            };

            let content =
                fs::read_to_string(entry.path()).map_err(|e| ScaffoldError::TemplateUnreadable {
                    path: entry.path().to_path_buf(),
                    reason: e.to_string(),
                })?;

            debug!(kind = %kind, path = %entry.path().display(), "Loaded template override");
            templates.push((kind, content));
        }

        Ok(templates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use zrunner_core::error::ZrunnerError;

    #[test]
    fn loads_known_templates_only() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("project.yml.tmpl"), "name: custom").unwrap();
        fs::write(temp.path().join("go.mod.tmpl"), "module custom").unwrap();
        fs::write(temp.path().join("README.md.tmpl"), "ignored").unwrap();
        fs::write(temp.path().join("notes.txt"), "ignored").unwrap();

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();

        assert_eq!(
            templates,
            vec![
                (TemplateKind::DependencyManifest, "module custom".to_string()),
                (TemplateKind::ProjectManifest, "name: custom".to_string()),
            ]
        );
    }

    #[test]
    fn nested_directories_are_not_searched() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("nested/project.yml.tmpl"), "x").unwrap();

        let templates = FilesystemTemplateLoader::new(temp.path()).load_all().unwrap();
        assert!(templates.is_empty());
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = FilesystemTemplateLoader::new(temp.path().join("absent"))
            .load_all()
            .unwrap_err();
        assert!(matches!(
            err,
            ZrunnerError::Scaffold(ScaffoldError::TemplateUnreadable { .. })
        ));
    }
}
