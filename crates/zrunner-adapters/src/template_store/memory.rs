//! In-memory template store with built-in templates.

use std::{
    collections::BTreeMap,
    path::Path,
    sync::{Arc, RwLock},
};

use tracing::info;

use zrunner_core::{
    application::{ScaffoldError, ports::TemplateStore},
    domain::TemplateKind,
    error::{ZrunnerError, ZrunnerResult},
};

use crate::{builtin_templates, template_loader::FilesystemTemplateLoader};

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<BTreeMap<TemplateKind, String>>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with built-in templates loaded.
    pub fn with_builtin() -> ZrunnerResult<Self> {
        let store = Self::new();
        for (kind, text) in builtin_templates::all_templates() {
            store.insert(kind, text)?;
        }
        Ok(store)
    }

    /// Built-in templates, replaced by any `*.tmpl` files found in `dir`.
    pub fn with_overrides(dir: &Path) -> ZrunnerResult<Self> {
        let store = Self::with_builtin()?;
        let overrides = FilesystemTemplateLoader::new(dir).load_all()?;
        info!(
            path = %dir.display(),
            count = overrides.len(),
            "Template overrides loaded"
        );
        for (kind, text) in overrides {
            store.insert(kind, text)?;
        }
        Ok(store)
    }

    pub fn insert(&self, kind: TemplateKind, text: impl Into<String>) -> ZrunnerResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(kind))?;
        inner.insert(kind, text.into());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|inner| inner.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn lock_error(kind: TemplateKind) -> ZrunnerError {
    ZrunnerError::Internal {
        message: format!("template store lock poisoned while accessing {kind}"),
    }
}

impl TemplateStore for InMemoryStore {
    fn get(&self, kind: TemplateKind) -> ZrunnerResult<String> {
        let inner = self.inner.read().map_err(|_| lock_error(kind))?;
        inner
            .get(&kind)
            .cloned()
            .ok_or_else(|| ScaffoldError::TemplateMissing { kind }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn builtin_store_has_every_kind() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(store.len(), TemplateKind::ALL.len());
        for kind in TemplateKind::ALL {
            assert!(store.get(kind).is_ok());
        }
    }

    #[test]
    fn empty_store_reports_missing_template() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        let err = store.get(TemplateKind::BlockHandlers).unwrap_err();
        assert!(matches!(
            err,
            ZrunnerError::Scaffold(ScaffoldError::TemplateMissing {
                kind: TemplateKind::BlockHandlers
            })
        ));
    }

    #[test]
    fn overrides_replace_only_their_kind() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("go.mod.tmpl"), "module mine\n").unwrap();

        let store = InMemoryStore::with_overrides(temp.path()).unwrap();

        assert_eq!(
            store.get(TemplateKind::DependencyManifest).unwrap(),
            "module mine\n"
        );
        assert_eq!(
            store.get(TemplateKind::ProjectManifest).unwrap(),
            builtin_templates::builtin(TemplateKind::ProjectManifest)
        );
    }
}
