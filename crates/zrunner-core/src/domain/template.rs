//! Template identities and placeholder rendering.
//!
//! A scaffold request renders a fixed set of files. Each one is identified by
//! a [`TemplateKind`]; its text comes from a `TemplateStore` and its
//! placeholders are filled by a [`RenderContext`].
//!
//! ## Placeholder syntax
//!
//! `{{KEY}}` is replaced by the value bound to `KEY`. Unknown keys are left
//! untouched. No escaping, no conditionals; the scaffolded files are small
//! and the only varying values are two names.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::value_objects::{PipelineName, ProjectName};
use crate::domain::{
    BLOCK_HANDLERS, DEPENDENCY_MANIFEST, EVENT_HANDLERS, PIPELINE_MANIFEST, PROJECT_MANIFEST,
};

/// Placeholder key bound to the project name.
pub const PROJECT_NAME_KEY: &str = "PROJECT_NAME";

/// Placeholder key bound to the pipeline name.
pub const PIPELINE_NAME_KEY: &str = "PIPELINE_NAME";

/// One file the scaffolder knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TemplateKind {
    ProjectManifest,
    PipelineManifest,
    BlockHandlers,
    EventHandlers,
    DependencyManifest,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 5] = [
        Self::ProjectManifest,
        Self::PipelineManifest,
        Self::BlockHandlers,
        Self::EventHandlers,
        Self::DependencyManifest,
    ];

    /// Name of the file this template renders to.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::ProjectManifest => PROJECT_MANIFEST,
            Self::PipelineManifest => PIPELINE_MANIFEST,
            Self::BlockHandlers => BLOCK_HANDLERS,
            Self::EventHandlers => EVENT_HANDLERS,
            Self::DependencyManifest => DEPENDENCY_MANIFEST,
        }
    }

    /// Name the template is stored under on disk.
    pub fn template_file_name(self) -> String {
        format!("{}.tmpl", self.file_name())
    }

    /// Whether the template contains placeholders.
    ///
    /// Literal templates are written byte for byte.
    pub const fn is_parameterized(self) -> bool {
        matches!(self, Self::ProjectManifest | Self::PipelineManifest)
    }

    pub fn from_template_file_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.template_file_name() == name)
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Values substituted into parameterized templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_project(name: &ProjectName) -> Self {
        Self::new().with_variable(PROJECT_NAME_KEY, name.as_str())
    }

    pub fn for_pipeline(name: &PipelineName) -> Self {
        Self::new().with_variable(PIPELINE_NAME_KEY, name.as_str())
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` with its bound value.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            result = result.replace(&format!("{{{{{key}}}}}"), value);
        }
        result
    }
}

/// Render `template` for `kind`, skipping substitution for literal files.
pub fn render(kind: TemplateKind, template: &str, ctx: &RenderContext) -> String {
    if kind.is_parameterized() {
        ctx.render(template)
    } else {
        template.to_string()
    }
}
