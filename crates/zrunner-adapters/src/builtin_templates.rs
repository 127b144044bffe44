//! Built-in templates.
//!
//! The five files a scaffold writes ship inside the binary. Their sources
//! live under `templates/` in this crate, one `<file>.tmpl` per
//! [`TemplateKind`].

use zrunner_core::domain::TemplateKind;

const PROJECT_MANIFEST: &str = include_str!("../templates/project.yml.tmpl");
const PIPELINE_MANIFEST: &str = include_str!("../templates/pipeline.yml.tmpl");
const BLOCK_HANDLERS: &str = include_str!("../templates/block_handlers.go.tmpl");
const EVENT_HANDLERS: &str = include_str!("../templates/event_handlers.go.tmpl");
const DEPENDENCY_MANIFEST: &str = include_str!("../templates/go.mod.tmpl");

/// Raw text of the built-in template for `kind`.
pub fn builtin(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::ProjectManifest => PROJECT_MANIFEST,
        TemplateKind::PipelineManifest => PIPELINE_MANIFEST,
        TemplateKind::BlockHandlers => BLOCK_HANDLERS,
        TemplateKind::EventHandlers => EVENT_HANDLERS,
        TemplateKind::DependencyManifest => DEPENDENCY_MANIFEST,
    }
}

/// Every built-in template, in [`TemplateKind::ALL`] order.
pub fn all_templates() -> impl Iterator<Item = (TemplateKind, &'static str)> {
    TemplateKind::ALL.into_iter().map(|kind| (kind, builtin(kind)))
}
