//! Scaffold Service - project and pipeline generation.
//!
//! This service coordinates the scaffolding workflow:
//! 1. Validate the requested name
//! 2. Plan the tree by rendering templates into a `ProjectStructure`
//! 3. Write the plan to the filesystem in order
//!
//! There is no rollback. A failed write leaves earlier files in place.

use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{Filesystem, TemplateStore},
    domain::{
        BLOCK_HANDLERS, DEPENDENCY_MANIFEST, EVENT_HANDLERS, EXAMPLE_PIPELINE_DIR, FsEntry,
        PIPELINE_MANIFEST, PROJECT_MANIFEST, PipelineName, ProjectName, ProjectStructure,
        RenderContext, TemplateKind, template,
    },
    error::ZrunnerResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    filesystem: Box<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(store: Box<dyn TemplateStore>, filesystem: Box<dyn Filesystem>) -> Self {
        Self { store, filesystem }
    }

    /// Create a project in `target_dir`.
    ///
    /// The project is named after the directory. Writes `project.yml`,
    /// `go.mod` and an `example-pipeline` folder with its own manifest and
    /// handler stubs. `target_dir` is created if missing.
    #[instrument(skip_all, fields(target_dir = %target_dir.display()))]
    pub fn create_project(&self, target_dir: &Path) -> ZrunnerResult<ProjectStructure> {
        let name = ProjectName::from_dir(target_dir)?;
        info!(project = %name, "Creating project");

        let structure = self.plan_project(target_dir, &name)?;
        self.write_structure(&structure)?;

        info!(files = structure.files().count(), "Project created");
        Ok(structure)
    }

    /// Create one pipeline folder named `name` inside `target_dir`.
    ///
    /// The project root is not touched, so this also works outside a project.
    #[instrument(skip_all, fields(target_dir = %target_dir.display(), pipeline = %name))]
    pub fn create_pipeline(&self, target_dir: &Path, name: &str) -> ZrunnerResult<ProjectStructure> {
        let name = PipelineName::parse(name)?;
        info!("Creating pipeline");

        let mut structure = ProjectStructure::new(target_dir);
        self.plan_pipeline(&mut structure, &name)?;
        self.write_structure(&structure)?;

        info!(files = structure.files().count(), "Pipeline created");
        Ok(structure)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn plan_project(&self, root: &Path, name: &ProjectName) -> ZrunnerResult<ProjectStructure> {
        let ctx = RenderContext::for_project(name);
        let mut structure = ProjectStructure::new(root);

        structure.add_file(PROJECT_MANIFEST, self.render(TemplateKind::ProjectManifest, &ctx)?);

        let example = PipelineName::parse(EXAMPLE_PIPELINE_DIR)?;
        self.plan_pipeline(&mut structure, &example)?;

        structure.add_file(
            DEPENDENCY_MANIFEST,
            self.render(TemplateKind::DependencyManifest, &ctx)?,
        );

        Ok(structure)
    }

    fn plan_pipeline(
        &self,
        structure: &mut ProjectStructure,
        name: &PipelineName,
    ) -> ZrunnerResult<()> {
        let ctx = RenderContext::for_pipeline(name);
        let dir = PathBuf::from(name.as_str());

        structure.add_directory(dir.clone());
        structure.add_file(
            dir.join(PIPELINE_MANIFEST),
            self.render(TemplateKind::PipelineManifest, &ctx)?,
        );
        structure.add_file(
            dir.join(BLOCK_HANDLERS),
            self.render(TemplateKind::BlockHandlers, &ctx)?,
        );
        structure.add_file(
            dir.join(EVENT_HANDLERS),
            self.render(TemplateKind::EventHandlers, &ctx)?,
        );

        Ok(())
    }

    fn render(&self, kind: TemplateKind, ctx: &RenderContext) -> ZrunnerResult<String> {
        let raw = self.store.get(kind)?;
        Ok(template::render(kind, &raw, ctx))
    }

    /// Write every entry in order, stopping at the first failure.
    fn write_structure(&self, structure: &ProjectStructure) -> ZrunnerResult<()> {
        structure.validate()?;

        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            let path = structure.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => {
                    self.filesystem.create_dir_all(&path)?;
                }
                FsEntry::File(file) => {
                    if self.filesystem.exists(&path) {
                        debug!(path = %path.display(), "Overwriting existing file");
                    }
                    self.filesystem.write_file(&path, &file.content)?;
                }
            }
        }

        Ok(())
    }
}
