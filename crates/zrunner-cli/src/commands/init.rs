//! `zrunner init`: create a project skeleton.

use tracing::{info, instrument};

use crate::{
    cli::InitArgs,
    commands::{report_files, resolve_dir, scaffold_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Scaffold a project into `args.dir` (default: the current directory).
///
/// The directory's last component becomes the project name. Existing files
/// with the same names are overwritten.
#[instrument(skip_all)]
pub fn execute(args: InitArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let target = resolve_dir(args.dir.as_deref())?;
    let service = scaffold_service(config)?;

    output.header(&format!("Creating project in {}...", target.display()))?;
    let structure = service.create_project(&target)?;
    info!(path = %target.display(), "Project scaffolded");

    report_files(&structure, output)?;
    output.success("Project created!")?;

    if !output.is_json() {
        output.print("")?;
        output.print("Next steps:")?;
        if let Some(dir) = &args.dir {
            output.print(&format!("  cd {}", dir.display()))?;
        }
        output.print("  zrunner pipeline create <NAME>")?;
        output.print("  zrunner deploy --api-key <KEY>")?;
    }

    Ok(())
}
