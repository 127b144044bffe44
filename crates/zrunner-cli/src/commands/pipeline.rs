//! `zrunner pipeline`: pipeline management.

use tracing::instrument;

use crate::{
    cli::{PipelineCommands, PipelineCreateArgs},
    commands::{report_files, resolve_dir, scaffold_service},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Dispatch to the correct pipeline subcommand.
pub fn execute(cmd: PipelineCommands, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    match cmd {
        PipelineCommands::Create(args) => create(args, config, output),
    }
}

#[instrument(skip_all, fields(pipeline = %args.name))]
fn create(args: PipelineCreateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let target = resolve_dir(args.dir.as_deref())?;
    let service = scaffold_service(config)?;

    output.header(&format!(
        "Creating pipeline '{}' in {}...",
        args.name,
        target.display()
    ))?;
    let structure = service.create_pipeline(&target, &args.name)?;

    report_files(&structure, output)?;
    output.success(&format!("Pipeline '{}' created!", args.name))?;
    Ok(())
}
