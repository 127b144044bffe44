//! `zrunner deploy`: validate a project and submit it to the deployment service.

use std::time::Duration;

use tracing::{debug, instrument};
use zrunner_adapters::{DirectoryLocator, GoModResolver, HttpDeploySubmitter, YamlManifestLoader};
use zrunner_core::{
    error::ZrunnerError,
    prelude::{Credentials, DeployService, DeploySettings, DeploymentPayload},
};

use crate::{
    cli::DeployArgs,
    commands::resolve_dir,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Run the deploy flow.
///
/// Flags win over `deploy.*` config values. With `--dry-run` the payload is
/// printed with secrets masked and nothing is sent.
#[instrument(skip_all, fields(dry_run = args.dry_run))]
pub fn execute(args: DeployArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let root = resolve_dir(args.path.as_deref())?;
    let credentials = Credentials::new(args.api_key, args.pat).map_err(ZrunnerError::from)?;

    let settings = DeploySettings::new(
        args.endpoint
            .unwrap_or_else(|| config.deploy.endpoint.clone()),
    )
    .with_dependency(config.deploy.dependency.clone());
    let submitter = HttpDeploySubmitter::new(Duration::from_secs(
        args.timeout.unwrap_or(config.deploy.timeout_secs),
    ))?;
    debug!(
        endpoint = %settings.endpoint,
        timeout_secs = submitter.timeout().as_secs(),
        "Deploy settings resolved"
    );

    let service = DeployService::new(
        Box::new(DirectoryLocator::new()),
        Box::new(YamlManifestLoader::new()),
        Box::new(GoModResolver::new()),
        Box::new(submitter),
    );

    if args.dry_run {
        let payload = service.prepare(&root, &settings.dependency, &credentials)?;
        output.json(&payload.redacted())?;
        return Ok(());
    }

    output.header(&format!("Deploying to {}...", settings.endpoint))?;
    let payload = service.deploy(&root, &settings, &credentials)?;
    report(&payload, output)
}

fn report(payload: &DeploymentPayload, output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        output.json(&payload.redacted())?;
        return Ok(());
    }

    output.success(&format!(
        "Project '{}' ({}) submitted for deployment",
        payload.project, payload.version
    ))?;
    output.info(&format!("zsource {}", payload.zsource_version))?;
    for pipeline in &payload.pipelines {
        output.item(&pipeline.name)?;
    }
    Ok(())
}
