//! Deploy Service - discovery, validation and submission.
//!
//! The deploy flow runs strictly in sequence and stops at the first error:
//!
//! ```text
//! locate project.yml -> load project -> locate + load pipelines
//!   -> resolve go.mod dependency -> validate -> assemble -> submit
//! ```
//!
//! Pipelines and `go.mod` are looked up relative to the folder holding
//! `project.yml`, not the search root.

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::{
    application::ports::{DependencyResolver, DeploySubmitter, ManifestLoader, ManifestLocator},
    domain::{
        ConfigValidator, DEFAULT_DEPENDENCY, DEPENDENCY_MANIFEST, DeploymentPayload,
        DomainError, ProjectRecord, REDACTED,
    },
    error::ZrunnerResult,
};

/// Secrets attached to a deployment request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    pat: Option<String>,
}

impl Credentials {
    /// An empty API key is rejected; an empty PAT is treated as absent.
    pub fn new(api_key: impl Into<String>, pat: Option<String>) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DomainError::MissingCredential { name: "api-key" });
        }
        Ok(Self {
            api_key,
            pat: pat.filter(|p| !p.is_empty()),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn pat(&self) -> Option<&str> {
        self.pat.as_deref()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &REDACTED)
            .field("pat", &self.pat.as_ref().map(|_| REDACTED))
            .finish()
    }
}

/// Where and what to deploy against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploySettings {
    pub endpoint: String,
    /// Module path whose pinned version becomes `zsource_version`.
    pub dependency: String,
}

impl DeploySettings {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            dependency: DEFAULT_DEPENDENCY.to_string(),
        }
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependency = dependency.into();
        self
    }
}

/// A project as read from disk, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredProject {
    pub manifest_path: PathBuf,
    pub record: ProjectRecord,
}

impl DiscoveredProject {
    /// Folder holding `project.yml`.
    pub fn project_dir(&self) -> &Path {
        self.manifest_path.parent().unwrap_or(Path::new("."))
    }
}

/// Deployment orchestrator.
pub struct DeployService {
    locator: Box<dyn ManifestLocator>,
    loader: Box<dyn ManifestLoader>,
    resolver: Box<dyn DependencyResolver>,
    submitter: Box<dyn DeploySubmitter>,
}

impl DeployService {
    pub fn new(
        locator: Box<dyn ManifestLocator>,
        loader: Box<dyn ManifestLoader>,
        resolver: Box<dyn DependencyResolver>,
        submitter: Box<dyn DeploySubmitter>,
    ) -> Self {
        Self {
            locator,
            loader,
            resolver,
            submitter,
        }
    }

    /// Find and load the project under `root` together with its pipelines.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn discover(&self, root: &Path) -> ZrunnerResult<DiscoveredProject> {
        let manifest_path = self.locator.find_project_manifest(root)?;
        debug!(path = %manifest_path.display(), "Found project manifest");

        let record = self.loader.load_project(&manifest_path)?;
        let mut project = DiscoveredProject {
            manifest_path,
            record,
        };

        for path in self.locator.find_pipeline_manifests(project.project_dir())? {
            debug!(path = %path.display(), "Found pipeline manifest");
            project
                .record
                .push_pipeline(self.loader.load_pipeline(&path)?);
        }

        info!(
            project = project.record.name(),
            pipelines = project.record.pipelines().len(),
            "Project discovered"
        );
        Ok(project)
    }

    /// Run everything up to and including payload assembly. Nothing is sent.
    #[instrument(skip_all, fields(root = %root.display(), dependency = dependency))]
    pub fn prepare(
        &self,
        root: &Path,
        dependency: &str,
        credentials: &Credentials,
    ) -> ZrunnerResult<DeploymentPayload> {
        let project = self.discover(root)?;
        let go_mod = project.project_dir().join(DEPENDENCY_MANIFEST);
        let mut record = project.record;

        let version = self.resolver.resolve(&go_mod, dependency)?;
        debug!(version = %version, "Resolved dependency version");
        record.set_resolved_dependency_version(version);

        ConfigValidator::validate(&mut record)?;
        debug!("Project configuration is valid");

        Ok(DeploymentPayload::assemble(
            &record,
            credentials.api_key(),
            credentials.pat(),
        ))
    }

    /// Prepare the payload and submit it once.
    #[instrument(skip_all, fields(root = %root.display(), endpoint = %settings.endpoint))]
    pub fn deploy(
        &self,
        root: &Path,
        settings: &DeploySettings,
        credentials: &Credentials,
    ) -> ZrunnerResult<DeploymentPayload> {
        let payload = self.prepare(root, &settings.dependency, credentials)?;

        self.submitter
            .submit(&payload, credentials.api_key(), &settings.endpoint)?;

        info!(project = %payload.project, "Deployment submitted");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::error::{DependencyError, DiscoveryError, SubmissionError};
    use crate::application::ports::{
        MockDependencyResolver, MockDeploySubmitter, MockManifestLoader, MockManifestLocator,
    };
    use crate::domain::{
        Field, PipelineManifest, PipelineRecord, ProjectManifest, ValidationError,
    };
    use crate::error::{ErrorCategory, ZrunnerError};
    use mockall::predicate::eq;

    const ROOT: &str = "/work";
    const MANIFEST: &str = "/work/demo/project.yml";

    fn creds() -> Credentials {
        Credentials::new("key", Some("token".into())).unwrap()
    }

    fn locator(pipelines: Vec<&'static str>) -> MockManifestLocator {
        let mut locator = MockManifestLocator::new();
        locator
            .expect_find_project_manifest()
            .with(eq(PathBuf::from(ROOT)))
            .returning(|_| Ok(PathBuf::from(MANIFEST)));
        locator
            .expect_find_pipeline_manifests()
            .with(eq(PathBuf::from("/work/demo")))
            .returning(move |_| Ok(pipelines.iter().map(PathBuf::from).collect()));
        locator
    }

    fn loader(project_name: &'static str) -> MockManifestLoader {
        let mut loader = MockManifestLoader::new();
        loader.expect_load_project().returning(move |_| {
            Ok(ProjectRecord::new(
                ProjectManifest {
                    name: project_name.into(),
                    org: "zb".into(),
                    kind: "ethereum".into(),
                    network: "holesky".into(),
                    version: "v0.0.1".into(),
                    github_repo: "https://github.com/acme/demo".into(),
                },
                "demo",
            ))
        });
        loader.expect_load_pipeline().returning(|path| {
            let dir = path
                .parent()
                .and_then(Path::file_name)
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            Ok(PipelineRecord::new(
                PipelineManifest { name: dir.clone() },
                dir,
            ))
        });
        loader
    }

    fn resolver() -> MockDependencyResolver {
        let mut resolver = MockDependencyResolver::new();
        resolver
            .expect_resolve()
            .with(
                eq(PathBuf::from("/work/demo/go.mod")),
                eq(DEFAULT_DEPENDENCY),
            )
            .returning(|_, _| Ok("0.3.1".into()));
        resolver
    }

    fn no_submit() -> MockDeploySubmitter {
        let mut submitter = MockDeploySubmitter::new();
        submitter.expect_submit().never();
        submitter
    }

    #[test]
    fn prepare_assembles_normalized_payload() {
        let service = DeployService::new(
            Box::new(locator(vec![
                "/work/demo/a/pipeline.yml",
                "/work/demo/b/pipeline.yml",
            ])),
            Box::new(loader("demo")),
            Box::new(resolver()),
            Box::new(no_submit()),
        );

        let payload = service
            .prepare(Path::new(ROOT), DEFAULT_DEPENDENCY, &creds())
            .unwrap();

        assert_eq!(payload.project, "demo");
        assert_eq!(payload.version, "0.0.1");
        assert_eq!(payload.github_repo, "github.com/acme/demo");
        assert_eq!(payload.zsource_version, "0.3.1");
        assert_eq!(payload.api_key, "key");
        assert_eq!(payload.pat, "token");
        let names: Vec<_> = payload.pipelines.iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn validation_failure_stops_before_submit() {
        let service = DeployService::new(
            Box::new(locator(vec![])),
            Box::new(loader("other")),
            Box::new(resolver()),
            Box::new(no_submit()),
        );

        let err = service
            .deploy(Path::new(ROOT), &DeploySettings::new("http://x"), &creds())
            .unwrap_err();

        assert!(matches!(
            err,
            ZrunnerError::Validation(ValidationError::NameMismatch {
                field: Field::ProjectName,
                ..
            })
        ));
    }

    #[test]
    fn discover_searches_pipelines_beside_project_manifest() {
        let service = DeployService::new(
            Box::new(locator(vec!["/work/demo/a/pipeline.yml"])),
            Box::new(loader("demo")),
            Box::new(MockDependencyResolver::new()),
            Box::new(no_submit()),
        );

        let project = service.discover(Path::new(ROOT)).unwrap();
        assert_eq!(project.project_dir(), Path::new("/work/demo"));
        assert_eq!(project.record.pipelines().len(), 1);
    }

    #[test]
    fn missing_project_is_not_found() {
        let mut locator = MockManifestLocator::new();
        locator.expect_find_project_manifest().returning(|root| {
            Err(DiscoveryError::NotFound {
                file_name: "project.yml",
                root: root.to_path_buf(),
            }
            .into())
        });
        let mut loader = MockManifestLoader::new();
        loader.expect_load_project().never();

        let service = DeployService::new(
            Box::new(locator),
            Box::new(loader),
            Box::new(MockDependencyResolver::new()),
            Box::new(no_submit()),
        );

        let err = service.discover(Path::new(ROOT)).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn undeclared_dependency_stops_before_validation() {
        let mut resolver = MockDependencyResolver::new();
        resolver.expect_resolve().returning(|path, dep| {
            Err(DependencyError::NotDeclared {
                dependency: dep.to_string(),
                path: path.to_path_buf(),
            }
            .into())
        });

        let service = DeployService::new(
            Box::new(locator(vec![])),
            Box::new(loader("other")),
            Box::new(resolver),
            Box::new(no_submit()),
        );

        let err = service
            .prepare(Path::new(ROOT), DEFAULT_DEPENDENCY, &creds())
            .unwrap_err();
        assert!(matches!(
            err,
            ZrunnerError::Dependency(DependencyError::NotDeclared { .. })
        ));
    }

    #[test]
    fn deploy_submits_once_with_settings() {
        let mut submitter = MockDeploySubmitter::new();
        submitter
            .expect_submit()
            .withf(|payload, key, endpoint| {
                payload.project == "demo" && key == "key" && endpoint == "http://svc/deploy"
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let service = DeployService::new(
            Box::new(locator(vec![])),
            Box::new(loader("demo")),
            Box::new(resolver()),
            Box::new(submitter),
        );

        let payload = service
            .deploy(
                Path::new(ROOT),
                &DeploySettings::new("http://svc/deploy"),
                &creds(),
            )
            .unwrap();
        assert!(payload.pipelines.is_empty());
    }

    #[test]
    fn rejection_is_surfaced() {
        let mut submitter = MockDeploySubmitter::new();
        submitter.expect_submit().times(1).returning(|_, _, _| {
            Err(SubmissionError::Rejected {
                status: 500,
                body: "bad request".into(),
            }
            .into())
        });

        let service = DeployService::new(
            Box::new(locator(vec![])),
            Box::new(loader("demo")),
            Box::new(resolver()),
            Box::new(submitter),
        );

        let err = service
            .deploy(Path::new(ROOT), &DeploySettings::new("http://x"), &creds())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert!(err.to_string().contains("bad request"));
    }

    #[test]
    fn credentials_require_api_key_and_hide_secrets() {
        assert!(matches!(
            Credentials::new("", None),
            Err(DomainError::MissingCredential { name: "api-key" })
        ));

        let creds = Credentials::new("s3cret", Some(String::new())).unwrap();
        assert_eq!(creds.pat(), None);

        let creds = Credentials::new("s3cret", Some("ghp_x".into())).unwrap();
        let debug = format!("{creds:?}");
        assert!(!debug.contains("s3cret"));
        assert!(!debug.contains("ghp_x"));
    }
}
