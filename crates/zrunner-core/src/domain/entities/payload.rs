use std::fmt;

use serde::Serialize;

use crate::domain::entities::project::ProjectRecord;

/// Placeholder shown instead of a secret.
pub const REDACTED: &str = "***";

/// Wire document sent to the deployment service.
///
/// Field names are the JSON keys the service expects. Secrets are attached
/// here and nowhere else; `Debug` never prints them.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentPayload {
    pub org: String,
    pub project: String,
    pub api_key: String,
    pub github_repo: String,
    pub pat: String,
    pub pipelines: Vec<PipelinePayload>,
    pub zsource_version: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelinePayload {
    pub name: String,
}

impl DeploymentPayload {
    /// Project a validated record into a payload.
    ///
    /// The record must already have passed `ConfigValidator::validate`; this
    /// is not re-checked here.
    pub fn assemble(project: &ProjectRecord, api_key: &str, pat: Option<&str>) -> Self {
        Self {
            org: project.org.clone(),
            project: project.name.clone(),
            api_key: api_key.to_string(),
            github_repo: project.github_repo.clone(),
            pat: pat.unwrap_or_default().to_string(),
            pipelines: project
                .pipelines
                .iter()
                .map(|p| PipelinePayload {
                    name: p.name.clone(),
                })
                .collect(),
            zsource_version: project.resolved_dependency_version.clone(),
            version: project.version.clone(),
        }
    }

    /// Copy with both secrets masked, for display.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: mask(&self.api_key),
            pat: mask(&self.pat),
            ..self.clone()
        }
    }
}

fn mask(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        REDACTED.to_string()
    }
}

impl fmt::Debug for DeploymentPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeploymentPayload")
            .field("org", &self.org)
            .field("project", &self.project)
            .field("api_key", &mask(&self.api_key))
            .field("github_repo", &self.github_repo)
            .field("pat", &mask(&self.pat))
            .field("pipelines", &self.pipelines)
            .field("zsource_version", &self.zsource_version)
            .field("version", &self.version)
            .finish()
    }
}
