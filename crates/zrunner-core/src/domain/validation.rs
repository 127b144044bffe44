//! Project record validation.
//!
//! Rules run in a fixed order and the first violation is returned. The order
//! is part of the contract: a record with an empty `org` and a bad `version`
//! always reports the `org`.

use crate::domain::entities::project::ProjectRecord;
use crate::domain::error::{Field, ValidationError};
use crate::domain::version::canonical_version;

/// Hosts a `githubRepo` value must mention.
pub const KNOWN_REPO_HOSTS: &[&str] = &["github.com"];

/// Centralized config validation.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check `project` and canonicalize its `version` and `github_repo`.
    ///
    /// Nothing else on the record is touched. On error the record may already
    /// carry the canonical version if the failure came from a later rule.
    pub fn validate(project: &mut ProjectRecord) -> Result<(), ValidationError> {
        require(&project.name, Field::ProjectName)?;
        if project.name != project.dir {
            return Err(ValidationError::NameMismatch {
                field: Field::ProjectName,
                declared: project.name.clone(),
                directory: project.dir.clone(),
            });
        }

        require(&project.org, Field::Org)?;
        if !project
            .org
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(ValidationError::InvalidFormat {
                field: Field::Org,
                value: project.org.clone(),
                reason: "only letters, digits and '_' are allowed".into(),
            });
        }

        require(&project.kind, Field::Kind)?;
        require(&project.network, Field::Network)?;

        require(&project.version, Field::Version)?;
        project.version = canonical_version(&project.version).map_err(|e| {
            ValidationError::InvalidFormat {
                field: Field::Version,
                value: project.version.clone(),
                reason: match e {
                    crate::domain::DomainError::InvalidVersion { reason, .. } => reason,
                    other => other.to_string(),
                },
            }
        })?;

        require(&project.github_repo, Field::GithubRepo)?;
        project.github_repo = normalize_repo(&project.github_repo)?;

        for pipeline in &project.pipelines {
            let field = Field::PipelineName {
                dir: pipeline.source_dir.clone(),
            };
            require(&pipeline.name, field.clone())?;
            if pipeline.name != pipeline.source_dir {
                return Err(ValidationError::NameMismatch {
                    field,
                    declared: pipeline.name.clone(),
                    directory: pipeline.source_dir.clone(),
                });
            }
        }

        Ok(())
    }
}

fn require(value: &str, field: Field) -> Result<(), ValidationError> {
    if value.is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

/// Strip one scheme prefix and require a known host.
fn normalize_repo(raw: &str) -> Result<String, ValidationError> {
    let stripped = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);

    if stripped.is_empty() || !KNOWN_REPO_HOSTS.iter().any(|h| stripped.contains(h)) {
        return Err(ValidationError::InvalidFormat {
            field: Field::GithubRepo,
            value: raw.to_string(),
            reason: format!("expected a repository on {}", KNOWN_REPO_HOSTS.join(", ")),
        });
    }

    Ok(stripped.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::project::{PipelineManifest, PipelineRecord, ProjectManifest};

    fn manifest(name: &str) -> ProjectManifest {
        ProjectManifest {
            name: name.into(),
            org: "zb".into(),
            kind: "ethereum".into(),
            network: "holesky".into(),
            version: "0.0.1".into(),
            github_repo: "https://github.com/acme/demo".into(),
        }
    }

    fn pipeline(name: &str, dir: &str) -> PipelineRecord {
        PipelineRecord::new(PipelineManifest { name: name.into() }, dir)
    }

    #[test]
    fn valid_record_passes_and_is_canonicalized() {
        let mut project = ProjectRecord::new(manifest("demo"), "demo")
            .with_pipelines(vec![pipeline("transfers", "transfers")]);

        ConfigValidator::validate(&mut project).unwrap();

        assert_eq!(project.version(), "0.0.1");
        assert_eq!(project.github_repo(), "github.com/acme/demo");
        assert_eq!(project.name(), "demo");
    }

    #[test]
    fn name_must_match_directory() {
        let mut project = ProjectRecord::new(manifest("bar"), "foo");
        let err = ConfigValidator::validate(&mut project).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NameMismatch {
                field: Field::ProjectName,
                declared: "bar".into(),
                directory: "foo".into(),
            }
        );

        let mut project = ProjectRecord::new(manifest("foo"), "foo");
        assert!(ConfigValidator::validate(&mut project).is_ok());
    }

    #[test]
    fn empty_name_is_reported_before_mismatch() {
        let mut project = ProjectRecord::new(manifest(""), "foo");
        assert_eq!(
            ConfigValidator::validate(&mut project).unwrap_err(),
            ValidationError::EmptyField {
                field: Field::ProjectName
            }
        );
    }

    #[test]
    fn empty_org_wins_over_bad_version() {
        let mut m = manifest("demo");
        m.org.clear();
        m.version = "1.0".into();
        let mut project = ProjectRecord::new(m, "demo");

        let err = ConfigValidator::validate(&mut project).unwrap_err();
        assert_eq!(err, ValidationError::EmptyField { field: Field::Org });
    }

    #[test]
    fn org_pattern_is_enforced() {
        let mut m = manifest("demo");
        m.org = "acme-inc".into();
        let mut project = ProjectRecord::new(m, "demo");

        let err = ConfigValidator::validate(&mut project).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat {
                field: Field::Org,
                ..
            }
        ));
    }

    #[test]
    fn kind_then_network_are_required() {
        let mut m = manifest("demo");
        m.kind.clear();
        m.network.clear();
        let mut project = ProjectRecord::new(m, "demo");
        assert_eq!(
            ConfigValidator::validate(&mut project).unwrap_err(),
            ValidationError::EmptyField { field: Field::Kind }
        );

        let mut m = manifest("demo");
        m.network.clear();
        let mut project = ProjectRecord::new(m, "demo");
        assert_eq!(
            ConfigValidator::validate(&mut project).unwrap_err(),
            ValidationError::EmptyField {
                field: Field::Network
            }
        );
    }

    #[test]
    fn version_is_normalized() {
        let mut m = manifest("demo");
        m.version = "v1.2.3".into();
        let mut project = ProjectRecord::new(m, "demo");
        ConfigValidator::validate(&mut project).unwrap();
        assert_eq!(project.version(), "1.2.3");
    }

    #[test]
    fn short_version_is_rejected() {
        let mut m = manifest("demo");
        m.version = "1.0".into();
        let mut project = ProjectRecord::new(m, "demo");
        let err = ConfigValidator::validate(&mut project).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat {
                field: Field::Version,
                ref value,
                ..
            } if value == "1.0"
        ));
    }

    #[test]
    fn repo_scheme_is_stripped() {
        for (raw, expected) in [
            ("https://github.com/a/b", "github.com/a/b"),
            ("http://github.com/a/b", "github.com/a/b"),
            ("github.com/a/b", "github.com/a/b"),
        ] {
            let mut m = manifest("demo");
            m.github_repo = raw.into();
            let mut project = ProjectRecord::new(m, "demo");
            ConfigValidator::validate(&mut project).unwrap();
            assert_eq!(project.github_repo(), expected);
        }
    }

    #[test]
    fn repo_without_known_host_is_rejected() {
        for raw in ["https://gitlab.com/a/b", "https://", "not a url"] {
            let mut m = manifest("demo");
            m.github_repo = raw.into();
            let mut project = ProjectRecord::new(m, "demo");
            let err = ConfigValidator::validate(&mut project).unwrap_err();
            assert_eq!(err.field(), &Field::GithubRepo, "input: {raw}");
        }
    }

    #[test]
    fn pipeline_names_must_match_their_folders() {
        let mut project = ProjectRecord::new(manifest("demo"), "demo").with_pipelines(vec![
            pipeline("ok", "ok"),
            pipeline("renamed", "original"),
        ]);

        let err = ConfigValidator::validate(&mut project).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NameMismatch {
                field: Field::PipelineName {
                    dir: "original".into()
                },
                declared: "renamed".into(),
                directory: "original".into(),
            }
        );
    }

    #[test]
    fn empty_pipeline_name_is_reported() {
        let mut project = ProjectRecord::new(manifest("demo"), "demo")
            .with_pipelines(vec![pipeline("", "orphan")]);

        assert_eq!(
            ConfigValidator::validate(&mut project).unwrap_err(),
            ValidationError::EmptyField {
                field: Field::PipelineName {
                    dir: "orphan".into()
                }
            }
        );
    }

    #[test]
    fn project_without_pipelines_is_valid() {
        let mut project = ProjectRecord::new(manifest("demo"), "demo");
        assert!(ConfigValidator::validate(&mut project).is_ok());
        assert!(project.pipelines().is_empty());
    }
}
