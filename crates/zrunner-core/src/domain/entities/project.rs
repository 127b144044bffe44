//! Project and pipeline records.
//!
//! A record is built from the deserialized manifest plus the name of the
//! directory the manifest was found in. Records live for one invocation: they
//! are loaded from disk, validated, projected into a payload and dropped.

use std::fmt;

use serde::{Deserialize, Deserializer, de};

// ── Manifest shapes ──────────────────────────────────────────────────────────

/// Fields read from `project.yml`.
///
/// Unknown keys are ignored and missing keys default to the empty string;
/// emptiness is the validator's business, not the parser's.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectManifest {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub org: String,
    #[serde(deserialize_with = "scalar_string")]
    pub kind: String,
    #[serde(deserialize_with = "scalar_string")]
    pub network: String,
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(rename = "githubRepo", deserialize_with = "scalar_string")]
    pub github_repo: String,
}

/// Fields read from `pipeline.yml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PipelineManifest {
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
}

/// Accept any scalar (string, number, bool) as the text it was written as.
///
/// `version: 1.10` and `name: 2024` are legal YAML; they reach the validator
/// spelled exactly as in the file instead of as a reformatted number. A null
/// value reads as the empty string.
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> de::Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a scalar value")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<String, D::Error> {
            d.deserialize_str(self)
        }
    }

    deserializer.deserialize_option(ScalarVisitor)
}

// ── Records ──────────────────────────────────────────────────────────────────

/// One pipeline of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRecord {
    pub(crate) name: String,
    pub(crate) source_dir: String,
}

impl PipelineRecord {
    pub fn new(manifest: PipelineManifest, source_dir: impl Into<String>) -> Self {
        Self {
            name: manifest.name,
            source_dir: source_dir.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Basename of the directory holding this pipeline's manifest.
    pub fn source_dir(&self) -> &str {
        &self.source_dir
    }
}

/// Identity of one project and the pipelines it owns.
///
/// `name` is fixed at load time. Validation may rewrite `version` and
/// `github_repo` into their canonical forms and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub(crate) name: String,
    pub(crate) dir: String,
    pub(crate) org: String,
    pub(crate) kind: String,
    pub(crate) network: String,
    pub(crate) version: String,
    pub(crate) github_repo: String,
    pub(crate) resolved_dependency_version: String,
    pub(crate) pipelines: Vec<PipelineRecord>,
}

impl ProjectRecord {
    pub fn new(manifest: ProjectManifest, dir: impl Into<String>) -> Self {
        Self {
            name: manifest.name,
            dir: dir.into(),
            org: manifest.org,
            kind: manifest.kind,
            network: manifest.network,
            version: manifest.version,
            github_repo: manifest.github_repo,
            resolved_dependency_version: String::new(),
            pipelines: Vec::new(),
        }
    }

    pub fn with_pipelines(mut self, pipelines: Vec<PipelineRecord>) -> Self {
        self.pipelines = pipelines;
        self
    }

    pub fn push_pipeline(&mut self, pipeline: PipelineRecord) {
        self.pipelines.push(pipeline);
    }

    pub fn set_resolved_dependency_version(&mut self, version: impl Into<String>) {
        self.resolved_dependency_version = version.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Basename of the directory holding `project.yml`.
    pub fn dir(&self) -> &str {
        &self.dir
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn github_repo(&self) -> &str {
        &self.github_repo
    }

    pub fn resolved_dependency_version(&self) -> &str {
        &self.resolved_dependency_version
    }

    pub fn pipelines(&self) -> &[PipelineRecord] {
        &self.pipelines
    }
}
