//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `ZRUNNER_<SECTION>__<KEY>`, e.g.
//!    `ZRUNNER_DEPLOY__TIMEOUT_SECS=60`
//! 3. Config file (`--config FILE`, else [`AppConfig::config_path`] if present)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::{Context, ensure};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use zrunner_core::domain::DEFAULT_DEPENDENCY;

/// Hosted deployment service.
pub const DEFAULT_ENDPOINT: &str =
    "https://qugate-dev.prod-czff.zettablock.dev/api/v1/zrunner/pipeline";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = zrunner_adapters::http::DEFAULT_TIMEOUT.as_secs();

/// Prefix for environment overrides.
const ENV_PREFIX: &str = "ZRUNNER";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment service settings.
    pub deploy: DeployConfig,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    /// Module path in `go.mod` whose version is reported as `zsource_version`.
    pub dependency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Directory of `*.tmpl` files replacing the built-in templates by name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deploy: DeployConfig {
                endpoint: DEFAULT_ENDPOINT.into(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
                dependency: DEFAULT_DEPENDENCY.into(),
            },
            output: OutputConfig {
                no_color: false,
                format: "auto".into(),
            },
            templates: TemplateConfig { local_path: None },
        }
    }
}

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// `config_file` is the path passed via `--config`; it must exist unless
    /// `allow_missing` is set. Without it the default location is read when
    /// present and skipped otherwise.
    pub fn load(config_file: Option<&Path>, allow_missing: bool) -> anyhow::Result<Self> {
        let default_path = Self::config_path();
        let (path, required) = match config_file {
            Some(path) => (path, !allow_missing),
            None => (default_path.as_path(), false),
        };
        Self::load_from(path, required, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_from(path: &Path, required: bool, env: Environment) -> anyhow::Result<Self> {
        let defaults =
            Config::try_from(&Self::default()).context("Failed to encode default configuration")?;

        let config: Self = Config::builder()
            .add_source(defaults)
            .add_source(File::from(path).format(FileFormat::Toml).required(required))
            .add_source(env.prefix_separator("_").separator("__").try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?
            .try_deserialize()
            .context("Invalid configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject values that deserialize fine but cannot be used.
    fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.deploy.timeout_secs > 0,
            "Invalid configuration: deploy.timeout_secs must be at least 1"
        );
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.zrunner.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "zettablock", "zrunner")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".zrunner.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_point_at_hosted_service() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.deploy.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.deploy.timeout_secs, 30);
        assert_eq!(cfg.deploy.dependency, "github.com/Zettablock/zsource");
        assert!(!cfg.output.no_color);
        assert!(cfg.templates.local_path.is_none());
    }

    #[test]
    fn missing_optional_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let cfg = AppConfig::load_from(&temp.path().join("absent.toml"), false, no_env()).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn missing_required_file_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(AppConfig::load_from(&temp.path().join("absent.toml"), true, no_env()).is_err());
    }

    #[test]
    fn file_overrides_defaults_per_key() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[deploy]\ntimeout_secs = 5\n\n[templates]\nlocal_path = \"/opt/tmpl\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load_from(&path, true, no_env()).unwrap();
        assert_eq!(cfg.deploy.timeout_secs, 5);
        assert_eq!(cfg.deploy.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.templates.local_path, Some(PathBuf::from("/opt/tmpl")));
    }

    #[test]
    fn environment_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[deploy]\nendpoint = \"http://file.invalid\"\n").unwrap();

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([
            (
                "ZRUNNER_DEPLOY__ENDPOINT".to_string(),
                "http://env.invalid".to_string(),
            ),
            ("ZRUNNER_DEPLOY__TIMEOUT_SECS".to_string(), "12".to_string()),
        ])));

        let cfg = AppConfig::load_from(&path, true, env).unwrap();
        assert_eq!(cfg.deploy.endpoint, "http://env.invalid");
        assert_eq!(cfg.deploy.timeout_secs, 12);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[deploy]\ntimeout_secs = 0\n").unwrap();

        let err = AppConfig::load_from(&path, true, no_env()).unwrap_err();
        assert!(format!("{err:#}").contains("timeout_secs"));

        let env = Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::from([(
            "ZRUNNER_DEPLOY__TIMEOUT_SECS".to_string(),
            "0".to_string(),
        )])));
        assert!(AppConfig::load_from(&temp.path().join("absent.toml"), false, env).is_err());
    }

    #[test]
    fn defaults_serialise_to_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(text.contains("[deploy]"));
        assert!(text.contains("timeout_secs = 30"));
        assert!(!text.contains("local_path"));
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
