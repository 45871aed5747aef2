//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `SOVA_<SECTION>__<KEY>`, e.g.
//!    `SOVA_DEFAULTS__MODULE_PREFIX=github.com/acme`
//! 3. Config file (`--config FILE`, or the platform config directory)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};
use sova_core::domain::{DEFAULT_GO_VERSION, DEFAULT_MODULE_PREFIX, FeatureToggles, ProjectKind};
use tracing::debug;

use crate::cli::OutputFormat;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "SOVA";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default values for new projects.
    pub defaults: Defaults,
    /// Output settings.
    pub output: OutputConfig,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Generation behaviour.
    pub generation: GenerationConfig,
    /// Log file settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    /// Project type used when `--type` is absent; prompts when unset.
    pub kind: Option<ProjectKind>,
    pub module_prefix: String,
    pub go_version: String,
    pub use_zap: bool,
    pub use_postgres: bool,
    pub use_redis: bool,
    pub use_rabbitmq: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            kind: None,
            module_prefix: DEFAULT_MODULE_PREFIX.into(),
            go_version: DEFAULT_GO_VERSION.into(),
            use_zap: false,
            use_postgres: false,
            use_redis: false,
            use_rabbitmq: false,
        }
    }
}

impl Defaults {
    pub fn features(&self) -> FeatureToggles {
        FeatureToggles::none()
            .with_structured_logger(self.use_zap)
            .with_relational_db(self.use_postgres)
            .with_cache(self.use_redis)
            .with_message_queue(self.use_rabbitmq)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// Used when `--output-format` is left at `auto`.
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// On-disk catalog replacing the built-in templates.
    pub local_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub rollback_on_failure: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs to this file.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `SOVA_*`
    /// environment variables.
    ///
    /// An explicit `config_file` must exist; the default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        debug!(path = %path.display(), required, "Loading configuration");

        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.sova.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "sova", "sova")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".sova.toml"))
    }

    /// The file `--config` points at, or the default location.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file.map_or_else(Self::config_path, Path::to_path_buf)
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }

    /// Look up a dotted key such as `defaults.module_prefix`.
    ///
    /// Returns `None` for unknown keys; unset optional values render as an
    /// empty string.
    pub fn get(&self, key: &str) -> Option<String> {
        let tree = serde_json::to_value(self).ok()?;
        let pointer = format!("/{}", key.replace('.', "/"));
        match tree.pointer(&pointer)? {
            serde_json::Value::Null => Some(String::new()),
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Object(_) => None,
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn default_module_prefix() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.defaults.module_prefix, "github.com/example");
        assert_eq!(cfg.defaults.kind, None);
        assert_eq!(cfg.defaults.features(), FeatureToggles::none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
        assert!(!AppConfig::default().generation.rollback_on_failure);
    }

    #[test]
    fn file_values_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sova.toml");
        fs::write(
            &path,
            "[defaults]\nkind = \"api\"\nmodule_prefix = \"gitlab.com/acme\"\nuse_redis = true\n\n\
             [generation]\nrollback_on_failure = true\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.defaults.kind, Some(ProjectKind::Api));
        assert_eq!(cfg.defaults.module_prefix, "gitlab.com/acme");
        assert!(cfg.defaults.features().cache);
        assert_eq!(cfg.defaults.go_version, DEFAULT_GO_VERSION);
        assert!(cfg.generation.rollback_on_failure);
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&tmp.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[defaults\nkind = ").unwrap();
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn toml_round_trips_through_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("sova.toml");
        let mut cfg = AppConfig::default();
        cfg.defaults.use_zap = true;
        cfg.output.format = OutputFormat::Plain;
        fs::write(&path, cfg.to_toml().unwrap()).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap(), cfg);
    }

    #[test]
    fn get_dotted_keys() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.get("defaults.module_prefix").as_deref(), Some("github.com/example"));
        assert_eq!(cfg.get("output.no_color").as_deref(), Some("false"));
        assert_eq!(cfg.get("templates.local_path").as_deref(), Some(""));
        assert_eq!(cfg.get("does.not.exist"), None);
        assert_eq!(cfg.get("defaults"), None);
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
