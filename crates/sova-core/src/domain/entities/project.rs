//! The `ProjectConfig` aggregate and its typestate builder.
//!
//! A `ProjectConfig` is the complete, immutable description of one project
//! to generate. It replaces process-wide flags: everything the pipeline needs
//! is threaded through this value.
//!
//! # Typestate builder
//!
//! The builder uses two phantom marker types (`NoKind` / `HasKind`) so that
//! `build()` only exists once a kind has been chosen. Runtime validation of
//! the name and module path still happens at `build()`.

use std::fmt;
use std::marker::PhantomData;

use crate::domain::{
    blueprint,
    entities::ParameterSet,
    error::DomainError,
    validation::DomainValidator,
    value_objects::{FeatureToggles, ProjectKind},
};

/// Module prefix used when no module path is supplied.
pub const DEFAULT_MODULE_PREFIX: &str = "github.com/example";

/// Go toolchain version written to `go.mod`.
pub const DEFAULT_GO_VERSION: &str = "1.22";

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-validated project description.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectConfig {
    name: String,
    module_path: String,
    kind: ProjectKind,
    features: FeatureToggles,
    go_version: String,
    year: u16,
}

impl ProjectConfig {
    /// Start building a config for a project called `name`.
    pub fn builder(name: impl Into<String>) -> ProjectConfigBuilder<NoKind> {
        ProjectConfigBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn module_path(&self) -> &str {
        &self.module_path
    }

    pub const fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Toggles as requested by the caller.
    pub const fn features(&self) -> FeatureToggles {
        self.features
    }

    /// Toggles the chosen kind actually supports.
    pub fn effective_features(&self) -> FeatureToggles {
        blueprint::for_kind(self.kind).effective(self.features)
    }

    pub fn go_version(&self) -> &str {
        &self.go_version
    }

    /// Copyright year written into generated files.
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Build the parameter set for this project.
    pub fn parameters(&self) -> ParameterSet {
        blueprint::parameters(self)
    }
}

impl fmt::Display for ProjectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, module {}, features: {})",
            self.name, self.kind, self.module_path, self.features
        )
    }
}

// ── Typestate markers ─────────────────────────────────────────────────────────

/// Marker: kind has not yet been set.
pub struct NoKind;
/// Marker: kind has been set; the config can be built.
pub struct HasKind;

// ── Builder ───────────────────────────────────────────────────────────────────

/// Typestate builder for [`ProjectConfig`].
pub struct ProjectConfigBuilder<K> {
    name: String,
    kind: Option<ProjectKind>,
    module_path: Option<String>,
    module_prefix: Option<String>,
    features: FeatureToggles,
    go_version: Option<String>,
    year: Option<u16>,
    _marker: PhantomData<K>,
}

impl ProjectConfigBuilder<NoKind> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            module_path: None,
            module_prefix: None,
            features: FeatureToggles::none(),
            go_version: None,
            year: None,
            _marker: PhantomData,
        }
    }

    /// Set the project kind. This transitions the builder to `HasKind`.
    pub fn kind(self, kind: ProjectKind) -> ProjectConfigBuilder<HasKind> {
        ProjectConfigBuilder {
            name: self.name,
            kind: Some(kind),
            module_path: self.module_path,
            module_prefix: self.module_prefix,
            features: self.features,
            go_version: self.go_version,
            year: self.year,
            _marker: PhantomData,
        }
    }
}

impl<K> ProjectConfigBuilder<K> {
    /// Use an explicit module path instead of `<prefix>/<name>`.
    pub fn module_path(mut self, path: impl Into<String>) -> Self {
        self.module_path = Some(path.into());
        self
    }

    /// Override the prefix used to derive the module path.
    pub fn module_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.module_prefix = Some(prefix.into());
        self
    }

    pub fn features(mut self, features: FeatureToggles) -> Self {
        self.features = features;
        self
    }

    pub fn go_version(mut self, version: impl Into<String>) -> Self {
        self.go_version = Some(version.into());
        self
    }

    /// Pin the year instead of reading the system clock.
    pub fn year(mut self, year: u16) -> Self {
        self.year = Some(year);
        self
    }
}

impl ProjectConfigBuilder<HasKind> {
    /// Validate and build.
    ///
    /// # Errors
    /// - `InvalidProjectName` if the name cannot be a directory and package name
    /// - `InvalidName` if an explicit module path or Go version is malformed
    pub fn build(self) -> Result<ProjectConfig, DomainError> {
        let kind = self
            .kind
            .ok_or(DomainError::MissingRequiredField { field: "kind" })?;

        DomainValidator::validate_project_name(&self.name)?;

        let module_path = match self.module_path {
            Some(path) => path.trim().to_string(),
            None => {
                let prefix = self
                    .module_prefix
                    .as_deref()
                    .unwrap_or(DEFAULT_MODULE_PREFIX)
                    .trim_end_matches('/');
                if prefix.is_empty() {
                    self.name.clone()
                } else {
                    format!("{prefix}/{}", self.name)
                }
            }
        };
        DomainValidator::validate_module_path(&module_path)?;

        let go_version = self
            .go_version
            .unwrap_or_else(|| DEFAULT_GO_VERSION.to_string());
        DomainValidator::validate_go_version(&go_version)?;

        Ok(ProjectConfig {
            name: self.name,
            module_path,
            kind,
            features: self.features,
            go_version,
            year: self.year.unwrap_or_else(current_year),
        })
    }
}

/// Current UTC year from the system clock.
fn current_year() -> u16 {
    const SECS_PER_DAY: u64 = 86_400;
    let days = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() / SECS_PER_DAY)
        .unwrap_or_default() as i64;

    // Civil-from-days over 400-year eras.
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1_460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);
    u16::try_from(year).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_path_defaults_to_example_prefix() {
        let cfg = ProjectConfig::builder("demo")
            .kind(ProjectKind::Cli)
            .build()
            .unwrap();
        assert_eq!(cfg.module_path(), "github.com/example/demo");
        assert_eq!(cfg.go_version(), DEFAULT_GO_VERSION);
        assert!(cfg.year() >= 2024);
    }

    #[test]
    fn pinned_year_is_kept() {
        let cfg = ProjectConfig::builder("demo")
            .kind(ProjectKind::Cli)
            .year(2031)
            .build()
            .unwrap();
        assert_eq!(cfg.year(), 2031);
    }

    #[test]
    fn module_prefix_override() {
        let cfg = ProjectConfig::builder("demo")
            .module_prefix("gitlab.com/acme/")
            .kind(ProjectKind::Api)
            .build()
            .unwrap();
        assert_eq!(cfg.module_path(), "gitlab.com/acme/demo");
    }

    #[test]
    fn explicit_module_path_wins() {
        let cfg = ProjectConfig::builder("demo")
            .kind(ProjectKind::Api)
            .module_prefix("ignored.dev")
            .module_path("example.org/svc")
            .build()
            .unwrap();
        assert_eq!(cfg.module_path(), "example.org/svc");
    }

    #[test]
    fn invalid_project_names_are_rejected() {
        for name in ["", ".hidden", "a/b", "a\\b", "has space", "{{x}}"] {
            let result = ProjectConfig::builder(name).kind(ProjectKind::Cli).build();
            assert!(
                matches!(result, Err(DomainError::InvalidProjectName { .. })),
                "accepted {name:?}"
            );
        }
    }

    #[test]
    fn invalid_module_path_is_rejected() {
        let result = ProjectConfig::builder("demo")
            .kind(ProjectKind::Cli)
            .module_path("has space/x")
            .build();
        assert!(matches!(result, Err(DomainError::InvalidName { .. })));
    }

    #[test]
    fn cli_ignores_service_toggles() {
        let cfg = ProjectConfig::builder("demo")
            .kind(ProjectKind::Cli)
            .features(FeatureToggles::none().with_relational_db(true).with_structured_logger(true))
            .build()
            .unwrap();
        let effective = cfg.effective_features();
        assert!(effective.structured_logger);
        assert!(!effective.relational_db);
        assert!(cfg.features().relational_db);
    }
}
