//! Implementation of the `sova init` command.
//!
//! Responsibility: turn flags, configured defaults and (when needed) prompt
//! answers into a `ProjectConfig`, call the core project service, and display
//! the result. No business logic lives here.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Local, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use sova_adapters::{LocalFilesystem, SimpleRenderer};
use sova_core::{
    application::{
        GenerationOptions, GenerationResult, GenerationSummary, ProjectService, RollbackPolicy,
    },
    domain::{FeatureToggles, OutputManifest, ProjectConfig, ProjectKind},
    error::SovaError,
};

use crate::{
    cli::InitArgs,
    commands::{open_store, post_generate, prompt},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `sova init` command.
///
/// Dispatch sequence:
/// 1. Resolve name, kind and toggles (flags, then config, then prompts)
/// 2. Build and validate the `ProjectConfig`
/// 3. Early-exit with the planned manifest if `--dry-run`
/// 4. Generate through `ProjectService`
/// 5. Optionally run the Go toolchain (`--tidy`)
/// 6. Print next-steps guidance
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("<prompt>")))]
pub fn execute(args: InitArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let interactive = !args.yes && prompt::is_available();
    let project = build_project_config(&args, &config, interactive)?;
    let root = args.dir.join(project.name());

    debug!(
        kind = %project.kind(),
        module = project.module_path(),
        features = %project.effective_features(),
        root = %root.display(),
        "Project configuration resolved"
    );

    let rollback = RollbackPolicy::from_flag(args.rollback || config.generation.rollback_on_failure);
    let service = ProjectService::new(
        open_store(args.templates.as_deref(), &config)?,
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_options(GenerationOptions::default().with_rollback(rollback));

    if project.features() != project.effective_features() {
        output.warning(&format!(
            "{} projects only support structured logging; other integrations are ignored",
            project.kind()
        ))?;
    }

    if args.dry_run {
        let manifest = service.plan(&project)?;
        return show_plan(&project, &root, &manifest, &output);
    }

    let spinner = output.spinner(&format!("Creating {}...", project.name()));
    let result = service.create(&project, &root);
    spinner.finish_and_clear();

    if !result.is_complete() {
        report_failure(&result, &output)?;
        let err = result.into_result().err().unwrap_or_else(|| SovaError::Internal {
            message: "generation stopped without an error".into(),
        });
        debug!(untouched = err.is_pre_mutation(), "Generation failed");
        return Err(CliError::Core(err));
    }
    info!(files = result.files().len(), "Project generated");

    if args.tidy {
        let spinner = output.spinner("Running go mod tidy...");
        let tidied = post_generate::tidy(&root, &project.kind().blueprint().go_modules(project.features()));
        spinner.finish_and_clear();
        tidied?;
    }

    if output.is_json() {
        output.json(&InitReport::new(&project, &result))?;
        return Ok(());
    }

    show_configuration(&project, &root, &output)?;
    for file in result.files() {
        output.detail(&format!("  created {}", display_relative(file, &root)))?;
    }
    output.success("Project initialized successfully")?;
    print_next_steps(&project, &root, args.tidy, &output)?;
    Ok(())
}

// ── Config construction ───────────────────────────────────────────────────────

/// Merge flags, configured defaults and prompt answers.
///
/// Prompts run only when `interactive` is set and the value is still
/// missing; feature questions are asked only when no `--use-*` flag was given.
pub fn build_project_config(
    args: &InitArgs,
    config: &AppConfig,
    interactive: bool,
) -> CliResult<ProjectConfig> {
    let name = match args.name.as_deref().map(str::trim) {
        Some(name) => name.to_string(),
        None if interactive => prompt::project_name()?,
        None => {
            return Err(CliError::invalid_input(
                "a project name is required when not running interactively",
            ));
        }
    };

    let kind: ProjectKind = match args.kind.map(Into::into).or(config.defaults.kind) {
        Some(kind) => kind,
        None if interactive => prompt::project_kind(None)?,
        None => {
            return Err(CliError::invalid_input(
                "a project type is required: pass --type api or --type cli",
            ));
        }
    };

    let defaults = config.defaults.features();
    let features: FeatureToggles = if args.feature_flags_given() || !interactive {
        args.features_over(defaults)
    } else {
        prompt::features(kind, defaults)?
    };

    let mut builder = ProjectConfig::builder(name)
        .kind(kind)
        .features(features)
        .go_version(config.defaults.go_version.clone())
        .module_prefix(config.defaults.module_prefix.clone())
        .year(current_year());
    if let Some(module) = &args.module {
        builder = builder.module_path(module.clone());
    }

    builder.build().map_err(|e| CliError::Core(e.into()))
}

fn current_year() -> u16 {
    u16::try_from(Local::now().year()).unwrap_or(u16::MAX)
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// JSON body printed on success with `--output-format json`.
#[derive(Debug, Serialize)]
struct InitReport<'a> {
    project: &'a str,
    kind: ProjectKind,
    module_path: &'a str,
    features: Vec<&'static str>,
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    summary: GenerationSummary,
}

impl<'a> InitReport<'a> {
    fn new(project: &'a ProjectConfig, result: &GenerationResult) -> Self {
        Self {
            project: project.name(),
            kind: project.kind(),
            module_path: project.module_path(),
            features: project.effective_features().enabled(),
            generated_at: Utc::now(),
            summary: result.summary(),
        }
    }
}

/// JSON body printed for `--dry-run --output-format json`.
#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    project: &'a str,
    kind: ProjectKind,
    module_path: &'a str,
    root: String,
    directories: Vec<String>,
    files: Vec<PlannedFile>,
}

#[derive(Debug, Serialize)]
struct PlannedFile {
    template: String,
    destination: String,
}

fn show_plan(
    project: &ProjectConfig,
    root: &Path,
    manifest: &OutputManifest,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        output.json(&PlanReport {
            project: project.name(),
            kind: project.kind(),
            module_path: project.module_path(),
            root: root.display().to_string(),
            directories: manifest.directories().iter().map(ToString::to_string).collect(),
            files: manifest
                .mappings()
                .iter()
                .map(|m| PlannedFile {
                    template: m.template.to_string(),
                    destination: m.destination.to_string(),
                })
                .collect(),
        })?;
        return Ok(());
    }

    output.info(&format!(
        "Dry run: would create '{}' at {}",
        project.name(),
        root.display()
    ))?;
    output.print(&format!("  Type:     {}", project.kind()))?;
    output.print(&format!("  Module:   {}", project.module_path()))?;
    output.print(&format!("  Features: {}", project.effective_features()))?;
    output.print("")?;
    output.header("Directories")?;
    for dir in manifest.directories() {
        output.print(&format!("  {dir}/"))?;
    }
    output.header("Files")?;
    for mapping in manifest.mappings() {
        output.print(&format!(
            "  {:<28} <- {}",
            mapping.destination.to_string(),
            mapping.template
        ))?;
    }
    Ok(())
}

fn show_configuration(project: &ProjectConfig, root: &Path, out: &OutputManager) -> CliResult<()> {
    out.header(&format!("Created '{}'", project.name()))?;
    out.print(&format!("  Type:     {}", project.kind()))?;
    out.print(&format!("  Module:   {}", project.module_path()))?;
    out.print(&format!("  Go:       {}", project.go_version()))?;
    out.print(&format!("  Features: {}", project.effective_features()))?;
    out.print(&format!("  Location: {}", root.display()))?;
    out.print("")?;
    Ok(())
}

/// What reached the disk before the failure.
fn report_failure(result: &GenerationResult, output: &OutputManager) -> CliResult<()> {
    debug!(state = %result.state(), "Generation did not complete");
    if output.is_json() {
        output.json(&result.summary())?;
        return Ok(());
    }

    if result.was_rolled_back() {
        output.warning(&format!(
            "Removed the partial project at {}",
            result.root().display()
        ))?;
    } else if !result.files().is_empty() {
        output.warning(&format!(
            "{} file(s) were written before the failure:",
            result.files().len()
        ))?;
        for file in result.files() {
            output.detail(&format!("  {}", display_relative(file, result.root())))?;
        }
    }
    if let Some(err) = result.rollback_error() {
        output.warning(&format!("Cleanup failed: {err}"))?;
    }
    Ok(())
}

fn print_next_steps(
    project: &ProjectConfig,
    root: &Path,
    tidied: bool,
    out: &OutputManager,
) -> CliResult<()> {
    if out.is_quiet() {
        return Ok(());
    }
    out.print("")?;
    out.print("Next steps:")?;
    out.print(&format!("  cd {}", root.display()))?;
    if !tidied {
        out.print("  go mod tidy")?;
    }
    match project.kind() {
        ProjectKind::Api => {
            if project.effective_features().needs_services() {
                out.print("  docker compose up -d")?;
            }
            out.print("  go run main.go")?;
            out.print("")?;
            out.print("Your API will be available at http://localhost:8080")?;
            out.print("Test the ping endpoint: curl http://localhost:8080/api/v1/ping")?;
        }
        ProjectKind::Cli => {
            out.print("  go run main.go")?;
            out.print("")?;
            out.print("Try your CLI commands:")?;
            out.print("  go run main.go --help")?;
            out.print(&format!("  go build -o {0} && ./{0} version", project.name()))?;
        }
    }
    Ok(())
}

fn display_relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| PathBuf::from(path))
        .display()
        .to_string()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn init_args(argv: &[&str]) -> InitArgs {
        let mut full = vec!["sova", "init"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            Commands::Init(args) => args,
            other => panic!("expected init, got {other:?}"),
        }
    }

    #[test]
    fn flags_build_a_config_without_prompting() {
        let args = init_args(&["shop", "--type", "api", "--use-postgres"]);
        let project = build_project_config(&args, &AppConfig::default(), false).unwrap();

        assert_eq!(project.name(), "shop");
        assert_eq!(project.kind(), ProjectKind::Api);
        assert_eq!(project.module_path(), "github.com/example/shop");
        assert!(project.features().relational_db);
        assert!(!project.features().cache);
    }

    #[test]
    fn config_defaults_fill_missing_values() {
        let mut config = AppConfig::default();
        config.defaults.kind = Some(ProjectKind::Cli);
        config.defaults.module_prefix = "gitlab.com/acme/".into();
        config.defaults.use_zap = true;

        let project = build_project_config(&init_args(&["tool"]), &config, false).unwrap();

        assert_eq!(project.kind(), ProjectKind::Cli);
        assert_eq!(project.module_path(), "gitlab.com/acme/tool");
        assert!(project.features().structured_logger);
    }

    #[test]
    fn explicit_module_path_wins() {
        let args = init_args(&["tool", "-t", "cli", "--module", "example.org/x/tool"]);
        let project = build_project_config(&args, &AppConfig::default(), false).unwrap();
        assert_eq!(project.module_path(), "example.org/x/tool");
    }

    #[test]
    fn missing_name_without_terminal_is_rejected() {
        let err = build_project_config(&init_args(&["-t", "api"]), &AppConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, CliError::InvalidInput { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_kind_without_terminal_is_rejected() {
        let err =
            build_project_config(&init_args(&["demo"]), &AppConfig::default(), false).unwrap_err();
        assert!(err.to_string().contains("--type"));
    }

    #[test]
    fn invalid_name_surfaces_core_error() {
        let err = build_project_config(&init_args(&[".hidden", "-t", "cli"]), &AppConfig::default(), false)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid project name"));
    }

    #[test]
    fn relative_display_strips_root() {
        let root = Path::new("/tmp/demo");
        assert_eq!(display_relative(&root.join("cmd/root.go"), root), "cmd/root.go");
        assert_eq!(display_relative(Path::new("/elsewhere/x"), root), "/elsewhere/x");
    }
}
