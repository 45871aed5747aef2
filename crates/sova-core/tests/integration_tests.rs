//! Integration tests for sova-core using the real adapters.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use sova_adapters::{DirectoryStore, InMemoryStore, LocalFilesystem, MemoryFilesystem, SimpleRenderer};
use sova_core::{
    application::{ApplicationError, GenerationOptions},
    domain::{DomainError, render},
    prelude::*,
};
use tempfile::TempDir;

fn builtin() -> Arc<dyn TemplateStore> {
    Arc::new(InMemoryStore::with_builtin().unwrap())
}

fn local_service() -> ProjectService {
    ProjectService::new(builtin(), Box::new(SimpleRenderer::new()), Box::new(LocalFilesystem::new()))
}

fn config(name: &str, kind: ProjectKind, features: FeatureToggles) -> ProjectConfig {
    ProjectConfig::builder(name)
        .kind(kind)
        .features(features)
        .year(2026)
        .build()
        .unwrap()
}

fn tree(root: &Path) -> Vec<(String, String)> {
    let mut entries = Vec::new();
    for entry in walk(root) {
        let content = fs::read_to_string(&entry).unwrap_or_default();
        entries.push((entry.strip_prefix(root).unwrap().display().to_string(), content));
    }
    entries.sort();
    entries
}

fn walk(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            out.extend(walk(&path));
        } else {
            out.push(path);
        }
    }
    out
}

// ── Scenario: cli project ─────────────────────────────────────────────────────

#[test]
fn cli_project_is_generated_completely() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("demo");

    let result = local_service().create(&config("demo", ProjectKind::Cli, FeatureToggles::none()), &root);

    assert!(result.is_complete(), "{:?}", result.error());
    assert_eq!(result.files().len(), 6);
    for file in result.files() {
        let content = fs::read_to_string(file).unwrap();
        assert!(!content.is_empty(), "{} is empty", file.display());
    }

    let main = fs::read_to_string(root.join("main.go")).unwrap();
    assert!(main.contains("import \"github.com/example/demo/cmd\""));
    let go_mod = fs::read_to_string(root.join("go.mod")).unwrap();
    assert!(go_mod.starts_with("module github.com/example/demo\n"));
    assert!(go_mod.contains("github.com/spf13/cobra"));
    let readme = fs::read_to_string(root.join("README.md")).unwrap();
    assert!(readme.contains("Copyright (c) 2026"));
    assert!(root.join("cmd/root.go").is_file());
    assert!(!root.join("internal").exists());
}

#[test]
fn cli_logger_toggle_adds_logger_package() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("tool");
    let features = FeatureToggles::none().with_structured_logger(true);

    let result = local_service().create(&config("tool", ProjectKind::Cli, features), &root);

    assert!(result.is_complete());
    assert!(root.join("internal/logger/logger.go").is_file());
    let go_mod = fs::read_to_string(root.join("go.mod")).unwrap();
    assert!(go_mod.contains("go.uber.org/zap"));
}

// ── Scenario: repeat run ──────────────────────────────────────────────────────

#[test]
fn second_run_reports_directory_exists_and_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("demo");
    let cfg = config("demo", ProjectKind::Cli, FeatureToggles::none());

    assert!(local_service().create(&cfg, &root).is_complete());
    fs::write(root.join("main.go"), "edited").unwrap();
    let before = tree(&root);

    let second = local_service().create(&cfg, &root);

    assert!(matches!(
        second.error(),
        Some(SovaError::Application(ApplicationError::DirectoryExists { .. }))
    ));
    assert_eq!(second.error().unwrap().to_string(), format!("Directory {} already exists", root.display()));
    assert!(second.files().is_empty());
    assert_eq!(tree(&root), before);
}

// ── Scenario: resolve ─────────────────────────────────────────────────────────

#[test]
fn resolve_cases_against_builtin_and_directory_stores() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("api")).unwrap();
    fs::write(tmp.path().join("api/main.tpl"), "package main").unwrap();

    let stores: Vec<Arc<dyn TemplateStore>> =
        vec![builtin(), Arc::new(DirectoryStore::new(tmp.path()).unwrap())];

    for store in stores {
        assert!(store.resolve("api", "main.tpl").unwrap().body.contains("package main"));
        assert!(matches!(
            store.resolve("api", "../../etc/passwd"),
            Err(SovaError::Domain(DomainError::InvalidName { .. }))
        ));
        assert!(matches!(
            store.resolve("desktop", "main.tpl"),
            Err(SovaError::Application(ApplicationError::UnknownCategory { .. }))
        ));
        assert!(matches!(
            store.resolve("api", "missing.tpl"),
            Err(SovaError::Application(ApplicationError::TemplateNotFound { .. }))
        ));
    }
}

// ── Scenario: render ──────────────────────────────────────────────────────────

#[test]
fn render_cases() {
    let params = ParameterSet::new().with("name", "World");
    assert_eq!(render("Hello {{name}}", &params).unwrap(), "Hello World");
    assert_eq!(
        render("Hello {{name}}", &ParameterSet::new()).unwrap_err(),
        DomainError::MissingParameter { name: "name".into() }
    );
}

// ── Scenario: api with relational DB ──────────────────────────────────────────

#[test]
fn api_with_relational_db_adds_database_package() {
    let tmp = TempDir::new().unwrap();
    let base_root = tmp.path().join("plain");
    let db_root = tmp.path().join("shop");

    let base = local_service().create(&config("plain", ProjectKind::Api, FeatureToggles::none()), &base_root);
    let with_db = local_service().create(
        &config("shop", ProjectKind::Api, FeatureToggles::none().with_relational_db(true)),
        &db_root,
    );

    assert!(base.is_complete() && with_db.is_complete());
    assert!(!base_root.join("internal/database/postgres.go").exists());
    assert!(db_root.join("internal/database/postgres.go").is_file());
    assert!(db_root.join("docker-compose.yml").is_file());
    assert!(with_db.files().len() > base.files().len());

    let main = fs::read_to_string(db_root.join("main.go")).unwrap();
    assert!(main.contains("\"github.com/example/shop/internal/database\""));
    assert!(main.contains("database.Connect(cfg.DatabaseURL)"));
    let go_mod = fs::read_to_string(db_root.join("go.mod")).unwrap();
    assert!(go_mod.contains("github.com/jackc/pgx/v5"));
    let env = fs::read_to_string(db_root.join(".env.example")).unwrap();
    assert!(env.contains("DATABASE_URL="));
}

#[test]
fn api_with_every_service_renders_without_leftover_placeholders() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("full");
    let features = FeatureToggles::none()
        .with_structured_logger(true)
        .with_relational_db(true)
        .with_cache(true)
        .with_message_queue(true);

    let result = local_service().create(&config("full", ProjectKind::Api, features), &root);

    assert!(result.is_complete(), "{:?}", result.error());
    for (path, content) in tree(&root) {
        assert!(!content.contains("{{"), "{path} still has a placeholder");
    }
    let compose = fs::read_to_string(root.join("docker-compose.yml")).unwrap();
    for service in ["postgres:", "redis:", "rabbitmq:"] {
        assert!(compose.contains(service));
    }
}

// ── Partial failure ───────────────────────────────────────────────────────────

#[test]
fn partial_failure_reports_files_written_before_the_failure() {
    let fs = MemoryFilesystem::new();
    // main.go, go.mod, README.md succeed; cmd/root.go (4th) fails.
    fs.deny_writes_under("/out/demo/cmd");

    let service = ProjectService::new(builtin(), Box::new(SimpleRenderer::new()), Box::new(fs.clone()));
    let result = service.create(&config("demo", ProjectKind::Cli, FeatureToggles::none()), "/out/demo");

    assert_eq!(result.state(), GenerationState::Failed { at: Some(4) });
    assert_eq!(result.files().len(), 3);
    assert_eq!(fs.list_files().len(), 3);
    assert!(!fs.exists(Path::new("/out/demo/.gitignore")));
    assert!(
        result
            .error()
            .unwrap()
            .suggestions()
            .iter()
            .any(|s| s.contains("partial project"))
    );
}

#[test]
fn render_failure_names_template_and_parameter() {
    let store = InMemoryStore::with_builtin().unwrap();
    store.insert("cli", "root.tpl", "{{ Bogus }}").unwrap();
    let fs = MemoryFilesystem::new();

    let service = ProjectService::new(Arc::new(store), Box::new(SimpleRenderer::new()), Box::new(fs.clone()));
    let result = service.create(&config("demo", ProjectKind::Cli, FeatureToggles::none()), "/out/demo");

    assert_eq!(result.state(), GenerationState::Failed { at: Some(4) });
    assert_eq!(fs.list_files().len(), 3);
    assert!(fs.list_directories().contains(&PathBuf::from("/out/demo/cmd")));
    let message = result.error().unwrap().to_string();
    assert!(message.contains("cli/root.tpl"), "{message}");
    assert!(message.contains("Bogus"), "{message}");
    assert!(matches!(
        result.error(),
        Some(SovaError::Application(ApplicationError::RenderFailed { .. }))
    ));
}

#[test]
fn remove_partial_leaves_nothing_behind() {
    let fs = MemoryFilesystem::new();
    fs.deny_writes_under("/out/demo/cmd");

    let service = ProjectService::new(builtin(), Box::new(SimpleRenderer::new()), Box::new(fs.clone()))
        .with_options(GenerationOptions::default().with_rollback(RollbackPolicy::RemovePartial));
    let result = service.create(&config("demo", ProjectKind::Cli, FeatureToggles::none()), "/out/demo");

    assert!(result.was_rolled_back());
    assert!(result.files().is_empty());
    assert!(fs.list_files().is_empty());
    assert!(!fs.exists(Path::new("/out/demo")));
}

#[test]
fn incomplete_directory_catalog_fails_before_writing() {
    let catalog = TempDir::new().unwrap();
    fs::create_dir_all(catalog.path().join("cli")).unwrap();
    fs::write(catalog.path().join("cli/main.tpl"), "package main").unwrap();

    let out = TempDir::new().unwrap();
    let root = out.path().join("demo");
    let service = ProjectService::new(
        Arc::new(DirectoryStore::new(catalog.path()).unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    let result = service.create(&config("demo", ProjectKind::Cli, FeatureToggles::none()), &root);

    assert!(matches!(
        result.error(),
        Some(SovaError::Application(ApplicationError::TemplateNotFound { .. }))
    ));
    assert!(!root.exists());
}

#[test]
fn catalog_lists_builtin_categories() {
    let catalog = TemplateService::new(builtin()).catalog().unwrap();
    let kinds: Vec<_> = catalog.iter().filter_map(|c| c.kind).collect();
    assert_eq!(kinds, [ProjectKind::Api, ProjectKind::Cli]);
    assert!(TemplateService::new(builtin()).ensure_complete(ProjectKind::Api).is_ok());
}
