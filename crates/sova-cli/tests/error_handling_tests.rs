//! Tests for error handling, exit codes and suggestions.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sova(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sova").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("SOVA_TEMPLATES_DIR");
    cmd
}

/// A `cli` catalog whose templates are all plain text, with `main.tpl`
/// replaced by `main_body`.
fn write_cli_catalog(root: &Path, main_body: &str) {
    let dir = root.join("cli");
    fs::create_dir_all(&dir).unwrap();
    for name in ["go-mod.tpl", "readme.tpl", "root.tpl", "version.tpl", "gitignore.tpl"] {
        fs::write(dir.join(name), "static\n").unwrap();
    }
    fs::write(dir.join("main.tpl"), main_body).unwrap();
}

#[test]
fn test_invalid_project_name() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["init", ".hidden", "-t", "cli", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!tmp.path().join(".hidden").exists());
}

#[test]
fn test_existing_directory_is_not_touched() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("demo")).unwrap();
    fs::write(tmp.path().join("demo/keep.txt"), "mine").unwrap();

    sova(tmp.path())
        .args(["init", "demo", "-t", "cli", "-y", "--rollback"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));

    assert_eq!(fs::read_to_string(tmp.path().join("demo/keep.txt")).unwrap(), "mine");
    assert!(!tmp.path().join("demo/main.go").exists());
}

#[test]
fn test_failed_init_reports_only_the_error() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("demo")).unwrap();

    sova(tmp.path())
        .args(["init", "demo", "-t", "cli", "-y"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Created").not())
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("WARN").not());
}

#[test]
fn test_missing_name_without_terminal() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["init", "-t", "api"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("project name is required"));
}

#[test]
fn test_missing_type_without_terminal() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["init", "demo", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--type"));
}

#[test]
fn test_unknown_type_is_a_usage_error() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["init", "demo", "--type", "web"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["-q", "-v", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_unknown_config_key() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["config", "get", "defaults.nope"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_missing_explicit_config_file() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["-c", "absent.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_malformed_config_file() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("bad.toml"), "[defaults\nkind =").unwrap();

    sova(tmp.path())
        .args(["-c", "bad.toml", "init", "demo", "-t", "cli", "-y"])
        .assert()
        .code(4);

    assert!(!tmp.path().join("demo").exists());
}

#[test]
fn test_incomplete_catalog_creates_nothing() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("catalog/cli");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("main.tpl"), "package main\n").unwrap();
    fs::write(dir.join("go-mod.tpl"), "module x\n").unwrap();

    sova(tmp.path())
        .args(["init", "demo", "-t", "cli", "--templates", "catalog", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("not found in category 'cli'"));

    assert!(!tmp.path().join("demo").exists());
}

#[test]
fn test_templates_dir_from_env() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("empty")).unwrap();

    sova(tmp.path())
        .env("SOVA_TEMPLATES_DIR", tmp.path().join("empty"))
        .args(["init", "demo", "-t", "api", "-y"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Unknown template category 'api'"));
}

#[test]
fn test_render_failure_keeps_partial_tree_by_default() {
    let tmp = TempDir::new().unwrap();
    write_cli_catalog(&tmp.path().join("catalog"), "package {{ Undefined }}\n");

    sova(tmp.path())
        .args(["init", "demo", "-t", "cli", "--templates", "catalog", "-y"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Missing parameter 'Undefined'"))
        .stderr(predicate::str::contains("cli/main.tpl"));

    assert!(tmp.path().join("demo/cmd").is_dir());
    assert!(!tmp.path().join("demo/main.go").exists());
}

#[test]
fn test_render_failure_with_rollback_removes_tree() {
    let tmp = TempDir::new().unwrap();
    write_cli_catalog(&tmp.path().join("catalog"), "package {{ Undefined }}\n");

    sova(tmp.path())
        .args(["init", "demo", "-t", "cli", "--templates", "catalog", "--rollback", "-y"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Removed the partial project"));

    assert!(!tmp.path().join("demo").exists());
}

#[test]
fn test_failure_summary_in_json_mode() {
    let tmp = TempDir::new().unwrap();
    write_cli_catalog(&tmp.path().join("catalog"), "package {{ Undefined }}\n");

    let out = sova(tmp.path())
        .args([
            "--output-format",
            "json",
            "init",
            "demo",
            "-t",
            "cli",
            "--templates",
            "catalog",
            "-y",
        ])
        .output()
        .unwrap();

    assert_eq!(out.status.code(), Some(2));
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["state"], "failed");
    assert_eq!(summary["at"], 1);
    assert_eq!(summary["rolled_back"], false);
}

#[test]
fn test_tidy_without_go_keeps_project() {
    let tmp = TempDir::new().unwrap();
    let empty_path = tmp.path().join("no-bin");
    fs::create_dir(&empty_path).unwrap();

    sova(tmp.path())
        .env("PATH", &empty_path)
        .args(["init", "demo", "-t", "cli", "--tidy", "-y"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("External command failed: go mod tidy"));

    assert!(tmp.path().join("demo/go.mod").is_file());
}

#[test]
fn test_verbose_shows_cause_chain() {
    let tmp = TempDir::new().unwrap();
    sova(tmp.path())
        .args(["-v", "-c", "absent.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Caused by:"))
        .stderr(predicate::str::contains("--verbose").not());
}
