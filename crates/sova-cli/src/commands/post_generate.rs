//! Go toolchain steps run after a project was generated (`--tidy`).
//!
//! These never touch the generated tree themselves; a failure is reported as
//! [`CliError::ExternalCommandFailed`] and the project stays on disk.

use std::path::Path;
use std::process::Command;

use sova_core::domain::GoModule;
use tracing::{debug, info, instrument};

use crate::error::{CliError, CliResult};

/// `go mod tidy`, then `go get` for the kind's modules, then `go mod tidy` again.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn tidy(root: &Path, modules: &[GoModule]) -> CliResult<()> {
    run_go(root, &["mod".into(), "tidy".into()])?;

    if !modules.is_empty() {
        let mut get = vec!["get".to_string()];
        get.extend(modules.iter().map(GoModule::versioned));
        run_go(root, &get)?;
        run_go(root, &["mod".into(), "tidy".into()])?;
    }

    info!("Go module dependencies resolved");
    Ok(())
}

fn run_go(dir: &Path, args: &[String]) -> CliResult<()> {
    let command = format!("go {}", args.join(" "));
    debug!(%command, "Running");

    let output = Command::new("go")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| CliError::ExternalCommandFailed {
            command: command.clone(),
            output: String::new(),
            source: Some(Box::new(e)),
        })?;

    if output.status.success() {
        Ok(())
    } else {
        Err(CliError::ExternalCommandFailed {
            command,
            output: String::from_utf8_lossy(&output.stderr).into_owned(),
            source: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_an_external_failure() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = tidy(&tmp.path().join("absent"), &[]).unwrap_err();
        assert!(matches!(err, CliError::ExternalCommandFailed { ref command, .. } if command == "go mod tidy"));
        assert_eq!(err.exit_code(), 1);
    }
}
