//! `sova config` - inspect and initialise configuration.

use std::path::Path;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` path, if one was given.
pub fn execute(
    cmd: ConfigCommands,
    config_file: Option<&Path>,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = config.get(&key).ok_or_else(|| CliError::ConfigError {
                message: format!("Unknown config key: '{key}'"),
                source: None,
            })?;
            println!("{value}");
        }

        ConfigCommands::List => {
            if output.is_json() {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&config.to_toml().map_err(CliError::config)?)?;
            }
        }

        ConfigCommands::Path => {
            println!("{}", AppConfig::active_path(config_file).display());
        }

        ConfigCommands::Init { force } => {
            let path = AppConfig::active_path(config_file);
            write_default_config(&path, force, &output)?;
        }
    }

    Ok(())
}

fn write_default_config(path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default().to_toml().map_err(CliError::config)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("Failed to create config directory '{}'", parent.display()))?;
    }
    std::fs::write(path, toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))?;

    output.success(&format!("Configuration created at {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};

    fn quiet_output() -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: OutputFormat::Plain,
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn init_writes_loadable_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");

        write_default_config(&path, false, &quiet_output()).unwrap();

        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn init_keeps_existing_file_without_force() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nuse_zap = true\n").unwrap();

        write_default_config(&path, false, &quiet_output()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("use_zap = true"));

        write_default_config(&path, true, &quiet_output()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("use_zap = false"));
    }

    #[test]
    fn get_unknown_key_is_a_config_error() {
        let err = execute(
            ConfigCommands::Get {
                key: "does.not.exist".into(),
            },
            None,
            AppConfig::default(),
            quiet_output(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
