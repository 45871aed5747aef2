//! Interactive questions for values missing from the command line.
//!
//! Prompts only fill gaps: every answer ends up in the same
//! `ProjectConfig` the flags would have produced.

use sova_core::domain::{FeatureToggles, ProjectKind};

use crate::error::{CliError, CliResult};

/// Whether prompting is possible in this process.
pub fn is_available() -> bool {
    use std::io::IsTerminal as _;
    cfg!(feature = "interactive") && std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

#[cfg(feature = "interactive")]
mod imp {
    use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
    use sova_core::domain::{DomainValidator, Feature};

    use super::*;

    fn prompt_error(err: dialoguer::Error) -> CliError {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                CliError::Cancelled
            }
            dialoguer::Error::IO(e) => CliError::IoError {
                message: "Failed to read interactive input".into(),
                source: e,
            },
        }
    }

    pub fn project_name() -> CliResult<String> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Project name")
            .validate_with(|input: &String| -> Result<(), String> {
                DomainValidator::validate_project_name(input.trim()).map_err(|e| e.to_string())
            })
            .interact_text()
            .map(|name| name.trim().to_string())
            .map_err(prompt_error)
    }

    pub fn project_kind(default: Option<ProjectKind>) -> CliResult<ProjectKind> {
        let items: Vec<String> = ProjectKind::ALL
            .iter()
            .map(|k| format!("{k} - {}", k.description()))
            .collect();
        let default_index = default
            .and_then(|d| ProjectKind::ALL.iter().position(|k| *k == d))
            .unwrap_or(0);

        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Project type")
            .items(&items)
            .default(default_index)
            .interact()
            .map_err(prompt_error)?;
        Ok(ProjectKind::ALL[index])
    }

    pub fn features(kind: ProjectKind, defaults: FeatureToggles) -> CliResult<FeatureToggles> {
        let blueprint = kind.blueprint();
        let ask = |feature: Feature, question: &str, default: bool| -> CliResult<bool> {
            if !blueprint.supports(feature) {
                return Ok(false);
            }
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(question)
                .default(default)
                .interact()
                .map_err(prompt_error)
        };

        Ok(FeatureToggles::none()
            .with_structured_logger(ask(
                Feature::StructuredLogger,
                "Use zap for structured logging?",
                defaults.structured_logger,
            )?)
            .with_relational_db(ask(
                Feature::RelationalDb,
                "Use PostgreSQL?",
                defaults.relational_db,
            )?)
            .with_cache(ask(Feature::Cache, "Use Redis?", defaults.cache)?)
            .with_message_queue(ask(
                Feature::MessageQueue,
                "Use RabbitMQ?",
                defaults.message_queue,
            )?))
    }
}

#[cfg(not(feature = "interactive"))]
mod imp {
    use super::*;

    fn unavailable<T>() -> CliResult<T> {
        Err(CliError::FeatureNotAvailable {
            feature: "interactive",
        })
    }

    pub fn project_name() -> CliResult<String> {
        unavailable()
    }

    pub fn project_kind(_default: Option<ProjectKind>) -> CliResult<ProjectKind> {
        unavailable()
    }

    pub fn features(_kind: ProjectKind, _defaults: FeatureToggles) -> CliResult<FeatureToggles> {
        unavailable()
    }
}

pub use imp::{features, project_kind, project_name};
