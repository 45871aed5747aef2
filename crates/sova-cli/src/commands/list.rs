//! Implementation of the `sova list` command.

use sova_core::application::{CategoryInfo, TemplateService};

use crate::{
    cli::{ListArgs, ListFormat},
    commands::open_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: ListArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let service = TemplateService::new(open_store(None, &config)?);
    let catalog = service.catalog()?;

    let format = if output.is_json() {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for info in &catalog {
                output.print("")?;
                output.print(&format!("  {:<6} {}", info.category.as_str(), info.description))?;
                for template in &info.templates {
                    output.detail(&format!("         {template}"))?;
                }
            }
        }
        ListFormat::List => {
            for line in list_lines(&catalog) {
                println!("{line}");
            }
        }
        ListFormat::Json => {
            // JSON must be parseable even when piped, so it bypasses the
            // human-output suppression rules.
            output.json(&catalog)?;
        }
    }

    Ok(())
}

/// `category/name`, one per template.
fn list_lines(catalog: &[CategoryInfo]) -> Vec<String> {
    catalog
        .iter()
        .flat_map(|info| {
            info.templates
                .iter()
                .map(move |t| format!("{}/{}", info.category, t))
        })
        .collect()
}
