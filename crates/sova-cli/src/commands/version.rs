//! `sova version`.

use serde::Serialize;

use crate::{cli::VersionArgs, error::CliResult, output::OutputManager};

#[derive(Debug, Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    core: &'static str,
}

const INFO: VersionInfo = VersionInfo {
    name: "sova",
    version: env!("CARGO_PKG_VERSION"),
    core: sova_core::VERSION,
};

pub fn execute(args: VersionArgs, output: OutputManager) -> CliResult<()> {
    if args.json || output.is_json() {
        output.json(&INFO)?;
    } else {
        println!("{}", banner());
    }
    Ok(())
}

/// `Sova CLI v<version>`.
pub fn banner() -> String {
    format!("Sova CLI v{}", INFO.version)
}
