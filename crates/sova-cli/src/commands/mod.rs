//! Command handlers, one module per subcommand.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sova_adapters::{DirectoryStore, InMemoryStore, builtin_templates::templates_dir_from_env};
use sova_core::application::ports::TemplateStore;
use tracing::{debug, info};

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod post_generate;
pub mod prompt;
pub mod version;

/// Where templates come from, highest priority first: `--templates`,
/// `$SOVA_TEMPLATES_DIR`, `templates.local_path`, then the built-in catalog.
pub fn catalog_dir(explicit: Option<&Path>, config: &AppConfig) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(templates_dir_from_env)
        .or_else(|| config.templates.local_path.clone())
}

/// Open the template store selected by [`catalog_dir`].
pub fn open_store(explicit: Option<&Path>, config: &AppConfig) -> CliResult<Arc<dyn TemplateStore>> {
    match catalog_dir(explicit, config) {
        Some(dir) => {
            info!(dir = %dir.display(), "Using on-disk template catalog");
            Ok(Arc::new(DirectoryStore::new(&dir)?))
        }
        None => {
            debug!("Using built-in template catalog");
            Ok(Arc::new(InMemoryStore::with_builtin()?))
        }
    }
}
