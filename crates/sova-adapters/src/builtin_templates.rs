//! Built-in template catalog.
//!
//! The bodies under `templates/<category>/` are compiled into the binary with
//! `include_str!`, so `sova` works without any files on disk. Each entry is a
//! `(category, name, body)` triple; [`all_templates`] is the single entry point
//! that [`crate::template_store::InMemoryStore::with_builtin`] loads from.
//!
//! # Overriding
//!
//! A directory with the same `<category>/<name>` layout can replace the
//! built-in catalog; see [`crate::template_store::DirectoryStore`] and
//! [`templates_dir_from_env`].

use std::path::PathBuf;

use tracing::debug;

/// Environment variable naming an on-disk catalog.
pub const TEMPLATES_DIR_ENV: &str = "SOVA_TEMPLATES_DIR";

/// One built-in template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTemplate {
    pub category: &'static str,
    pub name: &'static str,
    pub body: &'static str,
}

macro_rules! builtin {
    ($category:literal, $name:literal) => {
        BuiltinTemplate {
            category: $category,
            name: $name,
            body: include_str!(concat!("../templates/", $category, "/", $name)),
        }
    };
}

static BUILTIN: &[BuiltinTemplate] = &[
    // ── cli ─────────────────────────────────────────────────────────────────
    builtin!("cli", "main.tpl"),
    builtin!("cli", "go-mod.tpl"),
    builtin!("cli", "readme.tpl"),
    builtin!("cli", "root.tpl"),
    builtin!("cli", "version.tpl"),
    builtin!("cli", "gitignore.tpl"),
    builtin!("cli", "logger.tpl"),
    // ── api ─────────────────────────────────────────────────────────────────
    builtin!("api", "main.tpl"),
    builtin!("api", "go-mod.tpl"),
    builtin!("api", "readme.tpl"),
    builtin!("api", "gitignore.tpl"),
    builtin!("api", "env.tpl"),
    builtin!("api", "config.tpl"),
    builtin!("api", "router.tpl"),
    builtin!("api", "ping.tpl"),
    builtin!("api", "response.tpl"),
    builtin!("api", "openapi.tpl"),
    builtin!("api", "logger.tpl"),
    builtin!("api", "database.tpl"),
    builtin!("api", "cache.tpl"),
    builtin!("api", "queue.tpl"),
    builtin!("api", "compose.tpl"),
];

/// Every built-in template, grouped by category.
pub fn all_templates() -> &'static [BuiltinTemplate] {
    BUILTIN
}

/// `$SOVA_TEMPLATES_DIR`, if set and non-empty.
///
/// Relative paths are resolved against the current working directory by the
/// caller.
pub fn templates_dir_from_env() -> Option<PathBuf> {
    let dir = std::env::var_os(TEMPLATES_DIR_ENV).filter(|v| !v.is_empty())?;
    let path = PathBuf::from(dir);
    debug!(path = %path.display(), "templates directory from ${TEMPLATES_DIR_ENV}");
    Some(path)
}
