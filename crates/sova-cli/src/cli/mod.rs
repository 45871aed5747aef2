//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sova_core::domain::{FeatureToggles, ProjectKind};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "sova",
    bin_name = "sova",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold Go projects from a built-in template catalog",
    long_about = "Sova generates ready-to-build Go projects: HTTP APIs with a \
                  clean-architecture layout or command-line tools, with optional \
                  logging, database, cache and message-queue integrations.",
    after_help = "EXAMPLES:\n\
        \x20 sova init my-api --type api --use-postgres --use-redis\n\
        \x20 sova init my-tool -t cli --use-zap\n\
        \x20 sova list\n\
        \x20 sova completions bash > /usr/share/bash-completion/completions/sova",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize a new Go project.
    #[command(
        visible_alias = "new",
        about = "Initialize a new project",
        long_about = "Initialize a new project with the specified name.\n\
            Missing values are asked for interactively when running in a terminal.\n\
            Project types:\n\
            \x20 api - A Go API project with clean architecture\n\
            \x20 cli - A Go CLI project with clean architecture",
        after_help = "EXAMPLES:\n\
            \x20 sova init my-api --type api --use-zap --use-postgres\n\
            \x20 sova init my-tool --type cli --dir ~/src -y\n\
            \x20 sova init my-api -t api --templates ./my-catalog --dry-run"
    )]
    Init(InitArgs),

    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 sova list\n\
            \x20 sova list --format list\n\
            \x20 sova list --format json"
    )]
    List(ListArgs),

    /// Print version information.
    #[command(about = "Print the version number of Sova")]
    Version(VersionArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 sova completions bash > ~/.local/share/bash-completion/completions/sova\n\
            \x20 sova completions zsh  > ~/.zfunc/_sova\n\
            \x20 sova completions fish > ~/.config/fish/completions/sova.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the Sova configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 sova config init\n\
            \x20 sova config get defaults.module_prefix\n\
            \x20 sova config list"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `sova init`.
#[derive(Debug, Clone, Args)]
pub struct InitArgs {
    /// Project name; also the name of the directory that is created.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Project type.
    #[arg(
        short = 't',
        long = "type",
        value_name = "TYPE",
        value_enum,
        help = "Project type (api or cli)"
    )]
    pub kind: Option<ProjectType>,

    /// Structured logging with zap.
    #[arg(
        long = "use-zap",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Use zap logger"
    )]
    pub use_zap: Option<bool>,

    /// PostgreSQL via pgx.
    #[arg(
        long = "use-postgres",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Use PostgreSQL"
    )]
    pub use_postgres: Option<bool>,

    /// Redis via go-redis.
    #[arg(
        long = "use-redis",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Use Redis"
    )]
    pub use_redis: Option<bool>,

    /// RabbitMQ via amqp091-go.
    #[arg(
        long = "use-rabbitmq",
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Use RabbitMQ"
    )]
    pub use_rabbitmq: Option<bool>,

    /// Full Go module path; defaults to `<module_prefix>/<name>`.
    #[arg(long = "module", value_name = "PATH", help = "Go module path")]
    pub module: Option<String>,

    /// Parent directory the project is created in.
    #[arg(
        long = "dir",
        value_name = "DIR",
        default_value = ".",
        help = "Parent directory for the project"
    )]
    pub dir: PathBuf,

    /// Use an on-disk template catalog instead of the built-in one.
    #[arg(
        long = "templates",
        value_name = "DIR",
        help = "Template catalog directory (overrides the built-in templates)"
    )]
    pub templates: Option<PathBuf>,

    /// Remove the partially written project if generation fails.
    #[arg(long = "rollback", help = "Remove the partial project on failure")]
    pub rollback: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Run `go mod tidy` and `go get` after generation.
    #[arg(long = "tidy", help = "Run go mod tidy and go get after generation")]
    pub tidy: bool,

    /// Never prompt; use flags and configured defaults.
    #[arg(short = 'y', long = "yes", help = "Skip interactive prompts")]
    pub yes: bool,
}

impl InitArgs {
    /// Whether any `--use-*` flag was given explicitly.
    pub fn feature_flags_given(&self) -> bool {
        self.use_zap.is_some()
            || self.use_postgres.is_some()
            || self.use_redis.is_some()
            || self.use_rabbitmq.is_some()
    }

    /// Toggles from the flags, falling back to `defaults` for unset ones.
    pub fn features_over(&self, defaults: FeatureToggles) -> FeatureToggles {
        FeatureToggles::none()
            .with_structured_logger(self.use_zap.unwrap_or(defaults.structured_logger))
            .with_relational_db(self.use_postgres.unwrap_or(defaults.relational_db))
            .with_cache(self.use_redis.unwrap_or(defaults.cache))
            .with_message_queue(self.use_rabbitmq.unwrap_or(defaults.message_queue))
    }
}

/// Project types accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum ProjectType {
    Api,
    Cli,
}

impl From<ProjectType> for ProjectKind {
    fn from(value: ProjectType) -> Self {
        match value {
            ProjectType::Api => ProjectKind::Api,
            ProjectType::Cli => ProjectKind::Cli,
        }
    }
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `sova list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `list` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One `category/name` per line.
    List,
    /// JSON array.
    Json,
}

// ── version ───────────────────────────────────────────────────────────────────

/// Arguments for `sova version`.
#[derive(Debug, Args)]
pub struct VersionArgs {
    /// Emit a JSON object instead of text.
    #[arg(long = "json", help = "Print version information as JSON")]
    pub json: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `sova completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `sova config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.module_prefix`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
    /// Write the default configuration file.
    Init {
        /// Overwrite an existing config file.
        #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_init_command() {
        let cli = Cli::parse_from(["sova", "init", "my-api", "--type", "api", "--use-postgres"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.name.as_deref(), Some("my-api"));
        assert_eq!(args.kind, Some(ProjectType::Api));
        assert_eq!(args.use_postgres, Some(true));
        assert_eq!(args.use_zap, None);
        assert!(args.feature_flags_given());
        assert_eq!(args.dir, PathBuf::from("."));
    }

    #[test]
    fn new_is_an_alias_for_init() {
        let cli = Cli::parse_from(["sova", "new", "tool", "-t", "cli"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn feature_flags_accept_explicit_false() {
        let cli = Cli::parse_from(["sova", "init", "x", "--use-zap=false", "--use-redis"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert_eq!(args.use_zap, Some(false));

        let defaults = FeatureToggles::none()
            .with_structured_logger(true)
            .with_message_queue(true);
        let features = args.features_over(defaults);
        assert!(!features.structured_logger);
        assert!(features.cache);
        assert!(features.message_queue);
        assert!(!features.relational_db);
    }

    #[test]
    fn no_feature_flags_means_prompt_candidates() {
        let cli = Cli::parse_from(["sova", "init"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected Init command");
        };
        assert!(args.name.is_none());
        assert!(!args.feature_flags_given());
    }

    #[test]
    fn unknown_project_type_is_rejected() {
        assert!(Cli::try_parse_from(["sova", "init", "x", "--type", "desktop"]).is_err());
    }

    #[test]
    fn project_type_converts_to_kind() {
        assert_eq!(ProjectKind::from(ProjectType::Api), ProjectKind::Api);
        assert_eq!(ProjectKind::from(ProjectType::Cli), ProjectKind::Cli);
    }

    #[test]
    fn config_init_takes_force() {
        let cli = Cli::parse_from(["sova", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Init { force: true })
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        // clap should reject --quiet --verbose together
        let result = Cli::try_parse_from(["sova", "--quiet", "--verbose", "list"]);
        assert!(result.is_err());
    }
}
