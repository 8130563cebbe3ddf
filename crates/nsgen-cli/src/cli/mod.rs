//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text and value enums live here. No business logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "nsgen",
    bin_name = "nsgen",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Add NativeScript to an Angular workspace",
    long_about = "nsgen turns an Angular web workspace into a code-sharing \
                  web + NativeScript mobile workspace.",
    after_help = "EXAMPLES:\n\
        \x20 nsgen add --project my-app\n\
        \x20 nsgen add ./web --project my-app --sample --dry-run\n\
        \x20 nsgen plan --skip-auto-generated-component\n\
        \x20 nsgen completions bash > /usr/share/bash-completion/completions/nsgen",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add NativeScript to a workspace on disk.
    #[command(
        visible_alias = "a",
        about = "Add NativeScript to a workspace",
        after_help = "EXAMPLES:\n\
            \x20 nsgen add --project my-app\n\
            \x20 nsgen add ../web --project my-app --ns-extension mobile --web-extension web\n\
            \x20 nsgen add --project my-app --sample --skip-auto-generated-component -y"
    )]
    Add(AddArgs),

    /// Show the rules `add` would run.
    #[command(
        about = "Show the rule plan",
        after_help = "EXAMPLES:\n\
            \x20 nsgen plan\n\
            \x20 nsgen plan --sample --format json"
    )]
    Plan(PlanArgs),

    /// List built-in templates.
    #[command(
        visible_alias = "ls",
        about = "List built-in templates",
        after_help = "EXAMPLES:\n\
            \x20 nsgen templates\n\
            \x20 nsgen templates --format csv"
    )]
    Templates(TemplatesArgs),

    /// Initialise an nsgen configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nsgen init\n\
            \x20 nsgen init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nsgen completions bash > ~/.local/share/bash-completion/completions/nsgen\n\
            \x20 nsgen completions zsh  > ~/.zfunc/_nsgen\n\
            \x20 nsgen completions fish > ~/.config/fish/completions/nsgen.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the nsgen configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nsgen config get defaults.ns_extension\n\
            \x20 nsgen config list\n\
            \x20 nsgen config path"
    )]
    Config(ConfigCommands),
}

// ── add ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Workspace root containing `angular.json`.
    #[arg(value_name = "DIR", default_value = ".", help = "Workspace directory")]
    pub dir: PathBuf,

    #[arg(
        short = 'p',
        long = "project",
        value_name = "NAME",
        help = "Project name from angular.json"
    )]
    pub project: String,

    /// Overrides `defaults.ns_extension` from the config.
    #[arg(
        long = "ns-extension",
        value_name = "EXT",
        help = "Qualifier for NativeScript files (default: tns)"
    )]
    pub ns_extension: Option<String>,

    /// Overrides `defaults.web_extension` from the config.
    #[arg(
        long = "web-extension",
        value_name = "EXT",
        help = "Qualifier for web-only files (default: none)"
    )]
    pub web_extension: Option<String>,

    #[arg(long = "sample", help = "Generate the sample players feature")]
    pub sample: bool,

    #[arg(
        long = "skip-auto-generated-component",
        help = "Do not generate the routed placeholder component"
    )]
    pub skip_auto_generated_component: bool,

    #[arg(long = "dry-run", help = "Show what would change without writing")]
    pub dry_run: bool,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt")]
    pub yes: bool,
}

// ── plan ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(long = "sample", help = "Include the sample feature")]
    pub sample: bool,

    #[arg(
        long = "skip-auto-generated-component",
        help = "Leave out the placeholder component"
    )]
    pub skip_auto_generated_component: bool,

    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: PlanFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PlanFormat {
    /// Numbered rules with descriptions.
    Table,
    /// One rule name per line.
    List,
    /// JSON object.
    Json,
}

// ── templates ─────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One id per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.ns_extension`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}
