//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "stencil",
    bin_name = "stencil",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Infrastructure files from typed templates",
    long_about = "Stencil renders CI pipelines, Dockerfiles, Kubernetes manifests \
                  and security policies from typed, validated template definitions.",
    after_help = "EXAMPLES:\n\
        \x20 stencil list --category container\n\
        \x20 stencil show dockerfile-nodejs\n\
        \x20 stencil preview dockerfile-nodejs --set packageManager=yarn\n\
        \x20 stencil generate k8s-deployment --example web-app --output ./deploy\n\
        \x20 stencil download helm-chart --set chartName=api",
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
    /// List available templates.
    #[command(
        visible_alias = "ls",
        about = "List available templates",
        after_help = "EXAMPLES:\n\
            \x20 stencil list\n\
            \x20 stencil list --category kubernetes\n\
            \x20 stencil list --format json"
    )]
    List(ListArgs),

    /// List categories with their templates.
    #[command(about = "List template categories")]
    Categories,

    /// Describe one template: fields, options, defaults and examples.
    #[command(
        about = "Show a template's fields and examples",
        after_help = "EXAMPLES:\n\
            \x20 stencil show jenkins-pipeline\n\
            \x20 stencil show helm-chart --output-format json"
    )]
    Show(ShowArgs),

    /// Render a template and print the files without writing anything.
    #[command(
        about = "Render a template to stdout",
        after_help = "EXAMPLES:\n\
            \x20 stencil preview dockerfile-nodejs\n\
            \x20 stencil preview github-actions --set workflowName=CI --set triggers=push,workflow_dispatch\n\
            \x20 stencil preview k8s-deployment --values app.json"
    )]
    Preview(RenderArgs),

    /// Render a template and write the files under a directory.
    #[command(
        visible_alias = "gen",
        about = "Render a template to disk",
        after_help = "EXAMPLES:\n\
            \x20 stencil generate dockerfile-python\n\
            \x20 stencil generate k8s-deployment --example web-app --output ./deploy\n\
            \x20 stencil generate helm-chart --set chartName=api --force"
    )]
    Generate(GenerateArgs),

    /// Render a template and save it as a tar.gz archive.
    #[command(
        about = "Render a template into a tar.gz archive",
        after_help = "EXAMPLES:\n\
            \x20 stencil download network-policy --set policyName=web\n\
            \x20 stencil download gitlab-ci --output ./artifacts"
    )]
    Download(DownloadArgs),

    /// Initialise a Stencil configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 stencil init\n\
            \x20 stencil --config ./stencil.toml init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 stencil completions bash > ~/.local/share/bash-completion/completions/stencil\n\
            \x20 stencil completions zsh  > ~/.zfunc/_stencil\n\
            \x20 stencil completions fish > ~/.config/fish/completions/stencil.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Stencil configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 stencil config get templates.local_path\n\
            \x20 stencil config list\n\
            \x20 stencil config path"
    )]
    Config(ConfigCommands),
}

// ── list ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only templates of this category.
    #[arg(
        short = 'C',
        long = "category",
        value_name = "CATEGORY",
        help = "Filter by category id (cicd, container, kubernetes, security)"
    )]
    pub category: Option<String>,

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
    /// One id per line.
    List,
    /// JSON array.
    Json,
}

// ── show ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Template id.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,
}

// ── configuration values ──────────────────────────────────────────────────────

/// How a caller supplies configuration values.
///
/// Later sources override earlier ones: `--example`, then `--values`, then
/// each `--set` in order.
#[derive(Debug, Args, Default)]
pub struct ValueArgs {
    /// Start from one of the template's documented examples.
    #[arg(long = "example", value_name = "NAME", help = "Start from a documented example")]
    pub example: Option<String>,

    /// JSON object of field values.
    #[arg(long = "values", value_name = "FILE", help = "Read values from a JSON file")]
    pub values: Option<PathBuf>,

    /// Single field value; repeatable.
    #[arg(
        short = 's',
        long = "set",
        value_name = "KEY=VALUE",
        help = "Set a field value (repeatable)",
        long_help = "Set a field value. The value is read according to the field's \
                     declared type: numbers for number fields, true/false for boolean \
                     fields, comma-separated lists for multiselect fields, text otherwise."
    )]
    pub set: Vec<String>,
}

// ── preview / generate / download ─────────────────────────────────────────────

/// Arguments for `stencil preview`.
#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Template id.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    #[command(flatten)]
    pub values: ValueArgs,
}

/// Arguments for `stencil generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Template id.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    #[command(flatten)]
    pub values: ValueArgs,

    /// Directory the generated paths are resolved against.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        default_value = ".",
        help = "Output directory"
    )]
    pub output: PathBuf,

    /// Overwrite files that already exist.
    #[arg(long = "force", help = "Overwrite existing files")]
    pub force: bool,
}

/// Arguments for `stencil download`.
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Template id.
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    #[command(flatten)]
    pub values: ValueArgs,

    /// Directory the archive is saved in; falls back to
    /// `download.directory`, then the current directory.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Directory to save the archive in"
    )]
    pub output: Option<PathBuf>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `stencil init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `stencil completions`.
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

/// Subcommands for `stencil config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `output.format`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
