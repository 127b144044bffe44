//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "zrunner",
    bin_name = "zrunner",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold, validate and deploy zrunner projects",
    long_about = "zrunner creates multi-pipeline indexing projects and submits \
                  their configuration to the zrunner deployment service.",
    after_help = "EXAMPLES:\n\
        \x20 zrunner init my_project\n\
        \x20 zrunner pipeline create transfers --dir my_project\n\
        \x20 zrunner deploy --path my_project --api-key $KEY --dry-run\n\
        \x20 zrunner completions bash > /usr/share/bash-completion/completions/zrunner",
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
    /// Create a new project.
    #[command(
        visible_aliases = ["initialize", "initialise", "create"],
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 zrunner init             # use the current directory\n\
            \x20 zrunner init my_project  # create ./my_project"
    )]
    Init(InitArgs),

    /// Work with pipelines.
    #[command(about = "Manage pipelines", subcommand)]
    Pipeline(PipelineCommands),

    /// Validate a project and submit it for deployment.
    #[command(
        about = "Deploy a project",
        after_help = "EXAMPLES:\n\
            \x20 zrunner deploy --api-key $KEY\n\
            \x20 zrunner deploy --path my_project --api-key $KEY --pat $PAT\n\
            \x20 zrunner deploy --api-key $KEY --dry-run"
    )]
    Deploy(DeployArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 zrunner completions bash > ~/.local/share/bash-completion/completions/zrunner\n\
            \x20 zrunner completions zsh  > ~/.zfunc/_zrunner\n\
            \x20 zrunner completions fish > ~/.config/fish/completions/zrunner.fish"
    )]
    Completions(CompletionsArgs),

    /// Manage the zrunner configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 zrunner config init\n\
            \x20 zrunner config get deploy.endpoint\n\
            \x20 zrunner config list"
    )]
    Config(ConfigCommands),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `zrunner init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project directory. Its last path component becomes the project name.
    #[arg(value_name = "DIR", help = "Project directory (default: current directory)")]
    pub dir: Option<PathBuf>,
}

// ── pipeline ──────────────────────────────────────────────────────────────────

/// Subcommands for `zrunner pipeline`.
#[derive(Debug, Subcommand)]
pub enum PipelineCommands {
    /// Add a pipeline folder with a manifest and handler stubs.
    #[command(
        after_help = "EXAMPLES:\n\
            \x20 zrunner pipeline create transfers\n\
            \x20 zrunner pipeline create transfers --dir my_project"
    )]
    Create(PipelineCreateArgs),
}

/// Arguments for `zrunner pipeline create`.
#[derive(Debug, Args)]
pub struct PipelineCreateArgs {
    #[arg(value_name = "NAME", help = "Pipeline name")]
    pub name: String,

    #[arg(
        short = 'd',
        long = "dir",
        value_name = "DIR",
        help = "Directory to create the pipeline in (default: current directory)"
    )]
    pub dir: Option<PathBuf>,
}

// ── deploy ────────────────────────────────────────────────────────────────────

/// Arguments for `zrunner deploy`.
#[derive(Debug, Args)]
pub struct DeployArgs {
    /// Directory searched for `project.yml`.
    #[arg(
        short = 'p',
        long = "path",
        value_name = "DIR",
        help = "Directory to search for the project (default: current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        long = "api-key",
        value_name = "KEY",
        env = "ZRUNNER_API_KEY",
        hide_env_values = true,
        help = "API key for the deployment service"
    )]
    pub api_key: String,

    #[arg(
        long = "pat",
        value_name = "TOKEN",
        env = "ZRUNNER_PAT",
        hide_env_values = true,
        help = "Access token for a private repository"
    )]
    pub pat: Option<String>,

    #[arg(
        long = "endpoint",
        value_name = "URL",
        help = "Deployment service URL (overrides deploy.endpoint)"
    )]
    pub endpoint: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Request timeout in seconds (overrides deploy.timeout_secs)"
    )]
    pub timeout: Option<u64>,

    /// Stop after assembling the payload and print it instead of sending it.
    #[arg(long = "dry-run", help = "Validate and print the request without sending it")]
    pub dry_run: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `zrunner completions`.
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

/// Subcommands for `zrunner config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `deploy.endpoint`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
