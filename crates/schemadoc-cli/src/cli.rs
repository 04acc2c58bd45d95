//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use schemadoc_core::{IdentifierPolicy, ValidationMode};
use std::path::PathBuf;

/// Schemadoc CLI - Public API documentation schemas from internal route schemas
///
/// Validates route schemas and projects them into documentation schemas:
/// storage identifiers are removed from requests and described in responses,
/// internal keywords are stripped.
#[derive(Parser, Debug)]
#[command(
    name = "schemadoc",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "SCHEMADOC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transform a route schema or route catalog into documentation schemas
    Transform(TransformArgs),

    /// Validate a route schema or route catalog
    Validate(ValidateArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the transform command
#[derive(Parser, Debug)]
pub struct TransformArgs {
    /// Route schema or route catalog file (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the result to a file; the extension picks JSON or YAML
    #[arg(long = "save-to", value_name = "PATH")]
    pub save_to: Option<PathBuf>,

    /// Property name treated as a storage identifier (repeatable)
    #[arg(long = "identifier-field", value_name = "NAME")]
    pub identifier_fields: Vec<String>,

    /// Keyword stripped from every node (repeatable)
    #[arg(long = "internal-keyword", value_name = "NAME")]
    pub internal_keywords: Vec<String>,

    /// What to do with identifiers in params, querystring, headers and body
    #[arg(long, value_enum)]
    pub request_policy: Option<PolicyArg>,

    /// What to do with identifiers in responses
    #[arg(long, value_enum)]
    pub response_policy: Option<PolicyArg>,

    /// Rewrite `type: [X, "null"]` as `type: X, nullable: true`
    #[arg(long)]
    pub nullable: bool,

    /// How thoroughly the input is validated first
    #[arg(short, long, value_enum)]
    pub strict: Option<StrictMode>,

    /// Stop a catalog at the first failing route
    #[arg(long)]
    pub fail_fast: bool,

    /// Print transformation statistics
    #[arg(long)]
    pub stats: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Route schema or route catalog file (JSON or YAML)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Validation strictness mode
    #[arg(short, long, value_enum)]
    pub strict: Option<StrictMode>,

    /// Show the validated document
    #[arg(long)]
    pub detailed: bool,

    /// Stop a catalog at the first failing route
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show(ConfigShowArgs),

    /// List the locations searched for a configuration file
    Path,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (default: .schemadoc.yaml)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Force overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for config show
#[derive(Parser, Debug)]
pub struct ConfigShowArgs {
    /// Show configuration in specified format
    #[arg(short, long, value_enum, default_value = "toml")]
    pub format: ConfigFormat,
}

/// Configuration file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Validation strictness
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrictMode {
    /// Structural checks only
    Basic,
    /// Structural checks plus regular expression compilation
    Partial,
    /// Everything, including the JSON Schema meta-schema
    Strict,
}

/// Identifier handling policy
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Drop identifier fields and their `required` entries
    Remove,
    /// Keep identifier fields and describe them
    Annotate,
    /// Leave identifier fields untouched
    Keep,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl From<StrictMode> for ValidationMode {
    fn from(mode: StrictMode) -> Self {
        match mode {
            StrictMode::Basic => ValidationMode::Basic,
            StrictMode::Partial => ValidationMode::Partial,
            StrictMode::Strict => ValidationMode::Strict,
        }
    }
}

impl From<PolicyArg> for IdentifierPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Remove => IdentifierPolicy::Remove,
            PolicyArg::Annotate => IdentifierPolicy::Annotate,
            PolicyArg::Keep => IdentifierPolicy::Keep,
        }
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from(["schemadoc", "-vv", "validate", "route.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["schemadoc", "--quiet", "validate", "route.json"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_transform_args() {
        let cli = Cli::parse_from([
            "schemadoc",
            "transform",
            "routes.yaml",
            "--identifier-field",
            "_id",
            "--identifier-field",
            "uuid",
            "--request-policy",
            "keep",
            "--strict",
            "partial",
            "--nullable",
            "--save-to",
            "out/docs.json",
            "-o",
            "json-pretty",
        ]);

        assert_eq!(cli.output, OutputFormat::JsonPretty);
        let Commands::Transform(args) = cli.command else {
            panic!("expected transform");
        };
        assert_eq!(args.identifier_fields, ["_id", "uuid"]);
        assert_eq!(args.request_policy, Some(PolicyArg::Keep));
        assert_eq!(args.response_policy, None);
        assert_eq!(args.strict.map(ValidationMode::from), Some(ValidationMode::Partial));
        assert!(args.nullable);
        assert_eq!(args.save_to, Some(PathBuf::from("out/docs.json")));
    }

    #[test]
    fn test_policy_conversion() {
        assert_eq!(IdentifierPolicy::from(PolicyArg::Annotate), IdentifierPolicy::Annotate);
        assert_eq!(ValidationMode::from(StrictMode::Strict), ValidationMode::Strict);
    }
}
