//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Diming CLI - Extract place names from narrative text with a local model.
#[derive(Debug, Parser)]
#[command(name = "diming")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (place names only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract place names from a text file or stdin
    Extract(ExtractArgs),

    /// Print the prompt that would be sent to the model
    Prompt(PromptArgs),

    /// Parse saved model output without running a model
    Parse(ParseArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Text file to analyze (stdin when omitted or "-")
    pub input: Option<PathBuf>,

    /// Model identifier passed to the runtime
    #[arg(short, long, env = "DIMING_MODEL")]
    pub model: Option<String>,

    /// Split long text into chunks and extract from each
    #[arg(long)]
    pub chunk: bool,

    /// Sum counts of repeated place names
    #[arg(long)]
    pub merge: bool,

    /// Shape of the input
    #[arg(short, long, value_enum, default_value = "text")]
    pub input_format: InputFormat,
}

/// Input shapes accepted by extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// Plain text
    Text,
    /// JSON array of `{title, content: [paragraph, ...]}` from an EPUB reader
    Sections,
    /// JSON array of `{page_num, text}` from a PDF/OCR reader
    Pages,
}

/// Arguments for the prompt command.
#[derive(Debug, Parser)]
pub struct PromptArgs {
    /// Text file to embed (stdin when omitted or "-")
    pub input: Option<PathBuf>,
}

/// Arguments for the parse command.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// File holding raw model output (stdin when omitted or "-")
    pub input: Option<PathBuf>,

    /// Sum counts of repeated place names
    #[arg(long)]
    pub merge: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
