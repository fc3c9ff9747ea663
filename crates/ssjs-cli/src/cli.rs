//! CLI argument definitions for the SSJS analyzer.

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use ssjs_core::LanguageId;

use crate::output::OutputFormat;

/// Command-line interface for the SSJS analyzer.
#[derive(Parser, Debug)]
#[command(name = "ssjs", disable_help_subcommand = true)]
pub(crate) struct Cli {
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: CliCommand,
}

/// Structured subcommands for the SSJS CLI.
#[derive(Subcommand, Debug, Clone)]
pub(crate) enum CliCommand {
    /// Checks files for server-side script problems.
    Check(CheckArgs),
}

/// Arguments of the `check` command.
#[derive(Args, Debug, Clone)]
pub(crate) struct CheckArgs {
    /// Files to check.
    #[arg(value_name = "PATH", required = true)]
    pub(crate) paths: Vec<Utf8PathBuf>,
    /// Overrides the document language inferred from each file extension.
    #[arg(long, value_name = "LANGUAGE")]
    pub(crate) language: Option<LanguageId>,
    /// Controls how findings are rendered.
    #[arg(long, value_enum, default_value_t = OutputFormat::Auto)]
    pub(crate) output: OutputFormat,
}
