//! Rendering of analysis results.
//!
//! Human output shows each diagnostic with source context and a caret under
//! the reported column. JSON output emits one object per file.

mod render;

use clap::ValueEnum;
use serde::Serialize;
use ssjs_core::{Diagnostic, SourceDocument};
use ssjs_lint::{Analysis, DiagnosticSummary};

/// Output format selection for analysis results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// Selects `human` for terminal output and `json` for redirected output.
    #[default]
    Auto,
    /// Always render human-readable output.
    Human,
    /// Always emit JSON reports.
    Json,
}

/// Output format after resolving `auto` based on TTY detection.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResolvedOutputFormat {
    /// Human-readable output with source context.
    Human,
    /// One JSON object per file.
    Json,
}

impl OutputFormat {
    /// Resolves the output format based on whether stdout is a terminal.
    #[must_use]
    pub const fn resolve(self, stdout_is_terminal: bool) -> ResolvedOutputFormat {
        match self {
            Self::Auto => {
                if stdout_is_terminal {
                    ResolvedOutputFormat::Human
                } else {
                    ResolvedOutputFormat::Json
                }
            }
            Self::Human => ResolvedOutputFormat::Human,
            Self::Json => ResolvedOutputFormat::Json,
        }
    }
}

/// The JSON report for one analysed file.
#[derive(Debug, Serialize)]
pub struct FileReport<'a> {
    /// The path the file was read from.
    pub path: &'a str,
    /// Diagnostics ordered by position.
    pub diagnostics: &'a [Diagnostic],
    /// Severity counts.
    pub summary: DiagnosticSummary,
    /// Whether any diagnostic is an error.
    pub has_errors: bool,
}

impl<'a> FileReport<'a> {
    /// Builds the report for `analysis` of `document`.
    #[must_use]
    pub fn new(document: &'a SourceDocument, analysis: &'a Analysis) -> Self {
        Self {
            path: document.path(),
            diagnostics: analysis.diagnostics(),
            summary: analysis.summary(),
            has_errors: analysis.has_errors(),
        }
    }
}

/// Serialises the report for one file as a single JSON line.
///
/// # Errors
///
/// Returns an error if serialisation fails.
pub fn render_json(
    document: &SourceDocument,
    analysis: &Analysis,
) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(&FileReport::new(document, analysis))?;
    line.push('\n');
    Ok(line)
}

/// Renders the findings for one file with source context.
#[must_use]
pub fn render_human(document: &SourceDocument, analysis: &Analysis) -> String {
    render::render_report(document.path(), document.text(), analysis)
}
