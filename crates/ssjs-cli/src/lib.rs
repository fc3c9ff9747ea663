//! Command-line interface runtime for the SSJS analyzer.
//!
//! The module owns argument parsing, configuration bootstrapping, logging
//! set-up, file reading and result rendering. It is exercised both from the
//! binary entrypoint and from tests where configuration loading and IO
//! streams can be substituted.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::process::ExitCode;

use camino::Utf8Path;
use clap::Parser;
use ssjs_config::Config;
use ssjs_core::{LanguageId, SourceDocument};
use ssjs_lint::{Analysis, Analyzer};
use ssjs_syntax::TreeSitterDialectEngine;
use tracing::debug;

mod cli;
mod config;
mod errors;
pub mod output;
mod telemetry;

use cli::{CheckArgs, Cli, CliCommand};
use config::{ConfigArgumentSplit, split_config_arguments};
pub(crate) use config::{ConfigLoader, OrthoConfigLoader};
use errors::AppError;
pub use output::{OutputFormat, ResolvedOutputFormat, render_human, render_json};

/// Bundles the IO streams provided to the CLI runtime.
pub(crate) struct IoStreams<'a, W: Write, E: Write> {
    pub(crate) stdout: &'a mut W,
    pub(crate) stderr: &'a mut E,
    stdout_is_terminal: bool,
}

impl<'a, W: Write, E: Write> IoStreams<'a, W, E> {
    pub(crate) const fn new(
        stdout: &'a mut W,
        stderr: &'a mut E,
        stdout_is_terminal: bool,
    ) -> Self {
        Self {
            stdout,
            stderr,
            stdout_is_terminal,
        }
    }

    pub(crate) const fn stdout_is_terminal(&self) -> bool {
        self.stdout_is_terminal
    }
}

struct CliRunner<'a, W: Write, E: Write, L: ConfigLoader> {
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
}

impl<'a, W, E, L> CliRunner<'a, W, E, L>
where
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    const fn new(io: &'a mut IoStreams<'a, W, E>, loader: &'a L) -> Self {
        Self { io, loader }
    }

    fn run<I>(&mut self, args: I) -> ExitCode
    where
        I: IntoIterator<Item = OsString>,
    {
        let arguments: Vec<OsString> = args.into_iter().collect();
        let split = split_config_arguments(&arguments);
        let cli_arguments = prepare_cli_arguments(&arguments, &split);

        let result = Cli::try_parse_from(cli_arguments)
            .map_err(AppError::CliUsage)
            .and_then(|cli| {
                self.loader
                    .load(&split.config_arguments)
                    .map(|config| (cli, config))
            })
            .and_then(|(cli, config)| {
                telemetry::initialise(&config)?;
                match cli.command {
                    CliCommand::Check(check) => self.check(&check, &config),
                }
            });

        match result {
            Ok(exit_code) => exit_code,
            Err(AppError::CliUsage(error)) if !error.use_stderr() => {
                // `--help` and `--version` are successful requests.
                let _ = write!(self.io.stdout, "{error}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                let _ = writeln!(self.io.stderr, "{error}");
                ExitCode::FAILURE
            }
        }
    }

    /// Analyses every requested file and renders the results.
    ///
    /// A file that cannot be read is reported on stderr and fails the run
    /// without stopping the remaining files.
    fn check(&mut self, args: &CheckArgs, config: &Config) -> Result<ExitCode, AppError> {
        let format = args.output.resolve(self.io.stdout_is_terminal());
        let analyzer = build_analyzer(config);
        let mut failed = false;

        for path in &args.paths {
            match analyse_file(&analyzer, path, args.language) {
                Ok((document, analysis)) => {
                    failed |= analysis.has_errors();
                    let rendered = match format {
                        ResolvedOutputFormat::Human => render_human(&document, &analysis),
                        ResolvedOutputFormat::Json => render_json(&document, &analysis)
                            .map_err(|source| AppError::SerialiseReport {
                                path: path.clone(),
                                source,
                            })?,
                    };
                    self.io
                        .stdout
                        .write_all(rendered.as_bytes())
                        .map_err(AppError::WriteOutput)?;
                }
                Err(error) => {
                    failed = true;
                    writeln!(self.io.stderr, "{error}").map_err(AppError::WriteOutput)?;
                }
            }
        }

        self.io.stdout.flush().map_err(AppError::WriteOutput)?;
        Ok(if failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        })
    }
}

/// Runs the CLI using the provided arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    stdout_is_terminal: bool,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    let mut io = IoStreams::new(stdout, stderr, stdout_is_terminal);
    run_with_loader(args, &mut io, &OrthoConfigLoader)
}

/// Runs the CLI with a custom configuration loader.
#[must_use]
pub(crate) fn run_with_loader<'a, I, W, E, L>(
    args: I,
    io: &'a mut IoStreams<'a, W, E>,
    loader: &'a L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    CliRunner::new(io, loader).run(args)
}

fn prepare_cli_arguments(args: &[OsString], split: &ConfigArgumentSplit) -> Vec<OsString> {
    args.first()
        .into_iter()
        .chain(args.get(split.command_start..).unwrap_or_default())
        .cloned()
        .collect()
}

fn build_analyzer(config: &Config) -> Analyzer {
    let engine = TreeSitterDialectEngine::new()
        .with_globals(config.globals().iter().cloned())
        .with_report_undeclared(config.report_undeclared());
    Analyzer::new(config.attributes().clone(), Box::new(engine))
}

fn analyse_file(
    analyzer: &Analyzer,
    path: &Utf8Path,
    language_override: Option<LanguageId>,
) -> Result<(SourceDocument, Analysis), AppError> {
    let language = language_override
        .or_else(|| LanguageId::from_path(path.as_std_path()))
        .ok_or_else(|| AppError::UnknownLanguage {
            path: path.to_path_buf(),
        })?;
    let text = fs::read_to_string(path).map_err(|source| AppError::ReadSource {
        path: path.to_path_buf(),
        source,
    })?;
    let document = SourceDocument::new(text, language, path.as_str());
    let analysis = analyzer.analyze(&document);
    debug!(
        target: "ssjs::cli",
        path = path.as_str(),
        %language,
        errors = analysis.summary().errors,
        warnings = analysis.summary().warnings,
        "analysed file"
    );
    Ok((document, analysis))
}

#[cfg(test)]
mod tests;
