//! CLI entrypoint for the SSJS analyzer.
//!
//! The binary delegates to [`ssjs_cli::run`], which loads configuration,
//! parses command-line arguments, analyses each requested file and renders
//! the findings.

use std::io::{self, IsTerminal, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let stdout_is_terminal = io::stdout().is_terminal();
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    ssjs_cli::run(
        std::env::args_os(),
        &mut stdout,
        &mut stderr,
        stdout_is_terminal,
    )
}
