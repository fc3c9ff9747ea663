//! Shared fixtures for CLI tests.
//!
//! Provides a static configuration loader and a world that writes source
//! files to a temporary directory and runs the CLI against them.

use std::ffi::OsString;
use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result, ensure};
use camino::Utf8PathBuf;
use ssjs_config::Config;
use tempfile::TempDir;

use crate::errors::AppError;
use crate::{ConfigLoader, IoStreams, run_with_loader};

pub(super) struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    pub(super) const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self, _args: &[OsString]) -> Result<Config, AppError> {
        Ok(self.config.clone())
    }
}

pub(super) struct TestWorld {
    pub config: Config,
    pub dir: TempDir,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: Option<ExitCode>,
}

impl TestWorld {
    pub fn new() -> Result<Self> {
        Ok(Self {
            config: Config {
                report_undeclared: false,
                ..Config::default()
            },
            dir: TempDir::new().context("create temporary directory")?,
            stdout: Vec::new(),
            stderr: Vec::new(),
            exit_code: None,
        })
    }

    pub fn path(&self, name: &str) -> Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(self.dir.path().join(name))
            .map_err(|path| anyhow::anyhow!("non UTF-8 path {}", path.display()))
    }

    pub fn write_file(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.path(name)?;
        fs::write(&path, contents).with_context(|| format!("write {path}"))
    }

    /// Runs `command`, resolving every `@name` token to a file in the
    /// temporary directory.
    pub fn run(&mut self, command: &str) -> Result<()> {
        self.stdout.clear();
        self.stderr.clear();
        let args = self.build_args(command)?;
        let loader = StaticConfigLoader::new(self.config.clone());
        let mut io = IoStreams::new(&mut self.stdout, &mut self.stderr, false);
        self.exit_code = Some(run_with_loader(args, &mut io, &loader));
        Ok(())
    }

    fn build_args(&self, command: &str) -> Result<Vec<OsString>> {
        let mut args = vec![OsString::from("ssjs")];
        for token in command.split_whitespace() {
            let unquoted = token.trim_matches('"');
            let resolved = match unquoted.strip_prefix('@') {
                Some(name) => OsString::from(self.path(name)?.as_str()),
                None => OsString::from(unquoted),
            };
            args.push(resolved);
        }
        Ok(args)
    }

    pub fn stdout_text(&self) -> Result<String> {
        String::from_utf8(self.stdout.clone()).context("stdout utf8")
    }

    pub fn stderr_text(&self) -> Result<String> {
        String::from_utf8(self.stderr.clone()).context("stderr utf8")
    }

    pub fn assert_success(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::SUCCESS,
            "expected success, got {exit:?}; stderr: {}",
            self.stderr_text()?
        );
        Ok(())
    }

    pub fn assert_failure(&self) -> Result<()> {
        let exit = self.exit_code.context("exit code recorded")?;
        ensure!(
            exit == ExitCode::FAILURE,
            "expected failure exit code, got {exit:?}"
        );
        Ok(())
    }
}
