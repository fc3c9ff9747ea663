//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    ReadSource { path: Utf8PathBuf, source: io::Error },
    #[error("cannot infer the document language of {path}; pass --language ssjs or --language html")]
    UnknownLanguage { path: Utf8PathBuf },
    #[error("failed to serialise report for {path}: {source}")]
    SerialiseReport {
        path: Utf8PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
