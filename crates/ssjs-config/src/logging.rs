//! Output format of the checker's own log events.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How `ssjs` writes its tracing events to stderr.
///
/// Parsed case-insensitively from `--log-format`, `SSJS_LOG_FORMAT` or the
/// `log_format` key of `.ssjs.toml`.
#[derive(
    Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// One JSON object per event, for CI log collectors.
    Json,
    /// One terse line per event, for interactive runs.
    #[default]
    Compact,
}

/// Error returned when a `log_format` value names no [`LogFormat`].
pub type LogFormatParseError = strum::ParseError;
