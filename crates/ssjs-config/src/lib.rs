//! Layered configuration for the SSJS checker.
//!
//! Values are resolved by `ortho_config` from built-in defaults, a
//! `.ssjs.toml` file (or the file named by `--config-path` or
//! `SSJS_CONFIG_PATH`), `SSJS_*` environment variables and command-line flags,
//! with later layers taking precedence.

mod attributes;
mod defaults;
mod logging;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use attributes::AttributeTable;
pub use defaults::{
    DEFAULT_LOG_FILTER, default_attribute_table, default_log_filter, default_log_filter_string,
    default_log_format, default_report_undeclared,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use ortho_config::{OrthoError, OrthoResult};

/// Resolved configuration shared by the analysis pipeline and the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SSJS")]
pub struct Config {
    /// Tracing filter expression applied to diagnostics logging.
    #[ortho_config(default = default_log_filter_string())]
    pub log_filter: String,
    /// Output format for diagnostics logging.
    #[ortho_config(default = default_log_format())]
    pub log_format: LogFormat,
    /// Extra global identifiers known to the runtime.
    #[serde(default)]
    #[ortho_config(default = Vec::new(), merge_strategy = "append")]
    pub globals: Vec<String>,
    /// Whether references to undeclared identifiers are reported.
    #[ortho_config(default = default_report_undeclared())]
    pub report_undeclared: bool,
    /// Accepted delimiter attribute values.
    #[serde(default)]
    #[ortho_config(skip_cli)]
    pub attributes: AttributeTable,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            globals: Vec::new(),
            report_undeclared: default_report_undeclared(),
            attributes: default_attribute_table(),
        }
    }
}

impl Config {
    /// Returns the tracing filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Returns the logging output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Returns configured extra globals.
    #[must_use]
    pub fn globals(&self) -> &[String] {
        &self.globals
    }

    /// Returns whether undeclared identifiers are reported.
    #[must_use]
    pub const fn report_undeclared(&self) -> bool {
        self.report_undeclared
    }

    /// Returns the delimiter attribute vocabulary.
    #[must_use]
    pub const fn attributes(&self) -> &AttributeTable {
        &self.attributes
    }
}

#[cfg(test)]
mod tests;
