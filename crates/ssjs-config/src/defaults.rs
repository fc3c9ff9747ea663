use crate::attributes::AttributeTable;
use crate::logging::LogFormat;

/// Default log filter expression used by the binary.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Default log filter expression used by the binary.
#[must_use]
pub const fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the binary.
#[must_use]
pub const fn default_log_format() -> LogFormat {
    LogFormat::Compact
}

/// Default delimiter attribute vocabulary.
#[must_use]
pub fn default_attribute_table() -> AttributeTable {
    AttributeTable::default()
}

/// Undeclared identifiers are reported unless configuration says otherwise.
#[must_use]
pub const fn default_report_undeclared() -> bool {
    true
}
