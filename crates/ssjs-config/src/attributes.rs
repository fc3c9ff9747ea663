//! Vocabulary accepted on script delimiter attributes.

use serde::{Deserialize, Serialize};

/// Accepted values for the attributes of an opening script delimiter.
///
/// Every comparison against the table is ASCII case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeTable {
    /// `runat` values that mark a region for server execution.
    pub server_targets: Vec<String>,
    /// `runat` values that mark a region for client execution.
    pub client_targets: Vec<String>,
    /// Accepted `language` values. The first entry is the canonical spelling
    /// suggested in messages.
    pub languages: Vec<String>,
    /// `language` values that get a dedicated rejection message.
    pub rejected_languages: Vec<String>,
    /// Accepted `executioncontexttype` values.
    pub context_types: Vec<String>,
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self {
            server_targets: owned(&["server"]),
            client_targets: owned(&["client"]),
            languages: owned(&["javascript"]),
            rejected_languages: owned(&["ampscript"]),
            context_types: owned(&["post", "get"]),
        }
    }
}

impl AttributeTable {
    /// Returns `true` when `value` names a server execution target.
    #[must_use]
    pub fn is_server_target(&self, value: &str) -> bool {
        contains(&self.server_targets, value)
    }

    /// Returns `true` when `value` names a client execution target.
    #[must_use]
    pub fn is_client_target(&self, value: &str) -> bool {
        contains(&self.client_targets, value)
    }

    /// Returns `true` when `value` is an accepted language.
    #[must_use]
    pub fn is_supported_language(&self, value: &str) -> bool {
        contains(&self.languages, value)
    }

    /// Returns `true` when `value` is a language with a dedicated rejection.
    #[must_use]
    pub fn is_rejected_language(&self, value: &str) -> bool {
        contains(&self.rejected_languages, value)
    }

    /// Returns `true` when `value` is an accepted execution context type.
    #[must_use]
    pub fn is_context_type(&self, value: &str) -> bool {
        contains(&self.context_types, value)
    }

    /// Returns the language spelling suggested in messages.
    #[must_use]
    pub fn canonical_language(&self) -> &str {
        self.languages.first().map_or("javascript", String::as_str)
    }
}

fn contains(values: &[String], candidate: &str) -> bool {
    let trimmed = candidate.trim();
    values
        .iter()
        .any(|value| value.eq_ignore_ascii_case(trimmed))
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}
