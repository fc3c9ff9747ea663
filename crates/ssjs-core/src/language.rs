//! Document language identifiers.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The declared language of an input document.
///
/// A pure-code document is treated as a single code region; a markup document
/// is scanned for delimited script regions.
///
/// # Example
///
/// ```
/// use ssjs_core::LanguageId;
///
/// let lang: LanguageId = "amp".parse().expect("known alias");
/// assert_eq!(lang, LanguageId::Html);
/// assert!(!lang.is_pure_code());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LanguageId {
    /// A document consisting entirely of server-side script.
    Ssjs,
    /// Markup that may embed delimited script regions.
    Html,
}

impl LanguageId {
    /// Detects the language from a file extension.
    ///
    /// Returns `None` if the extension is not recognised.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "ssjs" | "js" => Some(Self::Ssjs),
            "html" | "htm" | "amp" | "ampscript" => Some(Self::Html),
            _ => None,
        }
    }

    /// Detects the language from a file path by examining its extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Returns `true` when the whole document is code.
    #[must_use]
    pub const fn is_pure_code(self) -> bool {
        matches!(self, Self::Ssjs)
    }

    /// Returns the canonical identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ssjs => "ssjs",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised when parsing a language identifier fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unsupported document language: '{0}'")]
pub struct LanguageParseError(String);

impl LanguageParseError {
    /// Returns the input that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageId {
    type Err = LanguageParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalised = input.trim().to_ascii_lowercase();
        match normalised.as_str() {
            "ssjs" | "javascript" | "js" => Ok(Self::Ssjs),
            "html" | "markup" | "htm" | "amp" => Ok(Self::Html),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}
