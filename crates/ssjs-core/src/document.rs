//! The analysis input.

use crate::language::LanguageId;

/// A document submitted for analysis.
///
/// The pipeline only ever borrows the document; it is never mutated.
///
/// # Example
///
/// ```
/// use ssjs_core::{LanguageId, SourceDocument};
///
/// let doc = SourceDocument::new("<p>hi</p>", LanguageId::Html, "page.html");
/// assert_eq!(doc.language(), LanguageId::Html);
/// assert_eq!(doc.path(), "page.html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    text: String,
    language: LanguageId,
    path: String,
}

impl SourceDocument {
    /// Creates a document from its text, declared language and display path.
    #[must_use]
    pub fn new(text: impl Into<String>, language: LanguageId, path: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language,
            path: path.into(),
        }
    }

    /// Returns the full document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the declared language.
    #[must_use]
    pub const fn language(&self) -> LanguageId {
        self.language
    }

    /// Returns the path or name used when reporting on this document.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}
