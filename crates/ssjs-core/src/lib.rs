//! Core data model for the SSJS analysis pipeline.
//!
//! This crate holds the types shared by every stage of the pipeline: the
//! input document and its declared language, source positions, the
//! diagnostic record each stage emits, and the seam through which an external
//! dialect engine plugs into the analysis.
//!
//! # Core types
//!
//! - [`SourceDocument`] and [`LanguageId`]: the immutable analysis input
//! - [`LineCol`], [`ByteSpan`] and [`LineIndex`]: positions, plus conversion
//!   from byte offsets to editor coordinates
//! - [`Diagnostic`], [`Severity`], [`DiagnosticCode`] and
//!   [`DiagnosticSource`]: findings reported to the caller
//! - [`DialectEngine`] and [`EngineError`]: the dialect engine contract
//!
//! # Example
//!
//! ```
//! use ssjs_core::{LanguageId, LineIndex, SourceDocument};
//!
//! let document = SourceDocument::new("var a = 1;\nWrite(a);", LanguageId::Ssjs, "demo.ssjs");
//! let index = LineIndex::new(document.text());
//! let position = index.line_col(11);
//! assert_eq!(position.line(), 2);
//! assert_eq!(position.column(), 0);
//! ```

mod diagnostic;
mod document;
mod engine;
mod language;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticSource, Severity};
pub use document::SourceDocument;
pub use engine::{DialectEngine, DisabledEngine, EngineError};
pub use language::{LanguageId, LanguageParseError};
pub use span::{ByteSpan, LineCol, LineIndex};

#[cfg(test)]
mod tests;
