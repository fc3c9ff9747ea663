//! Analysis pipeline for server-side script embedded in markup.
//!
//! A document passes through four stages:
//!
//! 1. The [scanner](scan) finds script regions delimited by
//!    `<script runat="server">` tags and builds a masked copy of the document
//!    that keeps only region code.
//! 2. The [`AttributeValidator`] checks each opening delimiter's execution
//!    target, language and execution context type.
//! 3. The [line rules](RULES) flag block-scoped declarations, arrow
//!    functions, `async`/`await`, trailing commas and module syntax.
//! 4. A [`DialectEngine`](ssjs_core::DialectEngine) checks the masked copy.
//!
//! The [`Analyzer`] runs the stages and [`aggregate`] merges their findings
//! into one [`Analysis`] ordered by position.
//!
//! # Example
//!
//! ```
//! use ssjs_core::{LanguageId, SourceDocument};
//! use ssjs_lint::Analyzer;
//!
//! let doc = SourceDocument::new(
//!     "<script runat=\"server\">\nlet x = 1;\n</script>",
//!     LanguageId::Html,
//!     "page.html",
//! );
//! let analysis = Analyzer::default().analyze(&doc);
//! assert_eq!(analysis.summary().errors, 1);
//! assert_eq!(analysis.diagnostics().first().map(|d| d.line()), Some(2));
//! ```

mod aggregate;
mod analyzer;
mod attributes;
mod lexer;
mod rules;
mod scanner;

pub use aggregate::{Analysis, DiagnosticSummary, aggregate};
pub use analyzer::Analyzer;
pub use attributes::{
    AttributeValidator, AttributeValue, CONTEXT_NAME_ATTRIBUTE, CONTEXT_TYPE_ATTRIBUTE,
    DelimiterAttributes, ExecutionTarget, LANGUAGE_ATTRIBUTE, TARGET_ATTRIBUTE, parse_attributes,
};
pub use rules::{LineRule, LineView, RULES, RuleHit, apply_rules};
pub use scanner::{CodeRegion, Scan, Segment, SegmentKind, scan};

#[cfg(test)]
mod tests;
