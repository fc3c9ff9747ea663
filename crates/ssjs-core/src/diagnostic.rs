//! Diagnostic types for structured finding reports.
//!
//! Every stage of the pipeline reports problems as [`Diagnostic`] values. A
//! diagnostic carries a stable [`DiagnosticCode`], the stage that produced it,
//! a [`Severity`], a human-readable message and a document position.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::span::LineCol;

/// How serious a finding is.
///
/// Errors fail the analysis; warnings are advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A problem that makes the script invalid for the target runtime.
    Error,
    /// A likely problem that does not block execution.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
        }
    }
}

/// The pipeline stage that produced a diagnostic.
///
/// Variants are declared in pipeline order, so sorting by source reproduces
/// the stage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticSource {
    /// The boundary scanner.
    Scanner,
    /// The delimiter attribute validator.
    Attributes,
    /// The line-oriented dialect rules.
    Rules,
    /// The external dialect engine.
    Engine,
}

impl fmt::Display for DiagnosticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scanner => f.write_str("scanner"),
            Self::Attributes => f.write_str("attributes"),
            Self::Rules => f.write_str("rules"),
            Self::Engine => f.write_str("engine"),
        }
    }
}

/// Stable codes for SSJS diagnostics.
///
/// # Example
///
/// ```
/// use ssjs_core::DiagnosticCode;
///
/// let code = DiagnosticCode::ArrowFunction;
/// assert_eq!(format!("{code}"), "SSJS_ARROW_FUNCTION");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DiagnosticCode {
    /// An opening delimiter without a matching closing delimiter.
    #[serde(rename = "SSJS_UNTERMINATED_REGION")]
    UnterminatedRegion,
    /// The execution target attribute is missing or unsupported.
    #[serde(rename = "SSJS_UNSUPPORTED_EXECUTION_TARGET")]
    UnsupportedExecutionTarget,
    /// The language attribute names the template language.
    #[serde(rename = "SSJS_REJECTED_LANGUAGE")]
    RejectedLanguage,
    /// The language attribute names an unsupported language.
    #[serde(rename = "SSJS_UNSUPPORTED_LANGUAGE")]
    UnsupportedLanguage,
    /// The execution context type attribute is unsupported.
    #[serde(rename = "SSJS_UNSUPPORTED_CONTEXT_TYPE")]
    UnsupportedContextType,
    /// `let` or `const` declaration.
    #[serde(rename = "SSJS_BLOCK_SCOPED_DECLARATION")]
    BlockScopedDeclaration,
    /// Arrow function syntax.
    #[serde(rename = "SSJS_ARROW_FUNCTION")]
    ArrowFunction,
    /// `async` or `await`.
    #[serde(rename = "SSJS_ASYNC_AWAIT")]
    AsyncAwait,
    /// Trailing comma before a closing bracket.
    #[serde(rename = "SSJS_TRAILING_COMMA")]
    TrailingComma,
    /// `import` or `export` statement.
    #[serde(rename = "SSJS_MODULE_SYNTAX")]
    ModuleSyntax,
    /// The script failed to parse.
    #[serde(rename = "SSJS_SYNTAX_ERROR")]
    SyntaxError,
    /// A construct newer than the supported language level.
    #[serde(rename = "SSJS_UNSUPPORTED_SYNTAX")]
    UnsupportedSyntax,
    /// An identifier that is never declared and is not a known global.
    #[serde(rename = "SSJS_UNDECLARED_IDENTIFIER")]
    UndeclaredIdentifier,
}

impl DiagnosticCode {
    /// Returns the stable identifier for this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnterminatedRegion => "SSJS_UNTERMINATED_REGION",
            Self::UnsupportedExecutionTarget => "SSJS_UNSUPPORTED_EXECUTION_TARGET",
            Self::RejectedLanguage => "SSJS_REJECTED_LANGUAGE",
            Self::UnsupportedLanguage => "SSJS_UNSUPPORTED_LANGUAGE",
            Self::UnsupportedContextType => "SSJS_UNSUPPORTED_CONTEXT_TYPE",
            Self::BlockScopedDeclaration => "SSJS_BLOCK_SCOPED_DECLARATION",
            Self::ArrowFunction => "SSJS_ARROW_FUNCTION",
            Self::AsyncAwait => "SSJS_ASYNC_AWAIT",
            Self::TrailingComma => "SSJS_TRAILING_COMMA",
            Self::ModuleSyntax => "SSJS_MODULE_SYNTAX",
            Self::SyntaxError => "SSJS_SYNTAX_ERROR",
            Self::UnsupportedSyntax => "SSJS_UNSUPPORTED_SYNTAX",
            Self::UndeclaredIdentifier => "SSJS_UNDECLARED_IDENTIFIER",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single finding located in the input document.
///
/// # Example
///
/// ```
/// use ssjs_core::{Diagnostic, DiagnosticCode, DiagnosticSource, LineCol, Severity};
///
/// let diag = Diagnostic::new(
///     DiagnosticCode::ArrowFunction,
///     DiagnosticSource::Rules,
///     Severity::Error,
///     "arrow functions are not supported",
///     LineCol::new(3, 8),
/// );
/// assert_eq!(diag.line(), 3);
/// assert!(diag.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    code: DiagnosticCode,
    source: DiagnosticSource,
    severity: Severity,
    message: String,
    line: u32,
    column: u32,
}

impl Diagnostic {
    /// Creates a new diagnostic at `position`.
    #[must_use]
    pub fn new(
        code: DiagnosticCode,
        source: DiagnosticSource,
        severity: Severity,
        message: impl Into<String>,
        position: LineCol,
    ) -> Self {
        Self {
            code,
            source,
            severity,
            message: message.into(),
            line: position.line,
            column: position.column,
        }
    }

    /// Creates an error diagnostic.
    #[must_use]
    pub fn error(
        code: DiagnosticCode,
        source: DiagnosticSource,
        message: impl Into<String>,
        position: LineCol,
    ) -> Self {
        Self::new(code, source, Severity::Error, message, position)
    }

    /// Creates a warning diagnostic.
    #[must_use]
    pub fn warning(
        code: DiagnosticCode,
        source: DiagnosticSource,
        message: impl Into<String>,
        position: LineCol,
    ) -> Self {
        Self::new(code, source, Severity::Warning, message, position)
    }

    /// Returns the diagnostic code.
    #[must_use]
    pub const fn code(&self) -> DiagnosticCode {
        self.code
    }

    /// Returns the stage that produced this diagnostic.
    #[must_use]
    pub const fn source(&self) -> DiagnosticSource {
        self.source
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the one-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the zero-based character column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the position as a [`LineCol`].
    #[must_use]
    pub const fn position(&self) -> LineCol {
        LineCol::new(self.line, self.column)
    }

    /// Returns `true` for error severity.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// Translates a position computed relative to a fragment into document
    /// coordinates, given the document position where the fragment starts.
    ///
    /// Only positions on the fragment's first line are shifted horizontally.
    ///
    /// ```
    /// use ssjs_core::{Diagnostic, DiagnosticCode, DiagnosticSource, LineCol};
    ///
    /// let origin = LineCol::new(4, 10);
    /// let first = Diagnostic::error(
    ///     DiagnosticCode::RejectedLanguage,
    ///     DiagnosticSource::Attributes,
    ///     "rejected",
    ///     LineCol::new(1, 8),
    /// );
    /// assert_eq!(first.relocated(origin).position(), LineCol::new(4, 18));
    ///
    /// let later = Diagnostic::error(
    ///     DiagnosticCode::RejectedLanguage,
    ///     DiagnosticSource::Attributes,
    ///     "rejected",
    ///     LineCol::new(2, 3),
    /// );
    /// assert_eq!(later.relocated(origin).position(), LineCol::new(5, 3));
    /// ```
    #[must_use]
    pub fn relocated(mut self, origin: LineCol) -> Self {
        if self.line <= 1 {
            self.column = self.column.saturating_add(origin.column);
        }
        self.line = self
            .line
            .max(1)
            .saturating_add(origin.line.saturating_sub(1));
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.line, self.column, self.severity, self.code, self.message
        )
    }
}
