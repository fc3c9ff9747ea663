//! Tree-sitter backed [`DialectEngine`].

use std::sync::Mutex;

use ssjs_core::{
    Diagnostic, DiagnosticCode, DiagnosticSource, DialectEngine, EngineError, LineIndex,
};
use tracing::debug;

use crate::error::SyntaxError;
use crate::globals::KnownGlobals;
use crate::legacy::find_violations;
use crate::parser::Parser;
use crate::undeclared::find_undeclared;

/// Checks masked script text with the JavaScript grammar.
///
/// Reports syntax errors and constructs newer than ECMAScript 3 as errors,
/// and references to undeclared identifiers as warnings.
///
/// # Thread Safety
///
/// The parser is created lazily on first use and guarded by a mutex, so one
/// engine can be shared across threads.
pub struct TreeSitterDialectEngine {
    parser: Mutex<Option<Parser>>,
    globals: KnownGlobals,
    report_undeclared: bool,
}

impl TreeSitterDialectEngine {
    /// Creates an engine with the built-in globals and undeclared-identifier
    /// reporting enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Mutex::new(None),
            globals: KnownGlobals::default(),
            report_undeclared: true,
        }
    }

    /// Adds identifiers the runtime provides beyond the built-in set.
    #[must_use]
    pub fn with_globals<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.globals = KnownGlobals::with_extra(extra);
        self
    }

    /// Enables or disables undeclared-identifier warnings.
    #[must_use]
    pub const fn with_report_undeclared(mut self, enabled: bool) -> Self {
        self.report_undeclared = enabled;
        self
    }

    fn run(&self, masked: &str) -> Result<Vec<Diagnostic>, SyntaxError> {
        let mut guard = self
            .parser
            .lock()
            .map_err(|_| SyntaxError::internal_error("parser lock poisoned"))?;
        if guard.is_none() {
            *guard = Some(Parser::new()?);
        }
        let Some(parser) = guard.as_mut() else {
            return Err(SyntaxError::internal_error("parser missing after initialisation"));
        };
        let result = parser.parse(masked)?;
        drop(guard);

        let index = LineIndex::new(masked);
        let mut diagnostics: Vec<Diagnostic> = result
            .errors()
            .into_iter()
            .map(|error| {
                Diagnostic::error(
                    DiagnosticCode::SyntaxError,
                    DiagnosticSource::Engine,
                    error.message,
                    error.position,
                )
            })
            .collect();

        diagnostics.extend(
            find_violations(result.root_node(), &index)
                .into_iter()
                .map(|violation| {
                    Diagnostic::error(
                        DiagnosticCode::UnsupportedSyntax,
                        DiagnosticSource::Engine,
                        violation.message,
                        violation.position,
                    )
                }),
        );

        if self.report_undeclared {
            diagnostics.extend(
                find_undeclared(result.root_node(), result.source(), &index, &self.globals)
                    .into_iter()
                    .map(|reference| {
                        Diagnostic::warning(
                            DiagnosticCode::UndeclaredIdentifier,
                            DiagnosticSource::Engine,
                            format!("'{}' is not defined", reference.name),
                            reference.position,
                        )
                    }),
            );
        }

        debug!(
            target: "ssjs::engine",
            findings = diagnostics.len(),
            "tree-sitter check complete"
        );
        Ok(diagnostics)
    }
}

impl Default for TreeSitterDialectEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TreeSitterDialectEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeSitterDialectEngine")
            .field("report_undeclared", &self.report_undeclared)
            .finish_non_exhaustive()
    }
}

impl DialectEngine for TreeSitterDialectEngine {
    fn check(&self, masked: &str) -> Result<Vec<Diagnostic>, EngineError> {
        self.run(masked).map_err(EngineError::from)
    }
}
