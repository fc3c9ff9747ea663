//! Merging of per-stage diagnostics into one ordered report.

use serde::Serialize;
use ssjs_core::{Diagnostic, Severity};

/// Error and warning counts for one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticSummary {
    /// Number of error diagnostics.
    pub errors: usize,
    /// Number of warning diagnostics.
    pub warnings: usize,
}

impl DiagnosticSummary {
    /// Counts the severities in `diagnostics`.
    #[must_use]
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Self::default(), |summary, diagnostic| match diagnostic.severity() {
                Severity::Error => Self {
                    errors: summary.errors + 1,
                    ..summary
                },
                Severity::Warning => Self {
                    warnings: summary.warnings + 1,
                    ..summary
                },
            })
    }

    /// Returns the total number of diagnostics.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.errors + self.warnings
    }
}

/// The outcome of analysing one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Analysis {
    diagnostics: Vec<Diagnostic>,
    summary: DiagnosticSummary,
}

impl Analysis {
    /// Returns the diagnostics ordered by line, then column.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Consumes the analysis, returning its diagnostics.
    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Returns the severity counts.
    #[must_use]
    pub const fn summary(&self) -> DiagnosticSummary {
        self.summary
    }

    /// Returns `true` when any diagnostic is an error.
    #[must_use]
    pub const fn has_errors(&self) -> bool {
        self.summary.errors > 0
    }
}

/// Merges the diagnostics of every stage into a single ordered list.
///
/// Lists are concatenated in pipeline order and then sorted by line and
/// column with a stable sort, so diagnostics at the same position keep their
/// stage order. Duplicates are kept.
#[must_use]
pub fn aggregate(
    scanner: Vec<Diagnostic>,
    attributes: Vec<Diagnostic>,
    rules: Vec<Diagnostic>,
    engine: Vec<Diagnostic>,
) -> Analysis {
    let mut diagnostics = scanner;
    diagnostics.extend(attributes);
    diagnostics.extend(rules);
    diagnostics.extend(engine);
    diagnostics.sort_by_key(Diagnostic::position);
    let summary = DiagnosticSummary::of(&diagnostics);
    Analysis {
        diagnostics,
        summary,
    }
}
