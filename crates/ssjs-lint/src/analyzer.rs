//! The end-to-end analysis pipeline.

use ssjs_config::AttributeTable;
use ssjs_core::{Diagnostic, DialectEngine, DisabledEngine, SourceDocument};
use tracing::{debug, warn};

use crate::aggregate::{Analysis, aggregate};
use crate::attributes::{AttributeValidator, ExecutionTarget};
use crate::lexer::blank_preserving_bytes;
use crate::rules::apply_rules;
use crate::scanner::{Scan, scan};

/// Runs the scanner, the attribute validator, the line rules and the dialect
/// engine over a document and merges their findings.
///
/// An analyzer holds no per-document state, so one instance can analyse any
/// number of documents, including concurrently.
pub struct Analyzer {
    validator: AttributeValidator,
    engine: Box<dyn DialectEngine>,
}

impl Analyzer {
    /// Creates an analyzer with the given accepted-value table and engine.
    #[must_use]
    pub fn new(table: AttributeTable, engine: Box<dyn DialectEngine>) -> Self {
        Self {
            validator: AttributeValidator::new(table),
            engine,
        }
    }

    /// Creates an analyzer that runs without a dialect engine.
    #[must_use]
    pub fn without_engine(table: AttributeTable) -> Self {
        Self::new(table, Box::new(DisabledEngine))
    }

    /// Returns the attribute validator.
    #[must_use]
    pub const fn validator(&self) -> &AttributeValidator {
        &self.validator
    }

    /// Analyses one document.
    ///
    /// The same document always yields the same result. An engine failure is
    /// logged and contributes no diagnostics.
    #[must_use]
    pub fn analyze(&self, document: &SourceDocument) -> Analysis {
        let text = document.text();
        let scanned = scan(document);
        debug!(
            target: "ssjs::analyzer",
            path = document.path(),
            regions = scanned.regions().len(),
            "scanned document"
        );

        let mut attribute_diagnostics = Vec::new();
        let mut rule_diagnostics = Vec::new();
        for region in scanned.regions() {
            let target = if region.is_synthetic() {
                ExecutionTarget::Server
            } else {
                self.validator.target(region.attributes())
            };
            if let Some(opening) = region.opening().and_then(|span| span.slice(text)) {
                let origin = region.opening_start();
                attribute_diagnostics.extend(
                    self.validator
                        .validate(opening)
                        .into_iter()
                        .map(|diagnostic| diagnostic.relocated(origin)),
                );
            }
            if target == ExecutionTarget::Client {
                continue;
            }
            let start = region.start();
            rule_diagnostics.extend(apply_rules(
                region.text(text),
                start.line(),
                start.column(),
            ));
        }

        let engine_diagnostics = self.run_engine(document, &self.engine_view(&scanned));
        aggregate(
            scanned.into_diagnostics(),
            attribute_diagnostics,
            rule_diagnostics,
            engine_diagnostics,
        )
    }

    /// Returns the masked document with browser-script regions blanked too.
    fn engine_view(&self, scanned: &Scan) -> String {
        let masked = scanned.masked();
        let mut view = String::with_capacity(masked.len());
        let mut cursor = 0;
        for region in scanned.regions() {
            if self.validator.target(region.attributes()) != ExecutionTarget::Client {
                continue;
            }
            let span = region.span();
            view.push_str(masked.get(cursor..span.start()).unwrap_or_default());
            blank_preserving_bytes(span.slice(masked).unwrap_or_default(), &mut view);
            cursor = span.end();
        }
        view.push_str(masked.get(cursor..).unwrap_or_default());
        view
    }

    fn run_engine(&self, document: &SourceDocument, view: &str) -> Vec<Diagnostic> {
        match self.engine.check(view) {
            Ok(diagnostics) => diagnostics,
            Err(error) => {
                warn!(
                    target: "ssjs::analyzer",
                    path = document.path(),
                    %error,
                    "dialect engine unavailable; continuing without its findings"
                );
                Vec::new()
            }
        }
    }
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::without_engine(AttributeTable::default())
    }
}
