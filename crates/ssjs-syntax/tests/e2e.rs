//! End-to-end tests for the Tree-sitter dialect engine.
//!
//! The inputs mimic masked documents: markup is blanked to spaces while
//! region code keeps its original lines and columns.

use rstest::{fixture, rstest};
use ssjs_core::{DiagnosticCode, DialectEngine, EngineError, LineCol, Severity};
use ssjs_syntax::{Parser, SyntaxError, TreeSitterDialectEngine};

/// A masked copy of a page whose only region spans lines 3 to 5.
const MASKED_PAGE: &str = concat!(
    "               \n",
    "                        \n",
    "var total = 0;\n",
    "total = total + Helper.count;\n",
    "Write(total);\n",
    "         \n",
);

#[fixture]
fn engine() -> TreeSitterDialectEngine {
    TreeSitterDialectEngine::new()
}

// =============================================================================
// Happy path
// =============================================================================

#[rstest]
fn blanked_markup_is_invisible_to_the_engine(engine: TreeSitterDialectEngine) {
    let findings = engine
        .check(MASKED_PAGE)
        .unwrap_or_else(|err| panic!("check: {err}"));
    let codes: Vec<_> = findings.iter().map(|d| d.code()).collect();
    assert_eq!(codes, vec![DiagnosticCode::UndeclaredIdentifier]);
}

#[rstest]
fn positions_are_document_coordinates(engine: TreeSitterDialectEngine) {
    let findings = engine
        .check(MASKED_PAGE)
        .unwrap_or_else(|err| panic!("check: {err}"));
    let Some(finding) = findings.first() else {
        panic!("expected one finding");
    };
    assert_eq!(finding.position(), LineCol::new(4, 16));
    assert_eq!(finding.severity(), Severity::Warning);
}

#[test]
fn configured_globals_silence_extra_names() {
    let engine = TreeSitterDialectEngine::new().with_globals(["Helper"]);
    let findings = engine
        .check(MASKED_PAGE)
        .unwrap_or_else(|err| panic!("check: {err}"));
    assert!(findings.is_empty(), "findings: {findings:?}");
}

#[test]
fn parser_reports_error_positions() {
    let mut parser = Parser::new().unwrap_or_else(|err| panic!("parser init: {err}"));
    let result = parser
        .parse("var ok = 1;\nWrite(")
        .unwrap_or_else(|err| panic!("parse: {err}"));

    assert!(result.has_errors());
    let errors = result.errors();
    let Some(first) = errors.first() else {
        panic!("expected a syntax error");
    };
    assert_eq!(first.position.line(), 2);
}

// =============================================================================
// Unhappy path
// =============================================================================

#[rstest]
fn broken_region_is_a_syntax_error(engine: TreeSitterDialectEngine) {
    let findings = engine
        .check("            \nif (ready {\n  Write(1);\n}\n")
        .unwrap_or_else(|err| panic!("check: {err}"));
    assert!(
        findings
            .iter()
            .any(|d| d.code() == DiagnosticCode::SyntaxError && d.line() == 2),
        "findings: {findings:?}"
    );
}

#[rstest]
#[case::init(SyntaxError::parser_init("abi mismatch"), true)]
#[case::parse(SyntaxError::parse("no tree"), false)]
#[case::internal(SyntaxError::internal_error("lock poisoned"), false)]
fn syntax_errors_map_onto_engine_errors(#[case] error: SyntaxError, #[case] unavailable: bool) {
    let message = error.to_string();
    let converted = EngineError::from(error);
    assert_eq!(
        matches!(converted, EngineError::Unavailable { .. }),
        unavailable
    );
    assert!(converted.to_string().ends_with(&message));
}

// =============================================================================
// Snapshot
// =============================================================================

#[rstest]
fn snapshot_mixed_findings(engine: TreeSitterDialectEngine) {
    let masked = "      \nvar greeting = `hi`;\nWrite(greeting + suffix);\n";
    let rendered = engine
        .check(masked)
        .unwrap_or_else(|err| panic!("check: {err}"))
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    insta::assert_snapshot!(rendered, @r"
    2:15: error [SSJS_UNSUPPORTED_SYNTAX] template literals are not supported in SSJS
    3:17: warning [SSJS_UNDECLARED_IDENTIFIER] 'suffix' is not defined
    ");
}
