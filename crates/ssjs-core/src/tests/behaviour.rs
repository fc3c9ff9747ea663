//! Behaviour-driven tests for `ssjs_core` types.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{
    Diagnostic, DiagnosticCode, DiagnosticSource, LanguageId, LanguageParseError, LineCol,
    LineIndex,
};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn as_line_col(&self) -> LineCol {
        let (line, column) = self
            .as_str()
            .split_once(':')
            .expect("position should be line:column");
        LineCol::new(
            line.parse().expect("valid line"),
            column.parse().expect("valid column"),
        )
    }
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    diagnostic: Option<Diagnostic>,
    language_name: Option<String>,
    language: Option<Result<LanguageId, LanguageParseError>>,
    text: Option<String>,
    located: Option<LineCol>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("an attribute diagnostic at line {line} column {column}")]
fn given_attribute_diagnostic(world: &mut TestWorld, line: u32, column: u32) {
    world.diagnostic = Some(Diagnostic::error(
        DiagnosticCode::UnsupportedLanguage,
        DiagnosticSource::Attributes,
        "unsupported language",
        LineCol::new(line, column),
    ));
}

#[given("the language name {name}")]
fn given_language_name(world: &mut TestWorld, name: QuotedString) {
    world.language_name = Some(name.as_str().to_owned());
}

#[given("the document text {text}")]
fn given_document_text(world: &mut TestWorld, text: QuotedString) {
    world.text = Some(text.as_str().replace("\\n", "\n"));
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the diagnostic is relocated to an origin at line {origin}")]
fn when_relocated(world: &mut TestWorld, origin: QuotedString) {
    let diagnostic = world.diagnostic.take().expect("diagnostic should be set");
    world.diagnostic = Some(diagnostic.relocated(origin.as_line_col()));
}

#[when("the language name is parsed")]
fn when_language_parsed(world: &mut TestWorld) {
    let name = world
        .language_name
        .as_deref()
        .expect("language name should be set");
    world.language = Some(name.parse());
}

#[when("byte offset {offset} is located")]
fn when_offset_located(world: &mut TestWorld, offset: usize) {
    let text = world.text.as_deref().expect("text should be set");
    world.located = Some(LineIndex::new(text).line_col(offset));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the diagnostic position is {expected}")]
fn then_diagnostic_position(world: &mut TestWorld, expected: QuotedString) {
    let diagnostic = world.diagnostic.as_ref().expect("diagnostic should be set");
    assert_eq!(diagnostic.position(), expected.as_line_col());
}

#[then("the resolved language is {expected}")]
fn then_resolved_language(world: &mut TestWorld, expected: QuotedString) {
    let language = world
        .language
        .as_ref()
        .expect("language should be parsed")
        .as_ref()
        .expect("language should resolve");
    assert_eq!(language.as_str(), expected.as_str());
}

#[then("the located position is {expected}")]
fn then_located_position(world: &mut TestWorld, expected: QuotedString) {
    let located = world.located.expect("position should be located");
    assert_eq!(located, expected.as_line_col());
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/ssjs_core.feature")]
fn ssjs_core_behaviour(world: TestWorld) {
    let _ = world;
}
