//! Tree-sitter parsing wrapper with error recovery.
//!
//! This module wraps the raw Tree-sitter parser configured with the
//! JavaScript grammar and provides structured access to parse results and
//! syntax errors.

use std::ops::Range;

use ssjs_core::{LineCol, LineIndex};

use crate::error::SyntaxError;
use crate::position::point_to_line_col;

const CONTEXT_LIMIT: usize = 40;

/// Result of parsing script text.
///
/// Tree-sitter is error-tolerant, so a parse result may contain both a valid
/// tree and error nodes.
#[derive(Debug)]
pub struct ParseResult {
    tree: tree_sitter::Tree,
    source: String,
}

impl ParseResult {
    /// Returns the parsed syntax tree.
    #[must_use]
    pub const fn tree(&self) -> &tree_sitter::Tree {
        &self.tree
    }

    /// Returns the source code that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the root node of the syntax tree.
    #[must_use]
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    /// Returns whether the tree contains ERROR or MISSING nodes.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Collects the outermost syntax errors in document order.
    #[must_use]
    pub fn errors(&self) -> Vec<SyntaxErrorInfo> {
        let index = LineIndex::new(&self.source);
        let mut errors = Vec::new();
        collect_error_nodes(self.tree.root_node(), &self.source, &index, &mut errors);
        errors
    }
}

/// Information about a syntax error found during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxErrorInfo {
    /// Byte range of the error in the source.
    pub byte_range: Range<usize>,
    /// Position where the error starts.
    pub position: LineCol,
    /// The first line of the offending text, truncated if long.
    pub context: String,
    /// Human-readable description of the error.
    pub message: String,
}

impl SyntaxErrorInfo {
    fn from_node(node: tree_sitter::Node<'_>, source: &str, index: &LineIndex<'_>) -> Self {
        let byte_range = node.byte_range();

        let context = source
            .get(byte_range.clone())
            .and_then(|text| text.trim().lines().next())
            .map(|line| {
                if line.chars().count() > CONTEXT_LIMIT {
                    let truncated: String = line.chars().take(CONTEXT_LIMIT - 3).collect();
                    format!("{truncated}...")
                } else {
                    line.to_owned()
                }
            })
            .unwrap_or_default();

        let message = if node.is_missing() {
            format!("syntax error: missing '{}'", node.kind())
        } else if context.is_empty() {
            String::from("syntax error")
        } else {
            format!("syntax error near '{context}'")
        };

        Self {
            position: point_to_line_col(node.start_position(), index),
            byte_range,
            context,
            message,
        }
    }
}

/// Tree-sitter parser configured for script text.
pub struct Parser {
    inner: tree_sitter::Parser,
}

impl Parser {
    /// Creates a new parser.
    ///
    /// # Errors
    ///
    /// Returns an error if the Tree-sitter parser cannot be initialised with
    /// the grammar.
    pub fn new() -> Result<Self, SyntaxError> {
        let mut inner = tree_sitter::Parser::new();
        let language: tree_sitter::Language = tree_sitter_javascript::LANGUAGE.into();
        inner
            .set_language(&language)
            .map_err(|e| SyntaxError::parser_init(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Parses source code and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the parser fails to produce a syntax tree.
    pub fn parse(&mut self, source: &str) -> Result<ParseResult, SyntaxError> {
        let tree = self
            .inner
            .parse(source, None)
            .ok_or_else(|| SyntaxError::parse("parser produced no tree"))?;

        Ok(ParseResult {
            tree,
            source: source.to_owned(),
        })
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

/// Collects ERROR and MISSING nodes without descending into reported ones.
fn collect_error_nodes(
    node: tree_sitter::Node<'_>,
    source: &str,
    index: &LineIndex<'_>,
    errors: &mut Vec<SyntaxErrorInfo>,
) {
    if node.is_error() || node.is_missing() {
        errors.push(SyntaxErrorInfo::from_node(node, source, index));
        return;
    }
    if !node.has_error() {
        return;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_error_nodes(child, source, index, errors);
    }
}
