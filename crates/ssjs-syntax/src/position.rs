//! Shared position conversion helpers.
//!
//! Tree-sitter positions are zero-based rows with byte columns. Diagnostics
//! use one-based lines with zero-based character columns.

use ssjs_core::{LineCol, LineIndex};

/// Converts a Tree-sitter point into a diagnostic position.
#[must_use]
pub(crate) fn point_to_line_col(point: tree_sitter::Point, index: &LineIndex<'_>) -> LineCol {
    // Line numbers will realistically never exceed u32::MAX.
    let line = u32::try_from(point.row.saturating_add(1)).unwrap_or(u32::MAX);
    LineCol::new(line, index.char_column(line, point.column))
}
