//! Detection of syntax newer than the ECMAScript 3 level the runtime accepts.
//!
//! Constructs already covered by the line rules (block-scoped declarations,
//! arrow functions, `async`/`await`, module syntax and trailing commas) are
//! left to those rules.

use ssjs_core::LineIndex;

use crate::position::point_to_line_col;

/// An unsupported construct found in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LegacyViolation {
    pub(crate) position: ssjs_core::LineCol,
    pub(crate) message: String,
}

const PATTERN_KINDS: &[&str] = &[
    "object_pattern",
    "array_pattern",
    "pair_pattern",
    "assignment_pattern",
    "object_assignment_pattern",
    "rest_pattern",
];

/// Walks the tree and reports each unsupported construct once.
pub(crate) fn find_violations(
    root: tree_sitter::Node<'_>,
    index: &LineIndex<'_>,
) -> Vec<LegacyViolation> {
    let mut found = Vec::new();
    visit(root, index, &mut found);
    found
}

fn visit(node: tree_sitter::Node<'_>, index: &LineIndex<'_>, found: &mut Vec<LegacyViolation>) {
    if node.is_error() {
        return;
    }
    if let Some(feature) = classify(node) {
        found.push(LegacyViolation {
            position: point_to_line_col(node.start_position(), index),
            message: format!("{feature} not supported in SSJS"),
        });
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit(child, index, found);
    }
}

fn classify(node: tree_sitter::Node<'_>) -> Option<&'static str> {
    let parent_kind = node.parent().map(|parent| parent.kind());
    match node.kind() {
        "template_string" => Some("template literals are"),
        "class_declaration" | "class" => Some("classes are"),
        "spread_element" => Some("spread syntax is"),
        "generator_function_declaration" | "generator_function" => Some("generators are"),
        "optional_chain" => Some("optional chaining is"),
        "shorthand_property_identifier" => Some("shorthand properties are"),
        "computed_property_name" if parent_kind != Some("class_body") => {
            Some("computed property names are")
        }
        "method_definition" if parent_kind == Some("object") => Some("object methods are"),
        "rest_pattern" if parent_kind == Some("formal_parameters") => {
            Some("rest parameters are")
        }
        "assignment_pattern" if parent_kind == Some("formal_parameters") => {
            Some("default parameter values are")
        }
        "object_pattern" | "array_pattern"
            if !parent_kind.is_some_and(|kind| PATTERN_KINDS.contains(&kind)) =>
        {
            Some("destructuring is")
        }
        "for_in_statement" if operator_is(node, "of") => Some("for...of loops are"),
        "binary_expression" if operator_is(node, "**") => Some("the exponent operator is"),
        "binary_expression" if operator_is(node, "??") => Some("nullish coalescing is"),
        "augmented_assignment_expression" if operator_is(node, "**=") => {
            Some("the exponent operator is")
        }
        "augmented_assignment_expression"
            if operator_is(node, "??=") || operator_is(node, "||=") || operator_is(node, "&&=") =>
        {
            Some("logical assignment is")
        }
        _ => None,
    }
}

fn operator_is(node: tree_sitter::Node<'_>, operator: &str) -> bool {
    node.child_by_field_name("operator")
        .is_some_and(|child| child.kind() == operator)
}
