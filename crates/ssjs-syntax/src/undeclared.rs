//! References to identifiers that are never declared.
//!
//! Declarations are collected across the whole document without modelling
//! nested function scopes, so a name declared anywhere counts as declared
//! everywhere.

use std::collections::HashSet;

use ssjs_core::{LineCol, LineIndex};

use crate::globals::KnownGlobals;
use crate::position::point_to_line_col;

/// A reference to an undeclared identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UndeclaredReference {
    pub(crate) name: String,
    pub(crate) position: LineCol,
}

/// Finds identifier references that are neither declared nor runtime globals.
pub(crate) fn find_undeclared(
    root: tree_sitter::Node<'_>,
    source: &str,
    index: &LineIndex<'_>,
    globals: &KnownGlobals,
) -> Vec<UndeclaredReference> {
    let mut bindings = Bindings::default();
    bindings.collect(root, source);

    let mut found = Vec::new();
    visit_references(root, source, index, globals, &bindings, &mut found);
    found
}

#[derive(Debug, Default)]
struct Bindings {
    names: HashSet<String>,
    sites: HashSet<usize>,
}

impl Bindings {
    fn collect(&mut self, node: tree_sitter::Node<'_>, source: &str) {
        match node.kind() {
            "variable_declarator" => self.bind_field(node, "name", source),
            "function_declaration"
            | "function_expression"
            | "generator_function_declaration"
            | "generator_function"
            | "class_declaration" => self.bind_field(node, "name", source),
            "formal_parameters" => {
                let mut cursor = node.walk();
                for parameter in node.named_children(&mut cursor) {
                    self.bind_pattern(parameter, source);
                }
            }
            "arrow_function" => self.bind_field(node, "parameter", source),
            "catch_clause" => self.bind_field(node, "parameter", source),
            "for_in_statement" if node.child_by_field_name("kind").is_some() => {
                self.bind_field(node, "left", source);
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            self.collect(child, source);
        }
    }

    fn bind_field(&mut self, node: tree_sitter::Node<'_>, field: &str, source: &str) {
        if let Some(target) = node.child_by_field_name(field) {
            self.bind_pattern(target, source);
        }
    }

    fn bind_pattern(&mut self, node: tree_sitter::Node<'_>, source: &str) {
        match node.kind() {
            "identifier" | "shorthand_property_identifier_pattern" => {
                if let Some(name) = source.get(node.byte_range()) {
                    self.names.insert(name.to_owned());
                    self.sites.insert(node.start_byte());
                }
            }
            "pair_pattern" => {
                if let Some(value) = node.child_by_field_name("value") {
                    self.bind_pattern(value, source);
                }
            }
            "assignment_pattern" | "object_assignment_pattern" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.bind_pattern(left, source);
                }
            }
            "object_pattern" | "array_pattern" | "rest_pattern" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.bind_pattern(child, source);
                }
            }
            _ => {}
        }
    }
}

fn visit_references(
    node: tree_sitter::Node<'_>,
    source: &str,
    index: &LineIndex<'_>,
    globals: &KnownGlobals,
    bindings: &Bindings,
    found: &mut Vec<UndeclaredReference>,
) {
    if node.is_error() {
        return;
    }
    if node.kind() == "identifier" && !bindings.sites.contains(&node.start_byte()) {
        if let Some(name) = source.get(node.byte_range()) {
            if !bindings.names.contains(name) && !globals.contains(name) {
                found.push(UndeclaredReference {
                    name: name.to_owned(),
                    position: point_to_line_col(node.start_position(), index),
                });
            }
        }
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        visit_references(child, source, index, globals, bindings, found);
    }
}
