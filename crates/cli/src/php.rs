// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-method discovery in PHP sources.
//!
//! Coverage data can only name tests that have already run; a test added or
//! rewritten in the diff has no coverage history, so it is found statically
//! instead. Recognition is by the `test` name-prefix convention only, not by
//! annotations or attributes.

use std::collections::BTreeMap;

use tree_sitter::{Language, Node, Parser};

use crate::ranges::LineRange;

/// Outcome of discovering test methods in one source file.
///
/// A skip is an ordinary outcome, not an error: a file on a different branch
/// than the coverage data may no longer parse cleanly, and the run must
/// still produce a partial result.
#[derive(Debug)]
pub enum Discovery {
    /// Fully-qualified test identifier -> declaration line range.
    Methods(BTreeMap<String, LineRange>),
    Skipped(SkipReason),
}

/// Why a file was skipped during discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Unparseable,
}

/// Discover `test*` methods in a PHP source, keyed by
/// `Namespace\Class::method`, with 1-based inclusive declaration line ranges.
pub fn discover_test_methods(source: &str) -> Discovery {
    let mut parser = Parser::new();
    let language: Language = tree_sitter_php::LANGUAGE_PHP.into();
    if parser.set_language(&language).is_err() {
        return Discovery::Skipped(SkipReason::Unparseable);
    }

    let Some(tree) = parser.parse(source, None) else {
        return Discovery::Skipped(SkipReason::Unparseable);
    };
    if tree.root_node().has_error() {
        return Discovery::Skipped(SkipReason::Unparseable);
    }

    let mut walker = MethodWalker {
        source: source.as_bytes(),
        namespace: String::new(),
        class: String::new(),
        methods: BTreeMap::new(),
    };
    walker.visit(tree.root_node());

    Discovery::Methods(walker.methods)
}

/// Preorder tree walk tracking the namespace and class-like declaration the
/// cursor is currently inside.
struct MethodWalker<'s> {
    source: &'s [u8],
    namespace: String,
    class: String,
    methods: BTreeMap<String, LineRange>,
}

impl MethodWalker<'_> {
    fn visit(&mut self, node: Node<'_>) {
        match node.kind() {
            "namespace_definition" => {
                if let Some(name) = self.name_of(node) {
                    self.namespace = name;
                }
            }
            "class_declaration" | "trait_declaration" => {
                if let Some(name) = self.name_of(node) {
                    self.class = name;
                }
            }
            "method_declaration" => {
                if let Some(name) = self.name_of(node) {
                    if name.starts_with("test") {
                        self.record(&name, node);
                    }
                }
            }
            _ => {}
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.visit(child);
        }
    }

    fn name_of(&self, node: Node<'_>) -> Option<String> {
        let name = node.child_by_field_name("name")?;
        name.utf8_text(self.source).ok().map(str::to_string)
    }

    fn record(&mut self, method: &str, node: Node<'_>) {
        let identifier = format!("{}\\{}::{}", self.namespace, self.class, method);
        let range = LineRange::new(
            node.start_position().row as u32 + 1,
            node.end_position().row as u32 + 1,
        );
        self.methods.insert(identifier, range);
    }
}

#[cfg(test)]
#[path = "php_tests.rs"]
mod tests;
