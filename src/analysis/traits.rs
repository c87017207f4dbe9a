//! Core traits for language front-ends.

use std::path::Path;

use super::NodeCategory;

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// Kept separate from the metric results so both walkers can run over
/// the same tree without re-parsing.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The original source code (kept for node text extraction).
    pub source: Vec<u8>,
    /// The file path (for error reporting).
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the tree contains syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Language-specific front-end trait.
///
/// A front-end parses source into a tree and classifies each node into
/// the closed `NodeCategory` union. The metric walkers never inspect
/// grammar node names directly.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create parsers
/// per call rather than holding one.
pub trait LanguageFrontend: Send + Sync {
    /// Returns the language identifier (e.g., "python").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this front-end handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Returns an error if parsing fails completely. Partial parse
    /// errors are still returned as a valid tree with ERROR nodes.
    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile>;

    /// Classify a node for the metric walkers.
    fn classify(&self, node: &tree_sitter::Node) -> NodeCategory;

    /// Name of a function or class definition node.
    ///
    /// Returns None for definitions without a name node (lambdas).
    fn definition_name(&self, parsed: &ParsedFile, node: &tree_sitter::Node) -> Option<String>;

    /// Check if this front-end handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
