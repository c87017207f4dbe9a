//! Python language front-end using tree-sitter.

use std::path::Path;

use tree_sitter::{Language, Parser};

use crate::analysis::{DecisionKind, LanguageFrontend, NodeCategory, ParsedFile};

pub struct PythonFrontend {
    language: Language,
}

impl PythonFrontend {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }
}

impl Default for PythonFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageFrontend for PythonFrontend {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn file_extensions(&self) -> &'static [&'static str] {
        &["py"]
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source: {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
            path: path.to_string_lossy().to_string(),
        })
    }

    fn classify(&self, node: &tree_sitter::Node) -> NodeCategory {
        match node.kind() {
            "if_statement" => NodeCategory::Decision(DecisionKind::If),
            // each elif is a distinct conditional; else clauses stay opaque
            "elif_clause" => NodeCategory::Decision(DecisionKind::Elif),
            "for_statement" => NodeCategory::Decision(DecisionKind::For),
            "while_statement" => NodeCategory::Decision(DecisionKind::While),
            "with_statement" => NodeCategory::Decision(DecisionKind::With),
            "try_statement" => NodeCategory::Decision(DecisionKind::Try),
            "match_statement" => NodeCategory::Decision(DecisionKind::Match),
            "case_clause" => NodeCategory::MatchArm,
            "except_clause" => NodeCategory::Handler,
            "boolean_operator" => NodeCategory::BoolOp,
            "function_definition" => NodeCategory::FunctionDef,
            "lambda" => NodeCategory::LambdaDef,
            "class_definition" => NodeCategory::ClassDef,
            _ => NodeCategory::Other,
        }
    }

    fn definition_name(&self, parsed: &ParsedFile, node: &tree_sitter::Node) -> Option<String> {
        node.child_by_field_name("name")
            .map(|n| parsed.node_text(n).to_string())
    }
}
