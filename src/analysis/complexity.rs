//! Per-function cyclomatic complexity.
//!
//! Recursive descent over the classified tree with a running decision-point
//! counter. Each function, method, lambda, or nested definition gets its own
//! score: traversal never counts across a definition boundary, and each
//! definition found is walked as its own independent root.
//!
//! Counting rules (score = 1 + decision points):
//! - conditional +1, each elif a further +1, else free
//! - loop +1, resource-scope block +1
//! - try block +1, plus +1 per attached handler clause
//! - pattern match with N arms: +(N - 1)
//! - boolean chain with K operands: +(K - 1), one per operator node

use super::{DecisionKind, FunctionRecord, LanguageFrontend, NodeCategory, ParsedFile, Span};

/// Compute one record per function defined anywhere in the file.
///
/// Records appear in source order. Qualified names join the enclosing
/// class path with dots; enclosing functions contribute nothing to the
/// name of a definition nested inside them.
pub fn function_records(
    frontend: &dyn LanguageFrontend,
    parsed: &ParsedFile,
) -> Vec<FunctionRecord> {
    let mut records = Vec::new();
    let mut class_path = Vec::new();
    collect_definitions(
        frontend,
        parsed,
        parsed.tree.root_node(),
        &mut class_path,
        &mut records,
    );
    records
}

/// Walk the tree looking for definitions, threading the class path.
fn collect_definitions(
    frontend: &dyn LanguageFrontend,
    parsed: &ParsedFile,
    node: tree_sitter::Node,
    class_path: &mut Vec<String>,
    records: &mut Vec<FunctionRecord>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match frontend.classify(&child) {
            NodeCategory::FunctionDef => {
                let name = frontend
                    .definition_name(parsed, &child)
                    .unwrap_or_else(|| "<anonymous>".to_string());
                records.push(FunctionRecord {
                    qualified_name: qualify(class_path, &name),
                    complexity: 1 + decision_points(frontend, child),
                    span: Span::from_node(child),
                });
                collect_definitions(frontend, parsed, child, class_path, records);
            }
            NodeCategory::LambdaDef => {
                records.push(FunctionRecord {
                    qualified_name: qualify(class_path, "<lambda>"),
                    complexity: 1 + decision_points(frontend, child),
                    span: Span::from_node(child),
                });
                collect_definitions(frontend, parsed, child, class_path, records);
            }
            NodeCategory::ClassDef => {
                let name = frontend
                    .definition_name(parsed, &child)
                    .unwrap_or_else(|| "<anonymous>".to_string());
                class_path.push(name);
                collect_definitions(frontend, parsed, child, class_path, records);
                class_path.pop();
            }
            _ => collect_definitions(frontend, parsed, child, class_path, records),
        }
    }
}

fn qualify(class_path: &[String], name: &str) -> String {
    if class_path.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", class_path.join("."), name)
    }
}

/// Count decision points below `node`, stopping at definition boundaries.
fn decision_points(frontend: &dyn LanguageFrontend, node: tree_sitter::Node) -> u32 {
    let mut count = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        count += match frontend.classify(&child) {
            NodeCategory::Decision(DecisionKind::Match) => {
                // N arms contribute N - 1; the arm bodies are still scanned.
                match_arm_count(frontend, child).saturating_sub(1)
                    + decision_points(frontend, child)
            }
            NodeCategory::Decision(_) | NodeCategory::BoolOp | NodeCategory::Handler => {
                1 + decision_points(frontend, child)
            }
            // Nested definitions score independently.
            NodeCategory::FunctionDef | NodeCategory::LambdaDef | NodeCategory::ClassDef => 0,
            NodeCategory::MatchArm | NodeCategory::Other => decision_points(frontend, child),
        };
    }
    count
}

/// Count the arms of a pattern match.
///
/// Arms sit below the match's body block, so recurse through opaque
/// nodes but stop at arms themselves and at anything that opens a new
/// construct or scope.
fn match_arm_count(frontend: &dyn LanguageFrontend, node: tree_sitter::Node) -> u32 {
    let mut count = 0;
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match frontend.classify(&child) {
            NodeCategory::MatchArm => count += 1,
            NodeCategory::Other => count += match_arm_count(frontend, child),
            _ => {}
        }
    }
    count
}
