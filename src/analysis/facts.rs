//! Fact structures shared by the metric walkers.

use std::fmt;

/// Source location span with byte offsets and line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (0-indexed).
    pub start_byte: usize,
    /// End byte offset (0-indexed, exclusive).
    pub end_byte: usize,
    /// Start line (1-indexed).
    pub start_line: usize,
    /// Start column (1-indexed).
    pub start_col: usize,
    /// End line (1-indexed).
    pub end_line: usize,
    /// End column (1-indexed).
    pub end_col: usize,
}

impl Span {
    /// Create a span from a tree-sitter node.
    pub fn from_node(node: tree_sitter::Node) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
            start_line: start.row + 1, // tree-sitter is 0-indexed
            start_col: start.column + 1,
            end_line: end.row + 1,
            end_col: end.column + 1,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Decision constructs: syntax that opens a new independent execution path
/// and a new nesting level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecisionKind {
    If,
    Elif,
    For,
    While,
    With,
    Try,
    Match,
}

impl DecisionKind {
    /// Label used in nesting violation output.
    pub fn label(&self) -> &'static str {
        match self {
            DecisionKind::If => "if",
            DecisionKind::Elif => "elif",
            DecisionKind::For => "for",
            DecisionKind::While => "while",
            DecisionKind::With => "with",
            DecisionKind::Try => "try",
            DecisionKind::Match => "match",
        }
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Classification of a syntax-tree node.
///
/// Both metric walkers dispatch on this closed union rather than on
/// grammar node names, so a front-end fully determines metric behavior
/// through its classification alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    /// A decision construct; counts +1 complexity and one nesting level.
    Decision(DecisionKind),
    /// One short-circuit operator (`and`/`or`); +1 complexity per operator.
    BoolOp,
    /// An exception handler clause attached to a try; +1 complexity.
    Handler,
    /// One arm of a pattern match; arms are counted at the match itself.
    MatchArm,
    /// A named function or method definition. Scope boundary.
    FunctionDef,
    /// An anonymous function. Scope boundary for complexity; one
    /// cumulative nesting level, never a depth reset.
    LambdaDef,
    /// A class definition. Scope boundary; contributes to qualified names.
    ClassDef,
    /// Anything else: recursed through, never counted.
    Other,
}

/// Complexity score for one function, keyed by qualified name.
///
/// Nested functions get their own record; only class nesting contributes
/// to the qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRecord {
    /// Dot-joined class path plus function name.
    pub qualified_name: String,
    /// Cyclomatic complexity, always >= 1.
    pub complexity: u32,
    /// Span of the definition.
    pub span: Span,
}

/// One point where nesting depth exceeded the ceiling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestingViolation {
    /// Line of the construct that pushed depth over the ceiling.
    pub line: usize,
    /// Depth after the increment, always > the ceiling.
    pub depth: u32,
    /// Label of the triggering construct ("if", "for", "lambda", ...).
    pub construct: &'static str,
}

/// Result of the nesting walk over one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingProfile {
    /// High-water mark across every scope in the file.
    pub max_depth: u32,
    /// Every point where depth exceeded the ceiling, in source order.
    pub violations: Vec<NestingViolation>,
}
