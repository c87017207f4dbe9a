//! Depthcheck - static code metrics gate.
//!
//! Depthcheck walks the syntax tree of each source file and computes two
//! structural metrics: per-function cyclomatic complexity and per-file
//! maximum control-flow nesting depth. Functions over their complexity
//! ceiling and code nested deeper than the fixed nesting ceiling are
//! reported as violations and drive the process exit code.
//!
//! # Architecture
//!
//! The codebase uses tree-sitter for AST-based analysis:
//!
//! - `analysis`: node classification plus the two metric walkers
//! - `policy`: threshold table (default ceiling + per-function overrides)
//! - `config`: optional YAML policy file
//! - `runner`: per-file orchestration and run aggregation
//! - `report`: output formatting (text, JSON)
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/` for the Python front-end. Implement the
//! `LanguageFrontend` trait and register it in `languages/mod.rs`; the
//! metric walkers only ever see the `NodeCategory` classification.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod policy;
pub mod report;
pub mod runner;

pub use analysis::{
    frontend_for_extension, register_frontends, DecisionKind, FunctionRecord, LanguageFrontend,
    NestingProfile, NestingViolation, NodeCategory, ParsedFile, PythonFrontend,
};
pub use config::Config;
pub use policy::ThresholdPolicy;
pub use report::JsonReport;
pub use runner::{ComplexityViolation, FileReport, RunSummary, Runner};

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    register_frontends();
}
