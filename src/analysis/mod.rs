//! AST-backed metric analysis.
//!
//! Front-ends parse source into tree-sitter trees and classify nodes into
//! the closed `NodeCategory` union; the two metric walkers (`complexity`,
//! `nesting`) dispatch on that classification only.

mod complexity;
mod facts;
mod nesting;
mod traits;

pub mod languages;

pub use complexity::function_records;
pub use facts::{
    DecisionKind, FunctionRecord, NestingProfile, NestingViolation, NodeCategory, Span,
};
pub use languages::{
    frontend_for_extension, register_frontends, supported_extensions, PythonFrontend,
};
pub use nesting::nesting_profile;
pub use traits::{LanguageFrontend, ParsedFile};
