//! File-level control-flow nesting depth.
//!
//! A single depth counter increments on entering any decision construct
//! and decrements on exit. Function, method, and class bodies save the
//! counter on an explicit stack, start again from zero, and restore on
//! exit, so depth is local to each definition. Lambdas are the exception:
//! they add one level but keep counting in the surrounding scope.

use super::{LanguageFrontend, NestingProfile, NestingViolation, NodeCategory, ParsedFile};
use crate::policy::MAX_NESTING_DEPTH;

/// Traversal state threaded through the walk.
///
/// Scope save/restore goes through an owned stack so that unwinding can
/// never leave a stale depth behind.
struct DepthWalk {
    current: u32,
    saved: Vec<u32>,
    profile: NestingProfile,
}

impl DepthWalk {
    fn new() -> Self {
        Self {
            current: 0,
            saved: Vec::new(),
            profile: NestingProfile::default(),
        }
    }

    fn enter(&mut self, construct: &'static str, line: usize) {
        self.current += 1;
        if self.current > self.profile.max_depth {
            self.profile.max_depth = self.current;
        }
        if self.current > MAX_NESTING_DEPTH {
            self.profile.violations.push(NestingViolation {
                line,
                depth: self.current,
                construct,
            });
        }
    }

    fn leave(&mut self) {
        self.current -= 1;
    }

    fn push_scope(&mut self) {
        self.saved.push(self.current);
        self.current = 0;
    }

    fn pop_scope(&mut self) {
        self.current = self.saved.pop().unwrap_or(0);
    }
}

/// Walk a whole file and report its maximum depth and every point where
/// depth exceeded the ceiling. Recording never stops the traversal.
pub fn nesting_profile(frontend: &dyn LanguageFrontend, parsed: &ParsedFile) -> NestingProfile {
    let mut walk = DepthWalk::new();
    descend(frontend, parsed.tree.root_node(), &mut walk);
    walk.profile
}

fn descend(frontend: &dyn LanguageFrontend, node: tree_sitter::Node, walk: &mut DepthWalk) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match frontend.classify(&child) {
            NodeCategory::Decision(kind) => {
                walk.enter(kind.label(), child.start_position().row + 1);
                descend(frontend, child, walk);
                walk.leave();
            }
            NodeCategory::LambdaDef => {
                // one level, cumulative with the surrounding scope
                walk.enter("lambda", child.start_position().row + 1);
                descend(frontend, child, walk);
                walk.leave();
            }
            NodeCategory::FunctionDef | NodeCategory::ClassDef => {
                walk.push_scope();
                descend(frontend, child, walk);
                walk.pop_scope();
            }
            NodeCategory::BoolOp
            | NodeCategory::Handler
            | NodeCategory::MatchArm
            | NodeCategory::Other => {
                descend(frontend, child, walk);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::PythonFrontend;
    use std::path::Path;

    fn profile_for(source: &str) -> NestingProfile {
        let frontend = PythonFrontend::new();
        let parsed = frontend
            .parse(Path::new("test.py"), source.as_bytes())
            .unwrap();
        nesting_profile(&frontend, &parsed)
    }

    #[test]
    fn test_flat_file_has_zero_depth() {
        let profile = profile_for("x = 1\ny = 2\n");
        assert_eq!(profile.max_depth, 0);
        assert!(profile.violations.is_empty());
    }

    #[test]
    fn test_depth_four_is_never_a_violation() {
        let profile = profile_for(
            r#"
def f(a, b, c, d):
    if a:
        if b:
            if c:
                if d:
                    pass
"#,
        );
        assert_eq!(profile.max_depth, 4);
        assert!(profile.violations.is_empty());
    }

    #[test]
    fn test_depth_five_is_a_violation() {
        let profile = profile_for(
            r#"
def f(a, b, c, d, e):
    if a:
        if b:
            if c:
                if d:
                    if e:
                        pass
"#,
        );
        assert_eq!(profile.max_depth, 5);
        assert_eq!(profile.violations.len(), 1);
        let v = &profile.violations[0];
        assert_eq!(v.depth, 5);
        assert_eq!(v.construct, "if");
        assert_eq!(v.line, 7);
    }

    #[test]
    fn test_recording_does_not_stop_traversal() {
        let profile = profile_for(
            r#"
def f(a, b, c, d, e, g):
    if a:
        if b:
            if c:
                if d:
                    if e:
                        if g:
                            pass
"#,
        );
        assert_eq!(profile.max_depth, 6);
        assert_eq!(profile.violations.len(), 2);
        assert_eq!(profile.violations[0].depth, 5);
        assert_eq!(profile.violations[1].depth, 6);
    }

    #[test]
    fn test_mixed_constructs_all_add_depth() {
        let profile = profile_for(
            r#"
def f(items):
    for item in items:
        while item:
            with open(item) as fh:
                try:
                    if fh.read():
                        pass
                except OSError:
                    pass
"#,
        );
        // for -> while -> with -> try -> if
        assert_eq!(profile.max_depth, 5);
        assert_eq!(profile.violations.len(), 1);
        assert_eq!(profile.violations[0].construct, "if");
    }

    #[test]
    fn test_function_boundary_resets_depth() {
        let profile = profile_for(
            r#"
def outer(a, b, c):
    if a:
        if b:
            if c:
                def inner(d):
                    if d:
                        pass
"#,
        );
        // inner's if sits at depth 1, not 4
        assert_eq!(profile.max_depth, 3);
        assert!(profile.violations.is_empty());
    }

    #[test]
    fn test_class_boundary_resets_depth() {
        let profile = profile_for(
            r#"
if True:
    if True:
        class Deep:
            def method(self):
                if True:
                    pass
"#,
        );
        assert_eq!(profile.max_depth, 2);
        assert!(profile.violations.is_empty());
    }

    #[test]
    fn test_else_shares_the_conditional_depth() {
        let profile = profile_for(
            r#"
def f(a, b):
    if a:
        pass
    else:
        if b:
            pass
"#,
        );
        // the inner if sits at depth 2; else adds nothing of its own
        assert_eq!(profile.max_depth, 2);
    }

    #[test]
    fn test_handler_shares_the_try_depth() {
        let profile = profile_for(
            r#"
def f():
    try:
        pass
    except OSError:
        if True:
            pass
"#,
        );
        assert_eq!(profile.max_depth, 2);
    }

    #[test]
    fn test_lambda_is_cumulative_not_a_reset() {
        let profile = profile_for(
            r#"
def f(a, b, c, d):
    if a:
        if b:
            if c:
                if d:
                    g = lambda: 1
"#,
        );
        // the lambda itself is the fifth level
        assert_eq!(profile.max_depth, 5);
        assert_eq!(profile.violations.len(), 1);
        assert_eq!(profile.violations[0].construct, "lambda");
    }

    #[test]
    fn test_elif_adds_a_level() {
        let profile = profile_for(
            r#"
def f(a, b, c, d, e):
    if a:
        pass
    elif b:
        if c:
            if d:
                if e:
                    pass
"#,
        );
        // if -> elif -> if -> if -> if
        assert_eq!(profile.max_depth, 5);
        assert_eq!(profile.violations.len(), 1);
    }
}
