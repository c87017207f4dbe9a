//! Per-file analysis orchestration.
//!
//! The runner parses each file, runs both metric walkers over the same
//! tree, and compares every function against the threshold policy. Files
//! that cannot be read or parsed are reported on stderr and contribute
//! nothing; no file may prevent analysis of the files after it.

use std::path::{Path, PathBuf};

use crate::analysis::{
    self, frontend_for_extension, FunctionRecord, NestingProfile,
};
use crate::policy::ThresholdPolicy;

/// A function over its complexity ceiling.
#[derive(Debug, Clone)]
pub struct ComplexityViolation {
    pub qualified_name: String,
    pub complexity: u32,
    pub ceiling: u32,
    pub line: usize,
}

/// Metrics for one analyzed file.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: String,
    /// One record per function, in source order.
    pub functions: Vec<FunctionRecord>,
    /// Highest function complexity in the file (0 with no functions).
    pub max_complexity: u32,
    pub nesting: NestingProfile,
    pub complexity_violations: Vec<ComplexityViolation>,
}

impl FileReport {
    /// Violations of either metric in this file.
    pub fn violation_count(&self) -> usize {
        self.complexity_violations.len() + self.nesting.violations.len()
    }
}

/// Aggregate over one run, in scanner order.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
    /// Files skipped on read or parse failure.
    pub skipped: usize,
}

impl RunSummary {
    pub fn overall_max_complexity(&self) -> u32 {
        self.reports
            .iter()
            .map(|r| r.max_complexity)
            .max()
            .unwrap_or(0)
    }

    pub fn overall_max_nesting(&self) -> u32 {
        self.reports
            .iter()
            .map(|r| r.nesting.max_depth)
            .max()
            .unwrap_or(0)
    }

    pub fn violation_count(&self) -> usize {
        self.reports.iter().map(|r| r.violation_count()).sum()
    }

    /// A run passes iff no file has a violation. Skipped files do not
    /// fail the run.
    pub fn passed(&self) -> bool {
        self.violation_count() == 0
    }
}

/// Runs both metric walkers over each file and applies the policy.
pub struct Runner<'a> {
    policy: &'a ThresholdPolicy,
}

impl<'a> Runner<'a> {
    pub fn new(policy: &'a ThresholdPolicy) -> Self {
        Self { policy }
    }

    /// Analyze files strictly in the given order.
    pub fn run(&self, files: &[PathBuf]) -> RunSummary {
        let mut summary = RunSummary::default();

        for file in files {
            match self.check_file(file) {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    eprintln!("Warning: skipping {}: {}", file.display(), e);
                    summary.skipped += 1;
                }
            }
        }

        summary
    }

    /// Analyze a single file.
    ///
    /// All traversal state lives in the walkers' own contexts, so every
    /// call starts fresh regardless of what ran before it.
    pub fn check_file(&self, file: &Path) -> anyhow::Result<FileReport> {
        let ext = file.extension().and_then(|e| e.to_str()).unwrap_or("");
        let frontend = frontend_for_extension(ext)
            .ok_or_else(|| anyhow::anyhow!("no front-end for extension {:?}", ext))?;

        let source = std::fs::read(file)?;
        let parsed = frontend.parse(file, &source)?;
        if parsed.has_errors() {
            anyhow::bail!("syntax errors in source");
        }

        let path = parsed.path.clone();
        let functions = analysis::function_records(frontend, &parsed);
        let nesting = analysis::nesting_profile(frontend, &parsed);

        let complexity_violations = functions
            .iter()
            .filter_map(|f| {
                let ceiling = self.policy.ceiling(&path, &f.qualified_name);
                (f.complexity > ceiling).then(|| ComplexityViolation {
                    qualified_name: f.qualified_name.clone(),
                    complexity: f.complexity,
                    ceiling,
                    line: f.span.start_line,
                })
            })
            .collect();

        let max_complexity = functions.iter().map(|f| f.complexity).max().unwrap_or(0);

        Ok(FileReport {
            path,
            functions,
            max_complexity,
            nesting,
            complexity_violations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() {
        crate::init();
    }

    fn write_file(temp: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = temp.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_check_file_reports_both_metrics() {
        setup();
        let temp = TempDir::new().unwrap();
        let file = write_file(
            &temp,
            "a.py",
            r#"
def f(a, b):
    if a:
        if b:
            pass
"#,
        );

        let policy = ThresholdPolicy::default();
        let report = Runner::new(&policy).check_file(&file).unwrap();

        assert_eq!(report.functions.len(), 1);
        assert_eq!(report.max_complexity, 3);
        assert_eq!(report.nesting.max_depth, 2);
        assert_eq!(report.violation_count(), 0);
    }

    #[test]
    fn test_complexity_violation_against_policy() {
        setup();
        let temp = TempDir::new().unwrap();
        let file = write_file(
            &temp,
            "a.py",
            r#"
def busy(a, b, c):
    if a:
        pass
    if b:
        pass
    if c:
        pass
"#,
        );

        let policy = ThresholdPolicy::new(3);
        let report = Runner::new(&policy).check_file(&file).unwrap();

        assert_eq!(report.max_complexity, 4);
        assert_eq!(report.complexity_violations.len(), 1);
        let v = &report.complexity_violations[0];
        assert_eq!(v.qualified_name, "busy");
        assert_eq!(v.complexity, 4);
        assert_eq!(v.ceiling, 3);
    }

    #[test]
    fn test_unparseable_file_is_skipped_not_fatal() {
        setup();
        let temp = TempDir::new().unwrap();
        let bad = write_file(&temp, "bad.py", "def broken(:\n");
        let good = write_file(&temp, "good.py", "def ok():\n    pass\n");

        let policy = ThresholdPolicy::default();
        let summary = Runner::new(&policy).run(&[bad, good]);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.reports.len(), 1);
        assert!(summary.reports[0].path.ends_with("good.py"));
        assert!(summary.passed());
    }

    #[test]
    fn test_missing_file_is_skipped_not_fatal() {
        setup();
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.py");
        let good = write_file(&temp, "good.py", "x = 1\n");

        let policy = ThresholdPolicy::default();
        let summary = Runner::new(&policy).run(&[missing, good]);

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.reports.len(), 1);
    }

    #[test]
    fn test_no_state_leaks_between_files() {
        setup();
        let temp = TempDir::new().unwrap();
        let deep = write_file(
            &temp,
            "deep.py",
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
        let shallow = write_file(&temp, "shallow.py", "def g(a):\n    if a:\n        pass\n");

        let policy = ThresholdPolicy::default();
        let runner = Runner::new(&policy);
        let summary = runner.run(&[deep, shallow]);

        assert_eq!(summary.reports.len(), 2);
        assert_eq!(summary.reports[0].nesting.max_depth, 5);
        // the second file starts from a fresh context
        assert_eq!(summary.reports[1].nesting.max_depth, 1);
        assert_eq!(summary.reports[1].violation_count(), 0);
        assert_eq!(summary.violation_count(), 1);
    }

    #[test]
    fn test_summary_overall_maxima() {
        setup();
        let temp = TempDir::new().unwrap();
        let a = write_file(
            &temp,
            "a.py",
            "def f(a, b):\n    if a and b:\n        pass\n",
        );
        let b = write_file(&temp, "b.py", "def g():\n    pass\n");

        let policy = ThresholdPolicy::default();
        let summary = Runner::new(&policy).run(&[a, b]);

        assert_eq!(summary.overall_max_complexity(), 3);
        assert_eq!(summary.overall_max_nesting(), 1);
        assert!(summary.passed());
    }
}
