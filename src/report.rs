//! Output formatting for depthcheck results.
//!
//! Supports two output formats:
//! - Text: per-file pass/fail lines for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::{Deserialize, Serialize};

use crate::policy::MAX_NESTING_DEPTH;
use crate::runner::{FileReport, RunSummary};

// =============================================================================
// JSON Format
// =============================================================================

/// Top-level JSON report structure.
#[derive(Serialize, Deserialize)]
pub struct JsonReport {
    pub version: String,
    pub files: Vec<JsonFileReport>,
    pub summary: JsonSummary,
}

/// Per-file metrics in the JSON report.
#[derive(Serialize, Deserialize)]
pub struct JsonFileReport {
    pub path: String,
    pub max_complexity: u32,
    pub max_nesting: u32,
    pub functions: Vec<JsonFunction>,
    pub violations: Vec<JsonViolation>,
}

/// One function's complexity score.
#[derive(Serialize, Deserialize)]
pub struct JsonFunction {
    pub name: String,
    pub complexity: u32,
    pub line: usize,
}

/// One threshold violation of either metric.
#[derive(Serialize, Deserialize)]
pub struct JsonViolation {
    /// "complexity" or "nesting".
    pub metric: String,
    /// Qualified function name (complexity violations only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub line: usize,
    pub value: u32,
    pub threshold: u32,
}

/// Run-level totals.
#[derive(Serialize, Deserialize)]
pub struct JsonSummary {
    pub files_checked: usize,
    pub files_skipped: usize,
    pub max_complexity: u32,
    pub max_nesting: u32,
    pub violations: usize,
    pub passed: bool,
}

/// Build the JSON report structure from a run summary.
pub fn build_json_report(summary: &RunSummary) -> JsonReport {
    let files = summary
        .reports
        .iter()
        .map(|report| {
            let functions = report
                .functions
                .iter()
                .map(|f| JsonFunction {
                    name: f.qualified_name.clone(),
                    complexity: f.complexity,
                    line: f.span.start_line,
                })
                .collect();

            let mut violations: Vec<JsonViolation> = report
                .complexity_violations
                .iter()
                .map(|v| JsonViolation {
                    metric: "complexity".to_string(),
                    name: Some(v.qualified_name.clone()),
                    line: v.line,
                    value: v.complexity,
                    threshold: v.ceiling,
                })
                .collect();

            violations.extend(report.nesting.violations.iter().map(|v| JsonViolation {
                metric: "nesting".to_string(),
                name: None,
                line: v.line,
                value: v.depth,
                threshold: MAX_NESTING_DEPTH,
            }));

            JsonFileReport {
                path: report.path.clone(),
                max_complexity: report.max_complexity,
                max_nesting: report.nesting.max_depth,
                functions,
                violations,
            }
        })
        .collect();

    JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files,
        summary: JsonSummary {
            files_checked: summary.reports.len(),
            files_skipped: summary.skipped,
            max_complexity: summary.overall_max_complexity(),
            max_nesting: summary.overall_max_nesting(),
            violations: summary.violation_count(),
            passed: summary.passed(),
        },
    }
}

/// Write results in JSON format.
pub fn write_json(summary: &RunSummary) -> anyhow::Result<()> {
    let report = build_json_report(summary);
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Text Format
// =============================================================================

/// Write results as human-readable text.
pub fn write_text(summary: &RunSummary) {
    for report in &summary.reports {
        write_file_report(report);
    }

    println!();
    println!("Overall max complexity: {}", summary.overall_max_complexity());
    println!("Overall max nesting: {}", summary.overall_max_nesting());

    let checked = format!("{} files checked", summary.reports.len());
    let skipped = if summary.skipped > 0 {
        format!(" ({} skipped)", summary.skipped)
    } else {
        String::new()
    };
    println!(
        "{}{}, {} violations",
        checked,
        skipped,
        summary.violation_count()
    );

    if summary.passed() {
        println!("{}", "✓ PASS".green());
    } else {
        println!("{}", "✗ FAIL".red());
    }
}

fn write_file_report(report: &FileReport) {
    println!(
        "{}: max complexity {} {}",
        report.path,
        report.max_complexity,
        mark(report.complexity_violations.is_empty())
    );
    for v in &report.complexity_violations {
        println!(
            "    {}: {} (threshold: {})",
            v.qualified_name, v.complexity, v.ceiling
        );
    }

    println!(
        "{}: max nesting {} {}",
        report.path,
        report.nesting.max_depth,
        mark(report.nesting.violations.is_empty())
    );
    for v in &report.nesting.violations {
        println!(
            "    line {}: {} (threshold: {})",
            v.line, v.depth, MAX_NESTING_DEPTH
        );
    }
}

fn mark(ok: bool) -> ColoredString {
    if ok {
        "✓".green()
    } else {
        "✗".red()
    }
}
