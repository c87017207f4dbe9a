//! Command-line interface for depthcheck.

use clap::Parser;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::analysis;
use crate::config::Config;
use crate::report;
use crate::runner::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Static code metrics gate.
///
/// Depthcheck computes per-function cyclomatic complexity and per-file
/// control-flow nesting depth, then fails the run when either metric
/// exceeds its ceiling. Complexity ceilings come from the threshold
/// policy; the nesting ceiling is fixed.
#[derive(Parser)]
#[command(name = "depthcheck")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Path to policy YAML file (default: auto-discover)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Default complexity ceiling (overrides the policy file value)
    #[arg(long)]
    pub max_complexity: Option<u32>,
}

/// Run the check.
pub fn run_check(cli: &Cli) -> anyhow::Result<i32> {
    crate::init();

    // Validate format
    if cli.format != "text" && cli.format != "json" {
        eprintln!(
            "Error: invalid format {:?}, must be 'text' or 'json'",
            cli.format
        );
        return Ok(EXIT_ERROR);
    }

    // Front-loaded target validation, before any file is opened
    for path in &cli.paths {
        if !path.is_file() && !path.is_dir() {
            eprintln!("Error: no such file or directory: {}", path.display());
            return Ok(EXIT_ERROR);
        }
    }

    // Load the policy file if present
    let config = match &cli.config {
        Some(path) => match Config::parse_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(EXIT_ERROR);
            }
        },
        None => match Config::discover() {
            Some(path) => match Config::parse_file(&path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return Ok(EXIT_ERROR);
                }
            },
            None => Config::default(),
        },
    };

    let policy = config.into_policy(cli.max_complexity);

    let files = resolve_targets(&cli.paths);
    if files.is_empty() {
        eprintln!("Warning: no source files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let runner = Runner::new(&policy);
    let summary = runner.run(&files);

    match cli.format.as_str() {
        "json" => report::write_json(&summary)?,
        _ => report::write_text(&summary),
    }

    if summary.passed() {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}

/// Resolve CLI targets to an ordered file list.
///
/// Files are kept in argument order; each directory expands to its
/// source files sorted lexicographically by path.
pub fn resolve_targets(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            collect_source_files(path, &mut files);
        } else {
            files.push(path.clone());
        }
    }

    files
}

/// Collect source files under a directory, sorted for determinism.
fn collect_source_files(root: &Path, out: &mut Vec<PathBuf>) {
    let mut found = Vec::new();

    let walker = WalkDir::new(root).follow_links(true).into_iter();
    for entry in walker.filter_entry(|e| {
        // Skip hidden directories, but never the walk root itself
        let name = e.file_name().to_string_lossy();
        e.depth() == 0 || !(e.file_type().is_dir() && name.starts_with('.'))
    }) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("Warning: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() {
            let ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("");
            if analysis::supported_extensions().contains(&ext) {
                found.push(entry.path().to_path_buf());
            }
        }
    }

    found.sort();
    out.extend(found);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_directory_expansion_is_sorted() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.py"), "x = 1\n").unwrap();
        fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/c.py"), "x = 1\n").unwrap();

        let files = resolve_targets(&[temp.path().to_path_buf()]);
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(temp.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.py", "b.py", "sub/c.py"]);
    }

    #[test]
    fn test_files_keep_argument_order() {
        let temp = TempDir::new().unwrap();
        let b = temp.path().join("b.py");
        let a = temp.path().join("a.py");
        fs::write(&b, "x = 1\n").unwrap();
        fs::write(&a, "x = 1\n").unwrap();

        let files = resolve_targets(&[b.clone(), a.clone()]);
        assert_eq!(files, vec![b, a]);
    }

    #[test]
    fn test_unsupported_extensions_are_excluded() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        fs::write(temp.path().join("notes.txt"), "hello\n").unwrap();

        let files = resolve_targets(&[temp.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.py"));
    }

    #[test]
    fn test_hidden_directories_are_skipped() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        fs::create_dir(temp.path().join(".venv")).unwrap();
        fs::write(temp.path().join(".venv/lib.py"), "x = 1\n").unwrap();

        let files = resolve_targets(&[temp.path().to_path_buf()]);
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("a.py"));
    }
}
