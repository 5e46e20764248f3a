//! Hygiene: coding standards for the gallery crate, checked at test time.
//!
//! Scans the production sources under `src/` for patterns the crate does not
//! allow. A panic in wasm takes the whole canvas down, a dropped `Result`
//! loses a failed save silently, and output belongs to `tracing`. Budgets are
//! zero and only go down.

use std::fs;
use std::path::{Path, PathBuf};

/// `(label, patterns, budget)`. A line counts once per pattern it contains.
const BUDGETS: &[(&str, &[&str], usize)] = &[
    ("panic", &[".unwrap()", ".expect(", "panic!(", "unreachable!(", "todo!(", "unimplemented!("], 0),
    ("silent discard", &["let _ =", ".ok()"], 0),
    ("dead code allowance", &["#[allow(dead_code)]"], 0),
    ("print", &["println!(", "dbg!("], 0),
];

/// Modules with no behavior of their own, exempt from the sibling-test rule.
const UNTESTED_MODULES: &[&str] = &["lib.rs", "consts.rs", "host.rs"];

fn production_sources(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|e| e.path()) {
        if path.is_dir() {
            production_sources(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") && !path.to_string_lossy().ends_with("_test.rs") {
            out.push(path);
        }
    }
}

fn sources() -> Vec<PathBuf> {
    let mut files = Vec::new();
    production_sources(Path::new("src"), &mut files);
    files.sort();
    files
}

#[test]
fn pattern_budgets() {
    let files: Vec<(PathBuf, String)> = sources()
        .into_iter()
        .filter_map(|p| fs::read_to_string(&p).ok().map(|c| (p, c)))
        .collect();
    assert!(!files.is_empty(), "no sources found under src/");

    let mut report = Vec::new();
    for (label, patterns, budget) in BUDGETS {
        let mut hits = Vec::new();
        for (path, content) in &files {
            for (n, line) in content.lines().enumerate() {
                if patterns.iter().any(|p| line.contains(p)) {
                    hits.push(format!("  {}:{}: {}", path.display(), n + 1, line.trim()));
                }
            }
        }
        if hits.len() > *budget {
            report.push(format!("{label}: found {}, max {budget}\n{}", hits.len(), hits.join("\n")));
        }
    }
    assert!(report.is_empty(), "hygiene budgets exceeded:\n{}", report.join("\n"));
}

#[test]
fn every_module_has_sibling_tests() {
    let missing: Vec<String> = sources()
        .into_iter()
        .filter(|p| {
            let name = p.file_name().unwrap_or_default().to_string_lossy();
            !UNTESTED_MODULES.contains(&name.as_ref())
        })
        .filter(|p| {
            let sibling = p.with_file_name(format!("{}_test.rs", p.file_stem().unwrap_or_default().to_string_lossy()));
            !sibling.exists()
        })
        .map(|p| p.display().to_string())
        .collect();
    assert!(missing.is_empty(), "modules without a sibling _test.rs:\n  {}", missing.join("\n  "));
}
