//! Hygiene: source-scan checks on the editor's production code.
//!
//! The editor runs inside interactive sessions, so a panic takes the whole
//! document with it. Each pattern below has a budget (zero for all of them);
//! the budget only ever shrinks.

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    pattern: &'static str,
    max: usize,
    hint: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, hint: "propagate or match instead" },
    Budget { pattern: ".expect(", max: 0, hint: "propagate or match instead" },
    Budget { pattern: "panic!(", max: 0, hint: "return an EditError or a Change" },
    Budget { pattern: "unreachable!(", max: 0, hint: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, hint: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, hint: "finish the stub" },
    Budget { pattern: "let _ =", max: 0, hint: "inspect the value" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, hint: "delete the code" },
    Budget { pattern: "println!(", max: 0, hint: "use tracing" },
    Budget { pattern: "eprintln!(", max: 0, hint: "use tracing" },
    Budget { pattern: "dbg!(", max: 0, hint: "remove the debug print" },
];

/// Production `.rs` files under `src/`; sibling `*_test.rs` modules are skipped.
fn production_sources() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    walk(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.file_name().is_some_and(|n| n.to_string_lossy().ends_with("_test.rs"));
        if is_rs && !is_test {
            if let Ok(content) = fs::read_to_string(&path) {
                out.push((path, content));
            }
        }
    }
}

/// Lines containing `pattern`, skipping comment lines.
fn offending_lines(sources: &[(PathBuf, String)], pattern: &str) -> Vec<String> {
    sources
        .iter()
        .flat_map(|(path, content)| {
            content.lines().enumerate().filter_map(move |(n, line)| {
                let code = line.trim_start();
                if code.starts_with("//") || !code.contains(pattern) {
                    return None;
                }
                Some(format!("  {}:{}: {}", path.display(), n + 1, code))
            })
        })
        .collect()
}

#[test]
fn sources_are_found() {
    let sources = production_sources();
    assert!(sources.iter().any(|(p, _)| p.ends_with("editor.rs")), "src/ scan found nothing");
}

#[test]
fn pattern_budgets() {
    let sources = production_sources();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let hits = offending_lines(&sources, budget.pattern);
        if hits.len() > budget.max {
            failures.push(format!(
                "`{}` budget exceeded: found {}, max {} ({}).\n{}",
                budget.pattern,
                hits.len(),
                budget.max,
                budget.hint,
                hits.join("\n")
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n\n"));
}
