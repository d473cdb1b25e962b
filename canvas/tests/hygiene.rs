//! Hygiene: enforces coding standards at test time
//!
//! These tests scan the library source tree for antipatterns. Each pattern
//! has a budget (ideally zero). If you must add one, you have to fix an
//! existing one first. The budget never grows.

use std::fs;
use std::path::Path;

struct SourceFile {
    path: String,
    content: String,
}

/// A forbidden substring and how many occurrences are tolerated.
struct Budget {
    pattern: &'static str,
    max: usize,
    why: &'static str,
}

const BUDGETS: &[Budget] = &[
    // Panics: these abort the wasm instance.
    Budget { pattern: ".unwrap()", max: 0, why: "propagate with ?" },
    Budget { pattern: ".expect(", max: 0, why: "propagate with ?" },
    Budget { pattern: "panic!(", max: 0, why: "return CanvasError" },
    Budget { pattern: "unreachable!(", max: 0, why: "return CanvasError" },
    Budget { pattern: "todo!(", max: 0, why: "finish the stub" },
    Budget { pattern: "unimplemented!(", max: 0, why: "finish the stub" },
    // Silent loss: discards errors without inspecting.
    Budget { pattern: "let _ =", max: 0, why: "handle or log the error" },
    Budget { pattern: ".ok()", max: 0, why: "handle or log the error" },
    // Output goes through `log`, which reaches the browser console.
    Budget { pattern: "println!(", max: 0, why: "use log::info!" },
    Budget { pattern: "eprintln!(", max: 0, why: "use log::warn!" },
    Budget { pattern: "dbg!(", max: 0, why: "use log::debug!" },
    // Style / structure.
    Budget { pattern: "#[allow(dead_code)]", max: 0, why: "delete unused code" },
];

/// Modules allowed to name WebGL types directly.
const GL_MODULES: &[&str] = &["render.rs", "engine.rs"];

/// Collect production `.rs` files from `src/`, excluding test files.
fn source_files() -> Vec<SourceFile> {
    let mut files = Vec::new();
    collect_rs_files(Path::new("src"), &mut files);
    files
}

fn collect_rs_files(dir: &Path, out: &mut Vec<SourceFile>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_rs_files(&path, out);
        } else if path.extension().is_some_and(|e| e == "rs") {
            let path_str = path.to_string_lossy().to_string();
            if path_str.ends_with("_test.rs") {
                continue;
            }
            if let Ok(content) = fs::read_to_string(&path) {
                out.push(SourceFile { path: path_str, content });
            }
        }
    }
}

fn hits(files: &[SourceFile], pattern: &str) -> Vec<(String, usize)> {
    files
        .iter()
        .filter_map(|file| {
            let count = file.content.lines().filter(|line| line.contains(pattern)).count();
            (count > 0).then(|| (file.path.clone(), count))
        })
        .collect()
}

fn format_hits(hits: &[(String, usize)]) -> String {
    hits.iter()
        .map(|(path, count)| format!("  {path}: {count}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn sources_are_found() {
    let files = source_files();
    assert!(files.iter().any(|f| f.path.ends_with("lib.rs")), "run from the crate root");
}

#[test]
fn pattern_budgets() {
    let files = source_files();
    let mut failures = Vec::new();
    for budget in BUDGETS {
        let found = hits(&files, budget.pattern);
        let count: usize = found.iter().map(|(_, c)| c).sum();
        if count > budget.max {
            failures.push(format!(
                "`{}` budget exceeded: found {count}, max {} ({}).\n{}",
                budget.pattern,
                budget.max,
                budget.why,
                format_hits(&found)
            ));
        }
    }
    assert!(failures.is_empty(), "{}", failures.join("\n"));
}

#[test]
fn unsafe_blocks_are_justified() {
    for file in source_files() {
        let lines: Vec<&str> = file.content.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            if !line.contains("unsafe {") {
                continue;
            }
            let justified = lines[..i]
                .iter()
                .rev()
                .take_while(|l| l.trim_start().starts_with("//"))
                .any(|l| l.contains("SAFETY"));
            assert!(justified, "{}:{} unsafe block without a SAFETY comment", file.path, i + 1);
        }
    }
}

#[test]
fn webgl_stays_in_renderer_and_facade() {
    for file in source_files() {
        let allowed = GL_MODULES.iter().any(|name| file.path.ends_with(name));
        if !allowed {
            assert!(
                !file.content.contains("WebGl2RenderingContext"),
                "{} names WebGL directly; go through render::Renderer",
                file.path
            );
        }
    }
}
