//! Workspace-wide quality checks.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use xshell::{Shell, cmd};

/// Library source directories scanned for unwrap/expect.
const LIBRARY_SOURCES: &[&str] = &[
    "crates/cf-planar/src",
    "routing/route-types/src",
    "routing/route-pathfind/src",
    "routing/route-optimize/src",
];

type Check = fn(&Shell) -> Result<()>;

const CHECKS: &[(&str, Check)] = &[
    ("Formatting", run_fmt_check),
    ("Clippy", run_clippy),
    ("Tests", run_tests),
    ("Documentation", run_doc_check),
    ("Safety", run_safety_scan),
];

/// Run all checks. Outside CI mode failures are reported but don't fail.
pub fn run(ci_mode: bool) -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Routing Quality Check".bold());
    println!("{}", "=====================".bold());
    println!();

    let mut all_passed = true;
    for (name, check) in CHECKS {
        println!("{}", format!("Running {}...", name.to_lowercase()).dimmed());
        let result = check(&sh);
        report_result(name, &result);
        all_passed &= result.is_ok();
    }

    println!();

    if all_passed {
        println!("{}", "✓ All checks passed!".green().bold());
        Ok(())
    } else if ci_mode {
        println!("{}", "✗ Some checks failed.".red().bold());
        std::process::exit(1);
    } else {
        println!("{}", "⚠ Some checks failed. Fix before committing.".yellow());
        Ok(())
    }
}

/// Run the full CI suite: every check, then benches and the demo.
pub fn run_ci() -> Result<()> {
    let sh = Shell::new()?;

    println!();
    println!("{}", "Routing CI Suite".bold());
    println!("{}", "================".bold());
    println!();

    let extra: &[(&str, Check)] = &[("Benches", run_bench_build), ("Demo", run_demo)];
    let steps: Vec<_> = CHECKS.iter().chain(extra).collect();
    let total = steps.len();

    let mut failures = Vec::new();
    for (i, (name, check)) in steps.into_iter().enumerate() {
        println!("{}", format!("Step {}/{total}: {name}...", i + 1).cyan());
        match check(&sh) {
            Ok(()) => println!("  {} {name} OK", "✓".green()),
            Err(e) => {
                println!("  {} {name} failed", "✗".red());
                failures.push(format!("{name}: {e}"));
            }
        }
    }

    println!();

    if failures.is_empty() {
        println!("{}", "═══════════════════════════════════════".green());
        println!("{}", "  ✓ CI PASSED".green().bold());
        println!("{}", "═══════════════════════════════════════".green());
        Ok(())
    } else {
        println!("{}", "═══════════════════════════════════════".red());
        println!("{}", "  ✗ CI FAILED".red().bold());
        println!("{}", "═══════════════════════════════════════".red());
        println!();
        println!("Failures:");
        for f in &failures {
            println!("  - {}", f.red());
        }
        std::process::exit(1);
    }
}

fn report_result(name: &str, result: &Result<()>) {
    match result {
        Ok(()) => println!("  {} {}", "✓".green(), name),
        Err(e) => println!("  {} {} - {}", "✗".red(), name, e),
    }
}

fn run_fmt_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check")
        .run()
        .context("Formatting check failed")?;
    Ok(())
}

fn run_clippy(sh: &Shell) -> Result<()> {
    cmd!(
        sh,
        "cargo clippy --workspace --all-targets --all-features -- -D warnings"
    )
    .run()
    .context("Clippy check failed")?;
    Ok(())
}

fn run_tests(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace")
        .run()
        .context("Tests failed")?;
    cmd!(sh, "cargo test --workspace --all-features")
        .run()
        .context("Tests with all features failed")?;
    Ok(())
}

fn run_doc_check(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo doc --workspace --no-deps --all-features")
        .env("RUSTDOCFLAGS", "-D warnings")
        .run()
        .context("Documentation build failed")?;
    Ok(())
}

fn run_bench_build(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo bench --workspace --no-run")
        .run()
        .context("Benchmarks failed to build")?;
    Ok(())
}

fn run_demo(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo run -p strait-highways -- --iterations 5")
        .run()
        .context("Demo run failed")?;
    Ok(())
}

/// Counts `.unwrap(` and `.expect(` in library code, stopping at each
/// file's `#[cfg(test)]` module.
fn run_safety_scan(sh: &Shell) -> Result<()> {
    let root = sh.current_dir();
    let mut violations = Vec::new();

    for dir in LIBRARY_SOURCES {
        for file in rust_files(&root.join(dir))? {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            for (line_no, line) in text.lines().enumerate() {
                let trimmed = line.trim_start();
                if trimmed.starts_with("#[cfg(test)]") {
                    break;
                }
                if trimmed.starts_with("//") {
                    continue;
                }
                if line.contains(".unwrap(") || line.contains(".expect(") {
                    violations.push(format!("{}:{}", file.display(), line_no + 1));
                }
            }
        }
    }

    if !violations.is_empty() {
        for v in &violations {
            println!("    {}", v.dimmed());
        }
        anyhow::bail!(
            "Found {} unwrap/expect calls in library code",
            violations.len()
        );
    }

    Ok(())
}

fn rust_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(rust_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
