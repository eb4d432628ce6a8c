use super::{print_indented, HookContext};
use crate::console;
use crate::record::{CheckState, LogEntry, Status};
use anyhow::Result;

const PREVIEW_FILES: usize = 5;
const FAILURE_TAIL_LINES: usize = 10;

fn tail(text: &str, lines: usize) -> Vec<&str> {
    let all: Vec<&str> = text.split('\n').collect();
    all[all.len().saturating_sub(lines)..].to_vec()
}

/// The main loop: preflight, quick checks, tests, summary, next step.
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Running iteration loop...");
    println!();

    let git = ctx.git();
    let branch = git.current_branch();
    let changed_files = git.changed_files();
    let intent = ctx.intent_or(None, "Iteration loop");
    let toolchain = &ctx.config.toolchain;
    let mut checks = Vec::new();
    let mut all_passed = true;

    console::heading("Step 1: Preflight");
    println!("Branch: {}", branch);
    println!("Changed files: {}", changed_files.len());
    for file in changed_files.iter().take(PREVIEW_FILES) {
        println!("  - {}", file);
    }
    if changed_files.len() > PREVIEW_FILES {
        println!("  ... and {} more", changed_files.len() - PREVIEW_FILES);
    }
    println!();

    let has_deps = ctx.has_deps_dir();
    if !has_deps {
        console::warn(&format!(
            "No {} found. Skipping checks that require dependencies.",
            toolchain.deps_dir
        ));
        println!();
    }

    console::heading("Step 2: Quick Checks");
    if has_deps {
        for (name, title, command, problem) in [
            ("format", "Format", &toolchain.format_check, "needs attention"),
            ("lint", "Lint", &toolchain.lint, "has warnings/errors"),
            ("typecheck", "TypeScript", &toolchain.typecheck, "has errors"),
        ] {
            let result = ctx.executor.run(&format!("{} 2>/dev/null", command));
            if result.success {
                checks.push(CheckState::Passed.label(name));
                console::success(&format!("{}: OK", title));
            } else {
                checks.push(CheckState::Warned.label(name));
                console::warn(&format!("{}: {}", title, problem));
            }
        }
    } else {
        checks.push(format!("checks ⏭️ (no {})", toolchain.deps_dir));
    }
    println!();

    console::heading("Step 3: Tests");
    let test_status = if has_deps {
        let result = ctx.run_with_timeout(
            &format!("{} 2>&1", toolchain.test),
            ctx.config.test_timeout,
        );
        if result.success {
            console::success("Tests: PASSED");
            "vitest ✅".to_string()
        } else {
            console::fail("Tests: FAILED");
            all_passed = false;
            for line in tail(&result.stdout, FAILURE_TAIL_LINES) {
                println!("{}", line);
            }
            "vitest ❌".to_string()
        }
    } else {
        console::warn("Tests: skipped");
        format!("tests ⏭️ (no {})", toolchain.deps_dir)
    };
    println!();

    let next_step = if all_passed {
        "Run hook:verify for full verification, then commit"
    } else {
        "Fix failing checks/tests, then re-run hook:iterate"
    };

    console::heading("Iteration Summary");
    println!("Branch: {}", branch);
    println!("Intent: {}", intent);
    println!("Files changed: {}", changed_files.len());
    println!("Checks:");
    print_indented(&checks);
    println!("Tests: {}", test_status);
    println!(
        "Status: {}",
        if all_passed { "READY ✅" } else { "NEEDS WORK ⚠️" }
    );
    println!();
    println!("Next step: {}", next_step);
    console::rule("Iteration Summary");
    println!();

    let entry = LogEntry::new("iterate", Status::from_passed(all_passed), branch)
        .intent(intent)
        .files_changed(&changed_files)
        .checks(&checks)
        .tests(test_status)
        .outcome(if all_passed {
            "Iteration passed"
        } else {
            "Issues found during iteration"
        })
        .next_step(next_step);
    ctx.record(&entry)?;

    Ok(all_passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing;

    #[test]
    fn tail_keeps_last_lines() {
        assert_eq!(tail("a\nb\nc", 2), vec!["b", "c"]);
        assert_eq!(tail("a", 10), vec!["a"]);
    }

    #[test]
    fn no_deps_dir_skips_but_passes() {
        let (_dir, ctx) = testing::context("");
        assert!(run(&ctx).unwrap());
        let log = testing::log_text(&ctx);
        assert!(log.contains("ITERATE (PASS)"));
        assert!(log.contains("- Intent: Iteration loop"));
        assert!(log.contains("- Checks: checks ⏭️ (no node_modules)"));
        assert!(log.contains("- Tests: tests ⏭️ (no node_modules)"));
    }

    #[test]
    fn check_warnings_pass_but_test_failure_fails() {
        let (dir, mut ctx) = testing::context("tighten parser");
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        ctx.config.toolchain.format_check = "exit 1".to_string();
        ctx.config.toolchain.lint = "true".to_string();
        ctx.config.toolchain.typecheck = "true".to_string();
        ctx.config.toolchain.test = "true".to_string();
        assert!(run(&ctx).unwrap());

        ctx.config.toolchain.test = "echo boom; exit 1".to_string();
        assert!(!run(&ctx).unwrap());

        let log = testing::log_text(&ctx);
        assert!(log.contains("- Checks: format ⚠️, lint ✅, typecheck ✅"));
        assert!(log.contains("ITERATE (FAIL)"));
        assert!(log.contains("- Next step: Fix failing checks/tests, then re-run hook:iterate"));
    }
}
