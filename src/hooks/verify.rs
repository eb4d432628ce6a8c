use super::{print_indented, HookContext};
use crate::console;
use crate::record::{CheckState, LogEntry, Status};
use anyhow::Result;
use std::time::Duration;

struct Step<'a> {
    name: &'static str,
    title: &'static str,
    running: &'static str,
    command: &'a str,
    timeout: Duration,
    show_output: bool,
}

/// Full confidence run: format, lint, typecheck and tests, any failure fails.
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Running full verification...");

    let git = ctx.git();
    let branch = git.current_branch();
    let changed_files = git.changed_files();
    let config = &ctx.config;
    let toolchain = &config.toolchain;

    if !ctx.has_deps_dir() {
        console::error(&format!("No {} found. Run pnpm install first.", toolchain.deps_dir));
        let entry = LogEntry::new("verify", Status::Fail, branch)
            .intent("Full verification")
            .files_changed(&changed_files)
            .failure(format!("{} not found", toolchain.deps_dir))
            .next_step("Run pnpm install");
        ctx.record(&entry)?;
        return Ok(false);
    }

    let steps = [
        Step {
            name: "format",
            title: "Format",
            running: "Checking formatting...",
            command: &toolchain.format_check,
            timeout: config.command_timeout,
            show_output: false,
        },
        Step {
            name: "lint",
            title: "Lint",
            running: "Running linter...",
            command: &toolchain.lint,
            timeout: config.command_timeout,
            show_output: true,
        },
        Step {
            name: "typecheck",
            title: "TypeScript",
            running: "Running TypeScript check...",
            command: &toolchain.typecheck,
            timeout: config.command_timeout,
            show_output: true,
        },
        Step {
            name: "tests",
            title: "Tests",
            running: "Running tests...",
            command: &toolchain.test,
            timeout: config.test_timeout,
            show_output: true,
        },
    ];

    let mut checks = Vec::new();
    let mut all_passed = true;
    for step in &steps {
        console::info(step.running);
        let result = ctx.run_with_timeout(step.command, step.timeout);
        if result.success {
            checks.push(CheckState::Passed.label(step.name));
            console::success(&format!("{}: passed", step.title));
        } else {
            checks.push(CheckState::Failed.label(step.name));
            console::fail(&format!("{}: failed", step.title));
            if step.show_output {
                println!("{}", result.stdout);
            }
            all_passed = false;
        }
    }

    println!();
    console::heading("Verification Summary");
    print_indented(&checks);
    println!(
        "\nOverall: {}",
        if all_passed { "PASS ✅" } else { "FAIL ❌" }
    );
    console::rule("Verification Summary");
    println!();

    let tests = checks
        .iter()
        .find(|c| c.starts_with("tests"))
        .cloned()
        .unwrap_or_else(|| "not run".to_string());

    let entry = LogEntry::new("verify", Status::from_passed(all_passed), branch)
        .intent("Full verification")
        .files_changed(&changed_files)
        .checks(&checks)
        .tests(tests)
        .outcome(if all_passed {
            "All verifications passed"
        } else {
            "Verification failed"
        })
        .failure(if all_passed { "" } else { "One or more checks failed" })
        .next_step(if all_passed {
            "Ready to commit/push"
        } else {
            "Fix failures and re-run hook:verify"
        });
    ctx.record(&entry)?;

    if all_passed {
        console::success("Full verification passed - ready to commit");
    } else {
        console::fail("Verification failed - fix issues before committing");
    }
    Ok(all_passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing;

    #[test]
    fn missing_deps_dir_fails() {
        let (_dir, ctx) = testing::context("");
        assert!(!run(&ctx).unwrap());
        let log = testing::log_text(&ctx);
        assert!(log.contains("VERIFY (FAIL)"));
        assert!(log.contains("- Failure: node_modules not found"));
    }

    #[test]
    fn one_failing_step_fails_the_run() {
        let (dir, mut ctx) = testing::context("");
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        ctx.config.toolchain.format_check = "true".to_string();
        ctx.config.toolchain.lint = "true".to_string();
        ctx.config.toolchain.typecheck = "echo 'TS2322'; exit 2".to_string();
        ctx.config.toolchain.test = "true".to_string();

        assert!(!run(&ctx).unwrap());
        let log = testing::log_text(&ctx);
        assert!(log.contains("- Checks: format ✅, lint ✅, typecheck ❌, tests ✅"));
        assert!(log.contains("- Tests: tests ✅"));
        assert!(log.contains("- Outcome: Verification failed"));
    }

    #[test]
    fn all_green_passes() {
        let (dir, mut ctx) = testing::context("");
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        for command in [
            &mut ctx.config.toolchain.format_check,
            &mut ctx.config.toolchain.lint,
            &mut ctx.config.toolchain.typecheck,
            &mut ctx.config.toolchain.test,
        ] {
            *command = "true".to_string();
        }

        assert!(run(&ctx).unwrap());
        assert!(testing::log_text(&ctx).contains("- Next step: Ready to commit/push"));
    }
}
