use super::{print_indented, HookContext};
use crate::console;
use crate::executor::command_is_available;
use crate::record::{CheckState, LogEntry, Status};
use anyhow::Result;

struct Gate<'a> {
    name: &'static str,
    command: &'a str,
    running: &'static str,
    passed: &'static str,
    warned: &'static str,
    show_output: bool,
}

/// Runs format, lint and typecheck and returns one label per gate. Findings
/// are warnings: they are shown and logged but never fail this gate. `verify`
/// is the strict variant.
pub fn evaluate(ctx: &HookContext) -> Vec<String> {
    let toolchain = &ctx.config.toolchain;
    let has_deps = ctx.has_deps_dir();
    if !has_deps {
        console::warn(&format!(
            "No {} found. Run pnpm install first.",
            toolchain.deps_dir
        ));
    }
    let runnable = has_deps && command_is_available(&toolchain.runner);

    let gates = [
        Gate {
            name: "format",
            command: &toolchain.format_check,
            running: "Checking formatting with Prettier...",
            passed: "Format check passed",
            warned: "Format check: some files need formatting (run pnpm format)",
            show_output: false,
        },
        Gate {
            name: "lint",
            command: &toolchain.lint,
            running: "Running ESLint...",
            passed: "Lint check passed",
            warned: "Lint check: warnings/errors found (run pnpm lint:fix)",
            show_output: true,
        },
        Gate {
            name: "typecheck",
            command: &toolchain.typecheck,
            running: "Running TypeScript check...",
            passed: "TypeScript check passed",
            warned: "TypeScript check: errors found",
            show_output: true,
        },
    ];

    let mut checks = Vec::new();
    for gate in &gates {
        if !runnable {
            checks.push(CheckState::Skipped.label(gate.name));
            continue;
        }

        console::info(gate.running);
        let result = ctx.executor.run(gate.command);
        if result.success {
            checks.push(CheckState::Passed.label(gate.name));
            console::success(gate.passed);
        } else {
            checks.push(CheckState::Warned.label(gate.name));
            console::warn(gate.warned);
            if gate.show_output && !result.stdout.is_empty() {
                println!("{}", result.stdout);
            }
        }
    }

    checks
}

pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Running fast checks (lint/format/typecheck)...");

    let branch = ctx.git().current_branch();
    let checks = evaluate(ctx);

    println!();
    console::heading("Check Summary");
    print_indented(&checks);
    console::rule("Check Summary");
    println!();

    let entry = LogEntry::new("check", Status::Pass, branch)
        .intent("Fast quality gate")
        .checks(&checks)
        .outcome("All checks passed")
        .next_step("Run hook:test");
    ctx.record(&entry)?;

    console::success("All checks passed");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing;

    #[test]
    fn missing_deps_dir_skips_everything_and_still_passes() {
        let (_dir, ctx) = testing::context("");
        assert_eq!(
            evaluate(&ctx),
            vec![
                "format ⏭️ (skipped)".to_string(),
                "lint ⏭️ (skipped)".to_string(),
                "typecheck ⏭️ (skipped)".to_string(),
            ]
        );

        assert!(run(&ctx).unwrap());
        let log = testing::log_text(&ctx);
        assert_eq!(log.matches("CHECK (PASS)").count(), 1);
        assert!(log.contains("- Checks: format ⏭️ (skipped), lint ⏭️ (skipped), typecheck ⏭️ (skipped)"));
        assert!(log.contains("- Outcome: All checks passed"));
        assert!(log.contains("- Next step: Run hook:test"));
    }

    #[test]
    fn failing_tools_only_warn() {
        let (dir, mut ctx) = testing::context("");
        std::fs::create_dir(dir.path().join("node_modules")).unwrap();
        ctx.config.toolchain.runner = "sh".to_string();
        ctx.config.toolchain.format_check = "true".to_string();
        ctx.config.toolchain.lint = "echo 'no-unused-vars'; exit 1".to_string();
        ctx.config.toolchain.typecheck = "exit 2".to_string();

        assert_eq!(
            evaluate(&ctx),
            vec!["format ✅".to_string(), "lint ⚠️".to_string(), "typecheck ⚠️".to_string()]
        );

        assert!(run(&ctx).unwrap());
        let log = testing::log_text(&ctx);
        assert_eq!(log.matches("CHECK (PASS)").count(), 1);
        assert!(log.contains("- Checks: format ✅, lint ⚠️, typecheck ⚠️"));
        assert!(!log.contains("- Failure:"));
    }
}
