use super::HookContext;
use crate::console;
use crate::record::{LogEntry, Status};
use anyhow::Result;

/// Collects branch, changed files and status, and records the intent.
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Running preflight check...");

    let git = ctx.git();
    let branch = git.current_branch();
    let changed_files = git.changed_files();
    let status = git.working_tree_status();
    let intent = &ctx.config.intent;

    println!();
    console::heading("Preflight Summary");
    println!("Branch: {}", branch);
    println!("Changed files: {}", changed_files.len());
    for file in &changed_files {
        println!("  - {}", file);
    }
    if !status.is_empty() {
        println!("\nGit Status:");
        println!("{}", status);
    }
    if !intent.is_empty() {
        println!("\nIntent: {}", intent);
    }
    console::rule("Preflight Summary");
    println!();

    let entry = LogEntry::new("preflight", Status::Pass, branch)
        .intent(ctx.intent_or(None, "Preflight check"))
        .files_changed(&changed_files)
        .outcome(format!("Found {} changed file(s)", changed_files.len()))
        .next_step("Run hook:plan to create micro-plan");
    ctx.record(&entry)?;

    console::success("Preflight complete. Entry logged.");
    Ok(true)
}
