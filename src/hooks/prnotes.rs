use super::diff::is_source;
use super::HookContext;
use crate::console;
use crate::record::{LogEntry, Status};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCounts {
    pub source: usize,
    pub test: usize,
    pub docs: usize,
}

/// Overlapping counts: a `foo.test.ts` is both a source and a test file.
pub fn count_changes(files: &[String]) -> ChangeCounts {
    ChangeCounts {
        source: files.iter().filter(|f| is_source(f)).count(),
        test: files
            .iter()
            .filter(|f| f.contains("test") || f.contains("spec"))
            .count(),
        docs: files.iter().filter(|f| f.ends_with(".md")).count(),
    }
}

pub fn render(branch: &str, intent: &str, counts: ChangeCounts, commits: &str) -> String {
    let mut out = String::new();
    out.push_str("## Summary\n\n");
    out.push_str(&format!("> Branch: `{}`\n", branch));
    if !intent.is_empty() {
        out.push_str(&format!("> Intent: {}\n", intent));
    }
    out.push_str("\n### What\n");
    out.push_str("- [ ] Describe what this PR does\n");
    out.push_str("- [ ] List main changes\n");
    out.push_str("\n### Why\n");
    out.push_str("- [ ] Explain the motivation\n");
    out.push_str("- [ ] Link to issue/ticket if applicable\n");
    out.push_str("\n## Changes\n\n");
    out.push_str(&format!("- {} source file(s)\n", counts.source));
    out.push_str(&format!("- {} test file(s)\n", counts.test));
    out.push_str(&format!("- {} documentation file(s)\n", counts.docs));
    if !commits.is_empty() {
        out.push_str("\n### Commits\n```\n");
        out.push_str(commits.trim_end());
        out.push_str("\n```\n");
    }
    out.push_str("\n## Test Plan\n\n");
    out.push_str("- [ ] Unit tests pass (`pnpm test`)\n");
    out.push_str("- [ ] Manual testing completed\n");
    out.push_str("- [ ] Edge cases verified\n");
    out.push_str("\n## Risks\n\n");
    out.push_str("- [ ] No breaking changes\n");
    out.push_str("- [ ] No security concerns\n");
    out.push_str("- [ ] No performance impact\n");
    out.push_str("\n## Rollback Plan\n\n");
    out.push_str("If issues occur:\n");
    out.push_str("1. Revert this PR\n");
    out.push_str("2. Investigate root cause\n");
    out.push_str("3. Fix and re-submit\n");
    out
}

/// Prints a PR description skeleton (what, why, tests, risks, rollback).
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Generating PR notes...");

    let git = ctx.git();
    let branch = git.current_branch();
    let changed_files = git.changed_files();
    let intent = ctx.config.intent.clone();

    let commits = ctx
        .executor
        .run("git log --oneline main..HEAD 2>/dev/null || git log --oneline -5")
        .stdout;

    println!();
    console::heading("PR Notes Template");
    println!();
    println!("Copy this template and fill in the details:");
    println!();
    println!("---");
    println!();
    print!("{}", render(&branch, &intent, count_changes(&changed_files), &commits));
    println!();
    println!("---");
    println!();
    console::rule("PR Notes Template");
    println!();

    let entry = LogEntry::new("prnotes", Status::Pass, branch)
        .intent(ctx.intent_or(None, "Generate PR notes"))
        .files_changed(&changed_files)
        .outcome("PR notes template generated")
        .next_step("Fill in template and create PR");
    ctx.record(&entry)?;

    console::success("PR notes template generated.");
    Ok(true)
}
