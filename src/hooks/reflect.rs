use super::HookContext;
use crate::console;
use crate::record::{LogEntry, Status};
use anyhow::Result;

const TEMPLATE: &str = "\
Answer these questions:

1. What worked well?
   - Which approaches were effective?
   - What saved time?

2. What didn't work?
   - What caused delays or issues?
   - What assumptions were wrong?

3. What rule should we adopt?
   - Pattern to follow in the future
   - Anti-pattern to avoid

Example Reflection:
- Worked: Writing tests first caught edge cases early
- Failed: Assumed API would handle nulls, but it throws
- Rule: Always test null/undefined inputs for external APIs";

/// Prints the reflection prompts: what worked, what failed, which rule to adopt.
pub fn run(ctx: &HookContext, intent_arg: Option<&str>) -> Result<bool> {
    console::info("Running reflection...");

    let git = ctx.git();
    let branch = git.current_branch();
    let changed_files = git.changed_files();
    let intent = ctx.intent_or(intent_arg, "Session reflection");

    println!();
    console::heading("Reflection Template");
    println!();
    println!("{}", TEMPLATE);
    println!();
    console::rule("Reflection Template");
    println!();

    let entry = LogEntry::new("reflect", Status::Pass, branch)
        .intent(intent)
        .files_changed(&changed_files)
        .outcome("Reflection template generated")
        .next_step("Document learnings and update guardrails if needed");
    ctx.record(&entry)?;

    console::success("Reflection complete. Update guardrails with new rules.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing;

    #[test]
    fn defaults_intent() {
        let (_dir, ctx) = testing::context("");
        assert!(run(&ctx, None).unwrap());
        assert!(testing::log_text(&ctx).contains("- Intent: Session reflection"));
    }
}
