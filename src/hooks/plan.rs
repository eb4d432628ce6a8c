use super::HookContext;
use crate::console;
use crate::record::{LogEntry, Status};
use anyhow::Result;

const TEMPLATE: &str = "\
Create a plan with 3-7 bullets covering:
1. What you are implementing
2. Key files to modify
3. Test strategy (what tests to write/run)
4. Verification steps
5. Rollback plan (if applicable)

Example Plan:
- [ ] Implement user authentication endpoint
- [ ] Add input validation at the API boundary
- [ ] Write unit tests for auth service
- [ ] Test manually with curl
- [ ] Run full test suite before commit";

/// Prints the micro-plan template and records the intent.
pub fn run(ctx: &HookContext, intent_arg: Option<&str>) -> Result<bool> {
    console::info("Recording micro-plan...");

    let branch = ctx.git().current_branch();
    let intent = ctx.intent_or(intent_arg, "Create micro-plan");

    println!();
    console::heading("Micro-Plan Template");
    println!();
    println!("{}", TEMPLATE);
    println!();
    console::rule("Micro-Plan Template");

    let entry = LogEntry::new("plan", Status::Pass, branch)
        .intent(intent)
        .outcome("Plan template displayed")
        .next_step("Implement the plan items one by one");
    ctx.record(&entry)?;

    console::success("Plan template generated. Customize for your task.");
    Ok(true)
}
