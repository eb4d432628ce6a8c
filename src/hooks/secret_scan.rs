use super::HookContext;
use crate::console;
use crate::secrets::SecretScanner;
use anyhow::Result;

/// Reports likely credentials under the repository root. Nothing is logged
/// to the learning log; the exit code is the result.
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Scanning for potential secrets...");

    let scanner = SecretScanner::new(ctx.executor.working_dir())?;
    let findings = scanner.scan();

    if findings.is_empty() {
        console::success("No potential secrets detected");
        return Ok(true);
    }

    console::warn("Potential secrets found:");
    for finding in &findings {
        println!("\n  {}: {} potential match(es)", finding.pattern, finding.count);
        for line in &finding.lines {
            println!("    {}", line);
        }
    }
    println!();
    console::warn("⚠️  Review these findings. Some may be false positives.");
    console::error(
        "If these are legitimate secrets, remove them and rotate any exposed credentials.",
    );
    Ok(false)
}
