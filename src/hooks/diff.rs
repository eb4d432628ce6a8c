use super::HookContext;
use crate::console;
use crate::record::{LogEntry, Status};
use anyhow::Result;

const SOURCE_EXTENSIONS: [&str; 4] = [".ts", ".js", ".tsx", ".jsx"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Source,
    Test,
    Config,
    Docs,
    Other,
}

impl FileCategory {
    /// First rule that matches wins: test, docs, config, source.
    pub fn classify(path: &str) -> Self {
        if path.contains("test") || path.contains("spec") {
            FileCategory::Test
        } else if path.ends_with(".md") || path.starts_with("docs/") {
            FileCategory::Docs
        } else if path.contains("config")
            || path.ends_with(".json")
            || path.ends_with(".yaml")
            || path.ends_with(".yml")
        {
            FileCategory::Config
        } else if is_source(path) {
            FileCategory::Source
        } else {
            FileCategory::Other
        }
    }
}

pub fn is_source(path: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

#[derive(Debug, Default)]
pub struct Categorized {
    pub source: Vec<String>,
    pub test: Vec<String>,
    pub config: Vec<String>,
    pub docs: Vec<String>,
}

/// Groups the files that get their own section in the summary; `Other` is
/// only reflected in the total.
pub fn categorize(files: &[String]) -> Categorized {
    let mut groups = Categorized::default();
    for file in files {
        let bucket = match FileCategory::classify(file) {
            FileCategory::Source => &mut groups.source,
            FileCategory::Test => &mut groups.test,
            FileCategory::Config => &mut groups.config,
            FileCategory::Docs => &mut groups.docs,
            FileCategory::Other => continue,
        };
        bucket.push(file.clone());
    }
    groups
}

/// Human-readable summary of the working changes for a PR or review.
pub fn run(ctx: &HookContext) -> Result<bool> {
    console::info("Generating diff summary...");

    let git = ctx.git();
    let branch = git.current_branch();
    let changed_files = git.changed_files();

    let diff_stat = ctx
        .executor
        .run("git diff --stat HEAD~1 2>/dev/null || git diff --stat");
    let diff_stat = if diff_stat.stdout.is_empty() {
        "No diff available".to_string()
    } else {
        diff_stat.stdout
    };
    let commits = ctx
        .executor
        .run("git log --oneline main..HEAD 2>/dev/null || git log --oneline -5")
        .stdout;

    let groups = categorize(&changed_files);

    println!();
    console::heading("Diff Summary");
    println!();
    println!("Branch: {}", branch);
    println!("Total files changed: {}", changed_files.len());
    println!();

    for (label, files) in [
        ("Source files", &groups.source),
        ("Test files", &groups.test),
        ("Config files", &groups.config),
        ("Documentation", &groups.docs),
    ] {
        if files.is_empty() {
            continue;
        }
        println!("{} ({}):", label, files.len());
        for file in files {
            println!("  - {}", file);
        }
        println!();
    }

    println!("Diff Stats:");
    println!("{}", diff_stat);
    println!();

    if !commits.is_empty() {
        println!("Recent Commits:");
        println!("{}", commits);
        println!();
    }

    console::rule("Diff Summary");
    println!();

    let entry = LogEntry::new("diff", Status::Pass, branch)
        .intent("Generate diff summary")
        .files_changed(&changed_files)
        .outcome(format!("Summarized {} changed files", changed_files.len()))
        .next_step("Use this summary for PR description");
    ctx.record(&entry)?;

    console::success("Diff summary generated.");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::testing;

    #[test]
    fn classification_precedence() {
        assert_eq!(FileCategory::classify("src/app.test.ts"), FileCategory::Test);
        assert_eq!(FileCategory::classify("spec/helpers.md"), FileCategory::Test);
        assert_eq!(FileCategory::classify("docs/config.json"), FileCategory::Docs);
        assert_eq!(FileCategory::classify("README.md"), FileCategory::Docs);
        assert_eq!(FileCategory::classify("vite.config.ts"), FileCategory::Config);
        assert_eq!(FileCategory::classify(".github/ci.yml"), FileCategory::Config);
        assert_eq!(FileCategory::classify("src/index.tsx"), FileCategory::Source);
        assert_eq!(FileCategory::classify("Makefile"), FileCategory::Other);
    }

    #[test]
    fn categorize_keeps_order_within_groups() {
        let files: Vec<String> = ["b.js", "notes.md", "a.js", "package.json"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let groups = categorize(&files);
        assert_eq!(groups.source, vec!["b.js", "a.js"]);
        assert_eq!(groups.docs, vec!["notes.md"]);
        assert_eq!(groups.config, vec!["package.json"]);
        assert!(groups.test.is_empty());
    }

    #[test]
    fn logs_summary_outside_repository() {
        let (_dir, ctx) = testing::context("");
        assert!(run(&ctx).unwrap());
        let log = testing::log_text(&ctx);
        assert!(log.contains("DIFF (PASS)"));
        assert!(log.contains("- Outcome: Summarized 0 changed files"));
    }
}
