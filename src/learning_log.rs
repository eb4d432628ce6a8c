use crate::record::{LogEntry, Status};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const LOG_RELATIVE_PATH: &str = "docs/learning-log.md";

pub const LOG_HEADER: &str = "# Learning Log

> Append-only log of hook runs and lessons learned.

---

";

/// Append-only Markdown log of hook runs.
pub struct LearningLog {
    path: PathBuf,
}

impl LearningLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders `entry` with the current time and appends it.
    pub fn append(&self, entry: &LogEntry) -> Result<()> {
        self.append_formatted(&format_entry(entry, Utc::now()))
    }

    /// Appends an already rendered entry, writing the header first if the log
    /// is new. Existing bytes are never rewritten.
    pub fn append_formatted(&self, rendered: &str) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open learning log {}", self.path.display()))?;

        file.lock_exclusive()
            .with_context(|| format!("Failed to lock learning log {}", self.path.display()))?;
        debug!(path = %self.path.display(), "learning log locked");

        // Checked under the lock so two first writers cannot both add a header.
        let mut block = String::new();
        if file.metadata()?.len() == 0 {
            block.push_str(LOG_HEADER);
        }
        block.push('\n');
        block.push_str(rendered);
        block.push('\n');

        file.write_all(block.as_bytes())
            .and_then(|_| file.flush())
            .with_context(|| format!("Failed to append to learning log {}", self.path.display()))?;

        // A failed unlock is not a failed append; closing the file releases it.
        if let Err(err) = file.unlock() {
            debug!(error = %err, "learning log unlock failed");
        }
        Ok(())
    }
}

/// Renders one entry as a Markdown block. Pure: same input and timestamp,
/// same output.
pub fn format_entry(entry: &LogEntry, timestamp: DateTime<Utc>) -> String {
    let mut out = format!(
        "## {} — {} ({})\n\n",
        timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        entry.command.to_uppercase(),
        entry.status
    );

    out.push_str(&format!("- Branch: {}\n", entry.branch));
    let intent = if entry.intent.is_empty() {
        "Not specified"
    } else {
        entry.intent.as_str()
    };
    out.push_str(&format!("- Intent: {}\n", intent));
    let files = if entry.files_changed.is_empty() {
        "None".to_string()
    } else {
        entry.files_changed.join(", ")
    };
    out.push_str(&format!("- Files changed: {}", files));

    if !entry.checks.is_empty() {
        out.push_str(&format!("\n- Checks: {}", entry.checks.join(", ")));
    }
    if !entry.tests.is_empty() {
        out.push_str(&format!("\n- Tests: {}", entry.tests));
    }
    // A failure line only makes sense on a failed run.
    if entry.status == Status::Fail && !entry.failure_summary.is_empty() {
        out.push_str(&format!("\n- Failure: {}", entry.failure_summary));
    }
    if !entry.outcome.is_empty() {
        out.push_str(&format!("\n- Outcome: {}", entry.outcome));
    }
    if !entry.next_step.is_empty() {
        out.push_str(&format!("\n- Next step: {}", entry.next_step));
    }

    out.push('\n');
    out
}
