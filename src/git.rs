//! Git introspection over the shell executor.
//!
//! Every query comes in two flavours: a `try_*` method returning
//! `Result<_, GitError>` for callers that care why a query failed, and a
//! plain method that degrades to a safe default (`"unknown"`, empty list,
//! empty string) so reporting can carry on.

use crate::executor::CommandExecutor;
use thiserror::Error;
use tracing::debug;

pub const UNKNOWN_BRANCH: &str = "unknown";

#[derive(Debug, Error)]
pub enum GitError {
    #[error("`{command}` failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
    #[error("HEAD is detached, no branch name")]
    DetachedHead,
}

pub struct GitRepo<'a> {
    executor: &'a CommandExecutor,
}

impl<'a> GitRepo<'a> {
    pub fn new(executor: &'a CommandExecutor) -> Self {
        Self { executor }
    }

    fn output(&self, command: &str) -> Result<String, GitError> {
        let result = self.executor.run(command);
        if result.success {
            Ok(result.stdout)
        } else {
            Err(GitError::CommandFailed {
                command: command.to_string(),
                stderr: result.stderr.trim().to_string(),
            })
        }
    }

    pub fn try_current_branch(&self) -> Result<String, GitError> {
        let branch = self.output("git branch --show-current")?.trim().to_string();
        if branch.is_empty() {
            return Err(GitError::DetachedHead);
        }
        Ok(branch)
    }

    pub fn current_branch(&self) -> String {
        self.try_current_branch().unwrap_or_else(|err| {
            debug!(error = %err, "branch lookup failed");
            UNKNOWN_BRANCH.to_string()
        })
    }

    /// Staged, unstaged and untracked (not ignored) paths, first occurrence wins.
    pub fn try_changed_files(&self) -> Result<Vec<String>, GitError> {
        let staged = self.output("git diff --cached --name-only")?;
        let unstaged = self.output("git diff --name-only")?;
        let untracked = self.output("git ls-files --others --exclude-standard")?;
        Ok(unique_lines([staged.as_str(), unstaged.as_str(), untracked.as_str()]))
    }

    pub fn changed_files(&self) -> Vec<String> {
        self.try_changed_files().unwrap_or_else(|err| {
            debug!(error = %err, "changed file lookup failed");
            Vec::new()
        })
    }

    pub fn try_status(&self) -> Result<String, GitError> {
        Ok(self.output("git status --short")?.trim().to_string())
    }

    pub fn working_tree_status(&self) -> String {
        self.try_status().unwrap_or_else(|err| {
            debug!(error = %err, "status lookup failed");
            String::new()
        })
    }

    pub fn try_toplevel(&self) -> Result<String, GitError> {
        Ok(self.output("git rev-parse --show-toplevel")?.trim().to_string())
    }
}

fn unique_lines<'s>(outputs: impl IntoIterator<Item = &'s str>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut files = Vec::new();
    for line in outputs.into_iter().flat_map(str::lines) {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        if seen.insert(line.to_string()) {
            files.push(line.to_string());
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::DEFAULT_TIMEOUT;
    use std::fs;
    use std::path::Path;

    fn git(dir: &Path, args: &str) {
        let result = CommandExecutor::new(dir, DEFAULT_TIMEOUT).run(&format!("git {}", args));
        assert!(result.success, "git {} failed: {}", args, result.stderr);
    }

    fn init_repo(dir: &Path) {
        git(dir, "init -q -b trunk");
        git(dir, "config user.email hooks@localhost");
        git(dir, "config user.name hooks");
        git(dir, "config commit.gpgsign false");
    }

    #[test]
    fn unique_lines_keeps_first_occurrence_order() {
        let files = unique_lines(["a.rs\nb.rs\n", "b.rs\nc.rs\n", "\na.rs\nd.rs"]);
        assert_eq!(files, vec!["a.rs", "b.rs", "c.rs", "d.rs"]);
    }

    #[test]
    fn outside_a_repository_everything_degrades() {
        let dir = tempfile::tempdir().unwrap();
        let executor = CommandExecutor::new(dir.path(), DEFAULT_TIMEOUT);
        let repo = GitRepo::new(&executor);

        assert_eq!(repo.current_branch(), UNKNOWN_BRANCH);
        assert!(repo.changed_files().is_empty());
        assert_eq!(repo.working_tree_status(), "");
        assert!(repo.try_current_branch().is_err());
    }

    #[test]
    fn staged_and_unstaged_path_is_listed_once() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("lib.js"), "one\n").unwrap();
        git(dir.path(), "add lib.js");
        git(dir.path(), "commit -q -m init");

        fs::write(dir.path().join("lib.js"), "two\n").unwrap();
        git(dir.path(), "add lib.js");
        fs::write(dir.path().join("lib.js"), "three\n").unwrap();
        fs::write(dir.path().join("new.md"), "fresh\n").unwrap();
        fs::write(dir.path().join(".gitignore"), "ignored.log\n").unwrap();
        fs::write(dir.path().join("ignored.log"), "noise\n").unwrap();

        let executor = CommandExecutor::new(dir.path(), DEFAULT_TIMEOUT);
        let repo = GitRepo::new(&executor);
        let files = repo.changed_files();

        assert_eq!(files.iter().filter(|f| f.as_str() == "lib.js").count(), 1);
        assert!(files.contains(&"new.md".to_string()));
        assert!(files.contains(&".gitignore".to_string()));
        assert!(!files.contains(&"ignored.log".to_string()));
        assert_eq!(repo.current_branch(), "trunk");
        assert!(repo.working_tree_status().contains("lib.js"));
    }

    #[test]
    fn detached_head_reports_unknown_branch() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("lib.js"), "one\n").unwrap();
        git(dir.path(), "add lib.js");
        git(dir.path(), "commit -q -m init");
        git(dir.path(), "checkout -q --detach");

        let executor = CommandExecutor::new(dir.path(), DEFAULT_TIMEOUT);
        let repo = GitRepo::new(&executor);

        assert!(matches!(repo.try_current_branch(), Err(GitError::DetachedHead)));
        assert_eq!(repo.current_branch(), UNKNOWN_BRANCH);
    }
}
