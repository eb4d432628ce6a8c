use crate::executor::{CommandExecutor, DEFAULT_TIMEOUT, TEST_TIMEOUT};
use crate::git::GitRepo;
use crate::learning_log::LOG_RELATIVE_PATH;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const INTENT_ENV: &str = "HOOK_INTENT";

/// Commands the gates shell out to.
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub deps_dir: String,
    pub manifest: String,
    pub runner: String,
    pub format_check: String,
    pub lint: String,
    pub typecheck: String,
    pub test: String,
    pub audit: String,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            deps_dir: "node_modules".to_string(),
            manifest: "package.json".to_string(),
            runner: "npx".to_string(),
            format_check: "npx prettier --check .".to_string(),
            lint: "npx eslint . --ext .ts,.tsx,.js,.jsx".to_string(),
            typecheck: "npx tsc --noEmit".to_string(),
            test: "npx vitest run".to_string(),
            audit: "npm audit --audit-level=moderate".to_string(),
        }
    }
}

/// Everything a hook needs to know about where it runs. Built once by
/// `main` and handed down; nothing here is global.
#[derive(Debug, Clone)]
pub struct Config {
    pub repo_root: PathBuf,
    pub log_path: PathBuf,
    pub intent: String,
    pub command_timeout: Duration,
    pub test_timeout: Duration,
    pub toolchain: Toolchain,
}

impl Config {
    pub fn new(repo_root: impl Into<PathBuf>, intent: impl Into<String>) -> Self {
        let repo_root = repo_root.into();
        Self {
            log_path: repo_root.join(LOG_RELATIVE_PATH),
            repo_root,
            intent: intent.into(),
            command_timeout: DEFAULT_TIMEOUT,
            test_timeout: TEST_TIMEOUT,
            toolchain: Toolchain::default(),
        }
    }

    /// Resolves the repository root (explicit override, else the git
    /// toplevel of the current directory, else the current directory) and
    /// reads the intent from the environment.
    pub fn discover(repo_root: Option<&Path>) -> Result<Self> {
        let root = match repo_root {
            Some(root) => root.to_path_buf(),
            None => {
                let cwd = std::env::current_dir().context("Failed to read current directory")?;
                let executor = CommandExecutor::new(&cwd, DEFAULT_TIMEOUT);
                match GitRepo::new(&executor).try_toplevel() {
                    Ok(toplevel) if !toplevel.is_empty() => PathBuf::from(toplevel),
                    Ok(_) => cwd,
                    Err(err) => {
                        debug!(error = %err, "not inside a git work tree, using current directory");
                        cwd
                    }
                }
            }
        };
        Ok(Self::new(root, read_intent()))
    }

    pub fn executor(&self) -> CommandExecutor {
        CommandExecutor::new(&self.repo_root, self.command_timeout)
    }
}

/// Free-text task description from `HOOK_INTENT`; empty when unset.
pub fn read_intent() -> String {
    std::env::var(INTENT_ENV).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_is_under_repo_root() {
        let config = Config::new("/work/repo", "ship it");
        assert_eq!(config.log_path, PathBuf::from("/work/repo/docs/learning-log.md"));
        assert_eq!(config.intent, "ship it");
        assert_eq!(config.command_timeout, Duration::from_secs(60));
        assert_eq!(config.test_timeout, Duration::from_secs(120));
    }

    #[test]
    fn explicit_root_wins_over_discovery() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(Some(dir.path())).unwrap();
        assert_eq!(config.repo_root, dir.path());
        assert_eq!(config.executor().working_dir(), dir.path());
    }
}
