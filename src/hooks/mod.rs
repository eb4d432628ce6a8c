//! Workflow hooks. Each hook prints a console summary, appends at most one
//! learning log entry and reports pass/fail to `main`, which turns it into
//! the process exit code.

pub mod audit;
pub mod check;
pub mod diff;
pub mod iterate;
pub mod plan;
pub mod preflight;
pub mod prnotes;
pub mod reflect;
pub mod secret_scan;
pub mod verify;

use crate::config::Config;
use crate::executor::{CommandExecutor, ExecOptions};
use crate::git::GitRepo;
use crate::learning_log::LearningLog;
use crate::record::{CommandResult, LogEntry};
use anyhow::Result;
use std::time::Duration;

pub struct HookContext {
    pub config: Config,
    pub executor: CommandExecutor,
    pub log: LearningLog,
}

impl HookContext {
    pub fn new(config: Config) -> Self {
        let executor = config.executor();
        let log = LearningLog::new(&config.log_path);
        Self {
            config,
            executor,
            log,
        }
    }

    pub fn git(&self) -> GitRepo<'_> {
        GitRepo::new(&self.executor)
    }

    /// Whether the installed-dependencies directory exists at the repo root.
    pub fn has_deps_dir(&self) -> bool {
        self.executor
            .run(&format!("test -d {}", self.config.toolchain.deps_dir))
            .success
    }

    pub fn run_with_timeout(&self, command: &str, timeout: Duration) -> CommandResult {
        self.executor.run_with(command, &ExecOptions::timeout(timeout))
    }

    /// Environment intent, then the positional argument, then `fallback`.
    pub fn intent_or(&self, argument: Option<&str>, fallback: &str) -> String {
        if !self.config.intent.is_empty() {
            return self.config.intent.clone();
        }
        match argument {
            Some(arg) if !arg.is_empty() => arg.to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn record(&self, entry: &LogEntry) -> Result<()> {
        self.log.append(entry)
    }
}

pub fn exit_code(success: bool) -> i32 {
    if success {
        0
    } else {
        1
    }
}

/// Ends the process: 0 on success, 1 otherwise.
pub fn exit_with_status(success: bool) -> ! {
    std::process::exit(exit_code(success))
}

pub(crate) fn print_indented(items: &[String]) {
    for item in items {
        println!("  {}", item);
    }
}
