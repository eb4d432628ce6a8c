use std::fmt;

/// Outcome of one shell invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    pub success: bool,          // Exited with code 0 before the deadline
    pub stdout: String,         // Captured standard output (partial on timeout)
    pub stderr: String,         // Captured standard error (spawn error text on spawn failure)
    pub exit_code: Option<i32>, // None when killed, timed out or never spawned
    pub timed_out: bool,        // Deadline elapsed and the process group was killed
}

impl CommandResult {
    pub fn spawn_failure(message: String) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: message,
            exit_code: None,
            timed_out: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pass,
    Fail,
}

impl Status {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            Status::Pass
        } else {
            Status::Fail
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pass => "PASS",
            Status::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of a single verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    Passed,
    Warned,
    Failed,
    Skipped,
}

impl CheckState {
    /// Renders the label stored in the learning log, e.g. `lint ⚠️`.
    pub fn label(&self, name: &str) -> String {
        match self {
            CheckState::Passed => format!("{} ✅", name),
            CheckState::Warned => format!("{} ⚠️", name),
            CheckState::Failed => format!("{} ❌", name),
            CheckState::Skipped => format!("{} ⏭️ (skipped)", name),
        }
    }
}

/// Fields of one learning log entry. Rendering lives in `learning_log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub command: String,
    pub status: Status,
    pub branch: String,
    pub intent: String,
    pub files_changed: Vec<String>,
    pub checks: Vec<String>,
    pub tests: String,
    pub outcome: String,
    pub next_step: String,
    pub failure_summary: String,
}

impl LogEntry {
    pub fn new(command: impl Into<String>, status: Status, branch: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            status,
            branch: branch.into(),
            intent: String::new(),
            files_changed: Vec::new(),
            checks: Vec::new(),
            tests: String::new(),
            outcome: String::new(),
            next_step: String::new(),
            failure_summary: String::new(),
        }
    }

    pub fn intent(mut self, intent: impl Into<String>) -> Self {
        self.intent = intent.into();
        self
    }

    pub fn files_changed(mut self, files: &[String]) -> Self {
        self.files_changed = files.to_vec();
        self
    }

    pub fn checks(mut self, checks: &[String]) -> Self {
        self.checks = checks.to_vec();
        self
    }

    pub fn tests(mut self, tests: impl Into<String>) -> Self {
        self.tests = tests.into();
        self
    }

    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    pub fn next_step(mut self, next_step: impl Into<String>) -> Self {
        self.next_step = next_step.into();
        self
    }

    pub fn failure(mut self, summary: impl Into<String>) -> Self {
        self.failure_summary = summary.into();
        self
    }
}
