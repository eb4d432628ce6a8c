use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Success,
    Fail,
}

impl Level {
    pub fn prefix(&self) -> &'static str {
        match self {
            Level::Info => "[INFO]",
            Level::Warn => "[WARN]",
            Level::Error => "[ERROR]",
            Level::Success => "[OK]",
            Level::Fail => "[FAIL]",
        }
    }

    fn colored_prefix(&self) -> ColoredString {
        match self {
            Level::Info => self.prefix().cyan(),
            Level::Warn => self.prefix().yellow(),
            Level::Error => self.prefix().red().bold(),
            Level::Success => self.prefix().green(),
            Level::Fail => self.prefix().red(),
        }
    }
}

pub fn log(level: Level, message: &str) {
    println!("{} {}", level.colored_prefix(), message);
}

pub fn info(message: &str) {
    log(Level::Info, message);
}

pub fn warn(message: &str) {
    log(Level::Warn, message);
}

pub fn error(message: &str) {
    log(Level::Error, message);
}

pub fn success(message: &str) {
    log(Level::Success, message);
}

pub fn fail(message: &str) {
    log(Level::Fail, message);
}

/// `=== Title ===`
pub fn heading(title: &str) {
    println!("{}", format!("=== {} ===", title).bold());
}

/// Closing rule as wide as the matching heading.
pub fn rule(title: &str) {
    println!("{}", "=".repeat(title.chars().count() + 8).bold());
}
