//! Regex scan of the working tree for credentials that should not be committed.

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const PATTERN_TABLE: [(&str, &str); 7] = [
    (
        "API Key",
        r#"(?i)(api[_-]?key|apikey)\s*[:=]\s*['"](sk|pk|AKIA|AIza)[\w-]+['"]"#,
    ),
    (
        "AWS Credentials",
        r#"(?i)(aws[_-]?access[_-]?key[_-]?id|aws[_-]?secret[_-]?access[_-]?key)\s*[:=]\s*['"][\w+/=]{20,}['"]"#,
    ),
    (
        "Token",
        r#"(?i)(token|bearer|authorization)\s*[:=]\s*['"][\w-]{32,}['"]"#,
    ),
    (
        "Password",
        r#"(?i)(password|passwd|pwd)\s*[:=]\s*['"][^'"]{8,}['"]"#,
    ),
    ("Private Key", r"-----BEGIN\s+(RSA\s+)?PRIVATE\s+KEY-----"),
    ("GitHub Token", r"ghp_[a-zA-Z0-9]{36}"),
    ("OpenAI Key", r"sk-proj-[a-zA-Z0-9]{48}"),
];

pub const EXCLUDED_DIRS: [&str; 8] = [
    "node_modules",
    ".git",
    ".husky",
    "dist",
    "build",
    ".next",
    ".cache",
    "coverage",
];

const EXCLUDED_EXTENSIONS: [&str; 2] = ["lock", "log"];

/// Lowercased substrings that mark a hit as documentation or fixture noise.
pub const FALSE_POSITIVE_MARKERS: [&str; 4] = ["example", "test", "sample", "placeholder"];

pub const MAX_SHOWN: usize = 5;

pub struct SecretPattern {
    pub name: &'static str,
    pub regex: Regex,
}

pub fn default_patterns() -> Result<Vec<SecretPattern>> {
    PATTERN_TABLE
        .iter()
        .map(|&(name, source)| {
            let regex = Regex::new(source)
                .with_context(|| format!("Invalid secret pattern for {}", name))?;
            Ok(SecretPattern { name, regex })
        })
        .collect()
}

/// Hits for one pattern: total count and the first few `path:line:text` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub pattern: &'static str,
    pub count: usize,
    pub lines: Vec<String>,
}

pub fn is_false_positive(line: &str) -> bool {
    let lower = line.to_lowercase();
    FALSE_POSITIVE_MARKERS
        .iter()
        .any(|marker| lower.contains(marker))
}

pub struct SecretScanner {
    root: PathBuf,
    patterns: Vec<SecretPattern>,
}

impl SecretScanner {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            patterns: default_patterns()?,
        })
    }

    fn text_files(&self) -> Vec<PathBuf> {
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .hidden(false)
            .git_ignore(true)
            .git_exclude(true)
            .require_git(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                let name = entry.file_name().to_string_lossy();
                !(is_dir && EXCLUDED_DIRS.iter().any(|dir| name == *dir))
            });

        builder
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| !EXCLUDED_EXTENSIONS.contains(&ext))
                    .unwrap_or(true)
            })
            .collect()
    }

    fn display_path<'p>(&self, path: &'p Path) -> std::borrow::Cow<'p, str> {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
    }

    /// Scans every text file once per run and returns one finding per pattern
    /// that still has hits after false-positive filtering, in table order.
    pub fn scan(&self) -> Vec<Finding> {
        let mut hits: Vec<Vec<String>> = vec![Vec::new(); self.patterns.len()];

        for path in self.text_files() {
            // Binary or non-UTF-8 content is not source text.
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(err) => {
                    debug!(path = %path.display(), error = %err, "skipping unreadable file");
                    continue;
                }
            };
            let shown_path = self.display_path(&path);
            for (number, line) in content.lines().enumerate() {
                for (index, pattern) in self.patterns.iter().enumerate() {
                    if !pattern.regex.is_match(line) {
                        continue;
                    }
                    let rendered = format!("{}:{}:{}", shown_path, number + 1, line);
                    if !is_false_positive(&rendered) {
                        hits[index].push(rendered);
                    }
                }
            }
        }

        self.patterns
            .iter()
            .zip(hits)
            .filter(|(_, lines)| !lines.is_empty())
            .map(|(pattern, lines)| Finding {
                pattern: pattern.name,
                count: lines.len(),
                lines: lines.into_iter().take(MAX_SHOWN).collect(),
            })
            .collect()
    }
}
