mod config;
mod console;
mod executor;
mod git;
mod hooks;
mod learning_log;
mod record;
mod secrets;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::Config;
use hooks::{exit_with_status, HookContext};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LOG_FILTER_ENV: &str = "DEVHOOKS_LOG";

#[derive(Parser)]
#[command(name = "devhooks")]
#[command(version, about = "Workflow hooks for an iterative coding loop")]
struct Cli {
    /// Repository root [default: enclosing git work tree, else current directory]
    #[arg(long = "repo-root", short = 'C', global = true)]
    repo_root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect branch, status and changed files, and record the intent
    Preflight,
    /// Print a micro-plan template and record it
    Plan {
        /// Task description, used when HOOK_INTENT is not set
        intent: Option<String>,
    },
    /// Fast gate: format, lint and typecheck (findings warn, never fail)
    Check,
    /// Run the test suite
    Test,
    /// Full gate: format, lint, typecheck and tests, any failure fails
    Verify,
    /// Summarize changed files, diff stats and recent commits
    Diff,
    /// Print a PR description template
    Prnotes,
    /// Print reflection prompts and record them
    Reflect {
        /// Task description, used when HOOK_INTENT is not set
        intent: Option<String>,
    },
    /// Scan the working tree for committed credentials
    SecretScan,
    /// Audit installed dependencies for known vulnerabilities
    Audit,
    /// Preflight, checks, tests and a summary in one pass
    Iterate,
    /// Print the version
    Version,
}

impl Commands {
    fn label(&self) -> &'static str {
        match self {
            Commands::Preflight => "Preflight",
            Commands::Plan { .. } => "Plan",
            Commands::Check => "Check",
            Commands::Test => "Test hook",
            Commands::Verify => "Verify",
            Commands::Diff => "Diff",
            Commands::Prnotes => "PR Notes",
            Commands::Reflect { .. } => "Reflect",
            Commands::SecretScan => "Secret scan",
            Commands::Audit => "Audit",
            Commands::Iterate => "Iterate",
            Commands::Version => "Version",
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    if let Commands::Version = cli.command {
        println!("{}", VERSION);
        return Ok(true);
    }

    let config = Config::discover(cli.repo_root.as_deref())?;
    let ctx = HookContext::new(config);
    tracing::debug!(
        root = %ctx.config.repo_root.display(),
        log = %ctx.log.path().display(),
        "resolved configuration"
    );

    match cli.command {
        Commands::Preflight => hooks::preflight::run(&ctx),
        Commands::Plan { intent } => hooks::plan::run(&ctx, intent.as_deref()),
        Commands::Check => hooks::check::run(&ctx),
        Commands::Test => hooks::run_tests::run(&ctx),
        Commands::Verify => hooks::verify::run(&ctx),
        Commands::Diff => hooks::diff::run(&ctx),
        Commands::Prnotes => hooks::prnotes::run(&ctx),
        Commands::Reflect { intent } => hooks::reflect::run(&ctx, intent.as_deref()),
        Commands::SecretScan => hooks::secret_scan::run(&ctx),
        Commands::Audit => hooks::audit::run(&ctx),
        Commands::Iterate => hooks::iterate::run(&ctx),
        Commands::Version => Ok(true),
    }
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let label = cli.command.label();
    let passed = match run(cli) {
        Ok(passed) => passed,
        Err(err) => {
            console::error(&format!("{} failed: {:#}", label, err));
            false
        }
    };

    exit_with_status(passed);
}
