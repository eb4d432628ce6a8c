use crate::record::CommandResult;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const TEST_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Per-call overrides for [`CommandExecutor::run_with`].
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    pub working_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
}

impl ExecOptions {
    pub fn timeout(timeout: Duration) -> Self {
        Self {
            working_dir: None,
            timeout: Some(timeout),
        }
    }
}

/// Runs command lines through `sh -c` with a deadline.
///
/// Failures never surface as errors: a command that cannot be spawned, exits
/// non-zero or outlives its timeout all come back as a [`CommandResult`] with
/// `success == false`.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    working_dir: PathBuf,
    default_timeout: Duration,
}

impl CommandExecutor {
    pub fn new(working_dir: impl Into<PathBuf>, default_timeout: Duration) -> Self {
        Self {
            working_dir: working_dir.into(),
            default_timeout,
        }
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn run(&self, command: &str) -> CommandResult {
        self.run_with(command, &ExecOptions::default())
    }

    pub fn run_with(&self, command: &str, options: &ExecOptions) -> CommandResult {
        let cwd = options.working_dir.as_deref().unwrap_or(&self.working_dir);
        let timeout = options.timeout.unwrap_or(self.default_timeout);
        let start_time = Instant::now();

        debug!(command, cwd = %cwd.display(), timeout_ms = timeout.as_millis() as u64, "running command");

        let mut builder = Command::new("sh");
        builder
            .arg("-c")
            .arg(command)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group, so a timeout can take down `sh` and everything it started.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            builder.process_group(0);
        }

        let mut child = match builder.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(command, error = %err, "failed to spawn command");
                return CommandResult::spawn_failure(format!(
                    "failed to spawn `{}`: {}",
                    command, err
                ));
            }
        };

        let stdout_buf = Arc::new(Mutex::new(Vec::new()));
        let stderr_buf = Arc::new(Mutex::new(Vec::new()));
        let stdout_handle = child
            .stdout
            .take()
            .map(|pipe| spawn_reader(pipe, Arc::clone(&stdout_buf)));
        let stderr_handle = child
            .stderr
            .take()
            .map(|pipe| spawn_reader(pipe, Arc::clone(&stderr_buf)));

        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break Some(status),
                Ok(None) => {
                    if start_time.elapsed() >= timeout {
                        warn!(
                            command,
                            timeout_ms = timeout.as_millis() as u64,
                            "command timed out, killing process group"
                        );
                        kill_process_tree(&mut child);
                        break None;
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(err) => {
                    warn!(command, error = %err, "failed to poll command");
                    kill_process_tree(&mut child);
                    break None;
                }
            }
        };

        // On a clean exit the pipes reach EOF, so the readers can be joined.
        // After a kill, a stray grandchild could still hold a pipe open; take
        // whatever has been read so far and leave the readers detached.
        if status.is_some() {
            for handle in [stdout_handle, stderr_handle].into_iter().flatten() {
                let _ = handle.join();
            }
        }

        let stdout = drain(&stdout_buf);
        let stderr = drain(&stderr_buf);
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        match status {
            Some(status) => {
                debug!(command, exit_code = ?status.code(), elapsed_ms, "command finished");
                CommandResult {
                    success: status.success(),
                    stdout,
                    stderr,
                    exit_code: status.code(),
                    timed_out: false,
                }
            }
            None => CommandResult {
                success: false,
                stdout,
                stderr,
                exit_code: None,
                timed_out: start_time.elapsed() >= timeout,
            },
        }
    }
}

fn spawn_reader<R>(mut reader: R, sink: Arc<Mutex<Vec<u8>>>) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buffer = [0u8; 4096];
        loop {
            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) | Err(_) => break,
                Ok(n) => n,
            };
            if let Ok(mut collected) = sink.lock() {
                collected.extend_from_slice(&buffer[..bytes_read]);
            }
        }
    })
}

fn drain(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
    buffer
        .lock()
        .map(|bytes| String::from_utf8_lossy(&bytes).to_string())
        .unwrap_or_default()
}

fn kill_process_tree(child: &mut Child) {
    #[cfg(unix)]
    {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;
        let _ = killpg(Pid::from_raw(child.id() as i32), Signal::SIGKILL);
    }
    let _ = child.kill();
    let _ = child.wait();
}

/// True if `name` resolves to an executable on `PATH`.
pub fn command_is_available(name: &str) -> bool {
    which::which(name).is_ok()
}
