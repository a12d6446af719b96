//! Probe command execution.
//!
//! Runs external probe programs (pkg-config, *-config scripts, the C
//! compiler) with a per-command timeout and bounded output capture. Probes
//! run one at a time; the runner never executes through a shell, and the
//! child environment is scrubbed down to `PATH` and a C locale so probe
//! output stays parseable.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Default timeout per probe command.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum bytes captured per stream; probe output beyond this is discarded.
pub const MAX_OUTPUT_BYTES: usize = 1024 * 1024;

/// Grace period between SIGTERM and SIGKILL.
#[cfg(unix)]
const SIGTERM_GRACE_MS: u64 = 500;

/// Errors that can occur when executing a probe command.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("command failed to spawn: {0}")]
    Spawn(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured result of one probe command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output (may be truncated).
    pub stdout: Vec<u8>,

    /// Standard error (may be truncated).
    pub stderr: Vec<u8>,

    /// Exit code, if the process exited normally.
    pub exit_code: Option<i32>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command hit the timeout and was killed.
    pub timed_out: bool,
}

impl CommandOutput {
    /// Get stdout as string (lossy UTF-8 conversion).
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }

    /// Get stderr as string (lossy UTF-8 conversion).
    pub fn stderr_str(&self) -> String {
        String::from_utf8_lossy(&self.stderr).to_string()
    }

    /// Check if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Sequential probe command runner.
#[derive(Debug, Clone)]
pub struct ProbeRunner {
    timeout: Duration,
    max_output: usize,
}

impl Default for ProbeRunner {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_output: MAX_OUTPUT_BYTES,
        }
    }
}

impl ProbeRunner {
    /// Create a runner with a custom timeout.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }

    /// Run `program` with `args`, blocking until it exits or times out.
    pub fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, RunError> {
        debug!(program, ?args, timeout_ms = self.timeout.as_millis() as u64, "running probe command");

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .env_clear();

        if let Ok(path) = std::env::var("PATH") {
            command.env("PATH", path);
        }
        command.env("LC_ALL", "C");
        command.env("LANG", "C");

        let start = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            trace!(program, error = %e, "spawn failed");
            RunError::Spawn(e.to_string())
        })?;

        // Readers drain both pipes to EOF so the child never blocks on a
        // full pipe, keeping at most max_output bytes each.
        let stdout_reader = spawn_capped_reader(child.stdout.take(), self.max_output);
        let stderr_reader = spawn_capped_reader(child.stderr.take(), self.max_output);

        let deadline = start + self.timeout;
        let mut timed_out = false;

        let status = loop {
            match child.try_wait()? {
                Some(status) => break Some(status),
                None => {
                    if Instant::now() >= deadline {
                        timed_out = true;
                        warn!(program, "probe command timed out, killing");
                        kill_with_grace(&mut child);
                        break child.try_wait()?;
                    }
                    thread::sleep(Duration::from_millis(10));
                }
            }
        };

        let status = match status {
            Some(status) => status,
            None => child.wait()?,
        };

        let stdout = stdout_reader
            .map(|h| h.join().unwrap_or_default())
            .unwrap_or_default();
        let stderr = stderr_reader
            .map(|h| h.join().unwrap_or_default())
            .unwrap_or_default();

        let duration = start.elapsed();
        trace!(program, exit_code = ?status.code(), timed_out, duration_ms = duration.as_millis() as u64, "probe command finished");

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code: status.code(),
            duration,
            timed_out,
        })
    }
}

/// Spawn a thread that reads a stream to EOF, keeping at most `cap` bytes.
fn spawn_capped_reader<R: Read + Send + 'static>(
    stream: Option<R>,
    cap: usize,
) -> Option<thread::JoinHandle<Vec<u8>>> {
    let mut stream = stream?;
    Some(thread::spawn(move || {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    let space = cap.saturating_sub(buf.len());
                    buf.extend_from_slice(&chunk[..n.min(space)]);
                }
                Err(_) => break,
            }
        }
        buf
    }))
}

/// Kill a process with SIGTERM, then SIGKILL after the grace period.
#[cfg(unix)]
fn kill_with_grace(child: &mut Child) {
    let pid = child.id() as i32;

    unsafe {
        libc::kill(pid, libc::SIGTERM);
    }

    thread::sleep(Duration::from_millis(SIGTERM_GRACE_MS));

    if let Ok(None) = child.try_wait() {
        warn!(pid, "process did not exit after SIGTERM, sending SIGKILL");
        unsafe {
            libc::kill(pid, libc::SIGKILL);
        }
        let _ = child.wait();
    }
}

#[cfg(not(unix))]
fn kill_with_grace(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}
