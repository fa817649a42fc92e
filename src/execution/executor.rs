//! Command execution engine.

use std::time::{Duration, Instant};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tracing::{debug, error, warn};

use super::command::{ExecutionLimits, ShellCommand};
use super::result::ExecutionResult;
use crate::error::ShellGateError;
use crate::output::{merge_streams, truncate_output};
use crate::security::ApprovedCommand;
use crate::Result;

/// Default execution timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default output budget in characters.
pub const DEFAULT_MAX_OUTPUT_LENGTH: usize = 4096;

/// Raw bytes captured from a finished process.
#[derive(Debug, Default)]
struct Captured {
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// How a single run ended.
#[derive(Debug)]
enum RunOutcome {
    Completed(Captured),
    TimedOut,
}

/// Runs approved commands under fixed limits.
///
/// The executor holds no mutable state; one instance serves any number of
/// concurrent invocations.
#[derive(Debug, Clone, Default)]
pub struct CommandExecutor {
    limits: ExecutionLimits,
}

impl CommandExecutor {
    /// Create an executor with the given limits.
    pub fn new(limits: ExecutionLimits) -> Self {
        Self { limits }
    }

    /// The limits applied to every execution.
    pub fn limits(&self) -> ExecutionLimits {
        self.limits
    }

    /// Execute a command and render its outcome.
    ///
    /// Never returns an error: spawn and I/O failures become
    /// [`ExecutionResult::Failed`].
    pub async fn execute(&self, command: &ApprovedCommand) -> ExecutionResult {
        let start = Instant::now();

        match self.run(command).await {
            Ok(RunOutcome::Completed(captured)) => {
                debug!(
                    stdout_bytes = captured.stdout.len(),
                    stderr_bytes = captured.stderr.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "command finished"
                );
                let merged = merge_streams(&captured.stdout, &captured.stderr);
                ExecutionResult::Output(truncate_output(merged, self.limits.max_output_length))
            }
            Ok(RunOutcome::TimedOut) => {
                warn!(
                    timeout_secs = self.limits.timeout.as_secs(),
                    command = %command.base_command(),
                    "command timed out and was killed"
                );
                ExecutionResult::TimedOut(self.limits.timeout)
            }
            Err(e) => {
                error!(command = %command.base_command(), "command failed: {}", e);
                ExecutionResult::Failed(failure_details(&e))
            }
        }
    }

    /// Spawn the process and race its completion against the deadline.
    async fn run(&self, command: &ApprovedCommand) -> Result<RunOutcome> {
        let mut child = ShellCommand::new(command)
            .spawn()
            .map_err(ShellGateError::Spawn)?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let drained = tokio::time::timeout(self.limits.timeout, async {
            tokio::try_join!(read_stream(stdout), read_stream(stderr), child.wait())
        })
        .await;

        match drained {
            Ok(Ok((stdout, stderr, status))) => {
                debug!(?status, "process exited");
                Ok(RunOutcome::Completed(Captured { stdout, stderr }))
            }
            Ok(Err(e)) => {
                terminate(&mut child).await;
                Err(ShellGateError::Io(e))
            }
            Err(_elapsed) => {
                terminate(&mut child).await;
                Ok(RunOutcome::TimedOut)
            }
        }
    }
}

/// Read a captured pipe to EOF. A missing pipe reads as empty.
async fn read_stream<R>(stream: Option<R>) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    if let Some(mut stream) = stream {
        stream.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Kill the child and wait until it has been reaped.
async fn terminate(child: &mut Child) {
    #[cfg(unix)]
    kill_process_group(child);

    if let Err(e) = child.kill().await {
        // kill() fails if the process already exited; still reap it.
        debug!("kill failed: {}", e);
        if let Err(e) = child.wait().await {
            warn!("failed to reap child process: {}", e);
        }
    }
}

/// SIGKILL every process in the child's group.
#[cfg(unix)]
fn kill_process_group(child: &Child) {
    let Some(pid) = child.id() else {
        return;
    };
    // SAFETY: killpg only sends a signal; the group was created for this child.
    if unsafe { libc::killpg(pid as libc::pid_t, libc::SIGKILL) } == -1 {
        debug!(
            pid,
            "killpg failed: {}",
            std::io::Error::last_os_error()
        );
    }
}

/// The detail text for a failed execution: the underlying cause only.
fn failure_details(err: &ShellGateError) -> String {
    match err {
        ShellGateError::Spawn(e) | ShellGateError::Io(e) => e.to_string(),
        other => other.to_string(),
    }
}
