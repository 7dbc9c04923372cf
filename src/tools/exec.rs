use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncReadExt;

use super::traits::ToolResult;
use crate::security::sanitize;

/// Maximum command execution time before kill.
pub const COMMAND_TIMEOUT_SECS: u64 = 30;
/// Maximum captured output per stream (1 MiB).
pub const MAX_OUTPUT_BYTES: usize = 1_048_576;
/// Environment variables safe to pass to subprocesses.
/// Only functional variables are included — never API keys or secrets.
const SAFE_ENV_VARS: &[&str] = &[
    "PATH", "HOME", "TERM", "LANG", "LC_ALL", "LC_CTYPE", "USER", "SHELL",
];

enum CaptureError {
    Overflow,
    Io(std::io::Error),
}

async fn read_capped<R>(stream: Option<R>) -> Result<Vec<u8>, CaptureError>
where
    R: tokio::io::AsyncRead + Unpin,
{
    let Some(mut stream) = stream else {
        return Ok(Vec::new());
    };
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    loop {
        let n = stream.read(&mut chunk).await.map_err(CaptureError::Io)?;
        if n == 0 {
            return Ok(buf);
        }
        if buf.len() + n > MAX_OUTPUT_BYTES {
            return Err(CaptureError::Overflow);
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

/// Run a command line through `sh -c` in the workspace with a scrubbed
/// environment, a wall-clock timeout and an output ceiling.
///
/// Exceeding either bound kills the child and yields a failed result; the
/// child is never left running detached (`kill_on_drop` backstops the
/// explicit kill). Captured output is sanitized before it leaves this
/// function.
pub(crate) async fn run_bounded(command_line: &str, workspace: &Path) -> ToolResult {
    run_bounded_with_timeout(
        command_line,
        workspace,
        Duration::from_secs(COMMAND_TIMEOUT_SECS),
    )
    .await
}

/// Timeout-injected variant so tests exercise the kill path without waiting
/// out the production bound.
async fn run_bounded_with_timeout(
    command_line: &str,
    workspace: &Path,
    timeout: Duration,
) -> ToolResult {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c")
        .arg(command_line)
        .current_dir(workspace)
        .env_clear()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    for var in SAFE_ENV_VARS {
        if let Ok(val) = std::env::var(var) {
            cmd.env(var, val);
        }
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => return ToolResult::failed(format!("Failed to spawn command: {e}")),
    };

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    // Both streams are drained concurrently so neither pipe can fill up and
    // stall the child.
    let capture = async {
        let (out, err) = tokio::try_join!(read_capped(stdout), read_capped(stderr))?;
        let status = child.wait().await.map_err(CaptureError::Io)?;
        Ok::<_, CaptureError>((status, out, err))
    };

    let outcome = tokio::time::timeout(timeout, capture).await;

    match outcome {
        Ok(Ok((status, out, err))) => {
            let stdout_text = sanitize(&String::from_utf8_lossy(&out));
            let stderr_text = sanitize(&String::from_utf8_lossy(&err));
            ToolResult {
                success: status.success(),
                output: stdout_text,
                error: (!stderr_text.is_empty()).then_some(stderr_text),
            }
        }
        Ok(Err(CaptureError::Overflow)) => {
            let _ = child.kill().await;
            ToolResult::failed(format!(
                "Command output exceeded {MAX_OUTPUT_BYTES} bytes and the process was killed"
            ))
        }
        Ok(Err(CaptureError::Io(e))) => {
            let _ = child.kill().await;
            ToolResult::failed(format!("Failed to capture command output: {e}"))
        }
        Err(_) => {
            let _ = child.kill().await;
            ToolResult::failed(format!(
                "Command timed out after {timeout:?} and was killed"
            ))
        }
    }
}
