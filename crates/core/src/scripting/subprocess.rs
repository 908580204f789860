//! Shared subprocess management.
//!
//! Provides [`run_command`], the spawn + capture + timeout logic used by
//! every executor. Each executor builds a [`tokio::process::Command`] for
//! its runtime and delegates here.

use std::process::Stdio;
use std::time::Instant;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

use super::executor::{ScriptError, ScriptInput, ScriptOutput};

/// Maximum stdout or stderr size captured per stream (10 MiB).
///
/// Bytes past this limit are read and discarded so the child never blocks
/// on a full pipe.
const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024;

/// Spawn `cmd` with the input's arguments, capture stdout/stderr, and
/// enforce the input's timeout.
///
/// The child is spawned with `kill_on_drop(true)`: if the returned future
/// is dropped (client went away) or the timeout fires, the process is
/// killed rather than left running.
pub async fn run_command(
    cmd: &mut Command,
    input: ScriptInput,
) -> Result<ScriptOutput, ScriptError> {
    cmd.args(&input.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    if let Some(dir) = &input.working_directory {
        cmd.current_dir(dir);
    }

    let start = Instant::now();

    let mut child = cmd.spawn().map_err(|e| {
        tracing::error!(error = %e, "Failed to spawn script process");
        ScriptError::Spawn(e)
    })?;

    tracing::debug!(pid = child.id(), "Script process spawned");

    // Each stream is drained by its own task so `child.wait()` can borrow
    // the child mutably at the same time. The timeout covers the reads too:
    // a background process that inherited stdout must not hold the request.
    let mut stdout_task = tokio::spawn(read_stream(child.stdout.take()));
    let mut stderr_task = tokio::spawn(read_stream(child.stderr.take()));

    let wait_result = tokio::time::timeout(input.timeout, async {
        let (status, stdout, stderr) =
            tokio::join!(child.wait(), &mut stdout_task, &mut stderr_task);
        (status, stdout.unwrap_or_default(), stderr.unwrap_or_default())
    })
    .await;

    match wait_result {
        Ok((Ok(status), stdout_bytes, stderr_bytes)) => {
            let duration_ms = start.elapsed().as_millis() as u64;

            Ok(ScriptOutput {
                stdout: String::from_utf8_lossy(&stdout_bytes).into_owned(),
                stderr: String::from_utf8_lossy(&stderr_bytes).into_owned(),
                exit_code: status.code(),
                duration_ms,
            })
        }
        Ok((Err(e), _, _)) => Err(ScriptError::Io(e)),
        Err(_elapsed) => {
            let elapsed_ms = start.elapsed().as_millis() as u64;
            stdout_task.abort();
            stderr_task.abort();
            if let Err(e) = child.start_kill() {
                tracing::warn!(error = %e, "Failed to kill timed-out script process");
            }
            tracing::error!(elapsed_ms, "Script process timed out");
            Err(ScriptError::Timeout { elapsed_ms })
        }
    }
}

/// Read an entire output stream, keeping at most [`MAX_OUTPUT_BYTES`].
async fn read_stream<R: AsyncRead + Unpin>(handle: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut h) = handle {
        let _ = (&mut h)
            .take(MAX_OUTPUT_BYTES as u64)
            .read_to_end(&mut buf)
            .await;
        let _ = tokio::io::copy(&mut h, &mut tokio::io::sink()).await;
    }
    buf
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script).arg("stub");
        cmd
    }

    #[tokio::test]
    async fn captures_streams_separately() {
        let mut cmd = sh("printf out; printf err >&2");
        let output = run_command(&mut cmd, ScriptInput::new(vec![], Duration::from_secs(5)))
            .await
            .expect("run");
        assert_eq!(output.stdout, "out");
        assert_eq!(output.stderr, "err");
        assert_eq!(output.exit_code, Some(0));
    }

    #[tokio::test]
    async fn passes_arguments_in_order() {
        let mut cmd = sh(r#"printf '%s|%s' "$1" "$2""#);
        let input = ScriptInput::new(
            vec!["generate_titles".to_string(), "rust async".to_string()],
            Duration::from_secs(5),
        );
        let output = run_command(&mut cmd, input).await.expect("run");
        assert_eq!(output.stdout, "generate_titles|rust async");
    }

    #[tokio::test]
    async fn reports_nonzero_exit_code() {
        let mut cmd = sh("exit 3");
        let output = run_command(&mut cmd, ScriptInput::new(vec![], Duration::from_secs(5)))
            .await
            .expect("run");
        assert_eq!(output.exit_code, Some(3));
        assert!(!output.success());
    }

    #[tokio::test]
    async fn times_out_long_running_process() {
        let mut cmd = sh("exec sleep 30");
        let started = Instant::now();
        let result = run_command(
            &mut cmd,
            ScriptInput::new(vec![], Duration::from_millis(200)),
        )
        .await;
        assert_matches!(result, Err(ScriptError::Timeout { .. }));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn background_child_holding_stdout_times_out() {
        let mut cmd = sh("sleep 6 & printf '{\"ok\":1}'");
        let started = Instant::now();
        let result = run_command(
            &mut cmd,
            ScriptInput::new(vec![], Duration::from_secs(1)),
        )
        .await;
        assert_matches!(result, Err(ScriptError::Timeout { .. }));
        assert!(
            started.elapsed() < Duration::from_secs(4),
            "took {:?}",
            started.elapsed()
        );
    }

    #[tokio::test]
    async fn missing_program_is_spawn_error() {
        let mut cmd = Command::new("/nonexistent/relay-test-program");
        let result =
            run_command(&mut cmd, ScriptInput::new(vec![], Duration::from_secs(5))).await;
        assert_matches!(result, Err(ScriptError::Spawn(_)));
    }
}
