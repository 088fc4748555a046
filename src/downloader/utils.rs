// Subprocess helpers shared by engine implementations

use std::io;
use std::process::{ExitStatus, Output, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::{timeout, Duration};

use crate::downloader::errors::DownloadError;

fn spawn_error(program: &str, e: io::Error) -> DownloadError {
    if e.kind() == io::ErrorKind::NotFound {
        DownloadError::ToolNotFound(format!("{}: {}", program, e))
    } else {
        DownloadError::ExecutionError(format!("Failed to start {}: {}", program, e))
    }
}

/// Run a command to completion, capturing stdout and stderr.
/// With `timeout_secs` set, the child is killed once the deadline passes.
pub async fn run_output_with_timeout(
    program: &str,
    args: &[String],
    timeout_secs: Option<u64>,
) -> Result<Output, DownloadError> {
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(program, e))?;

    let mut stdout_pipe = child.stdout.take().ok_or_else(|| {
        DownloadError::ExecutionError(format!("Failed to capture stdout from {}", program))
    })?;
    let mut stderr_pipe = child.stderr.take().ok_or_else(|| {
        DownloadError::ExecutionError(format!("Failed to capture stderr from {}", program))
    })?;

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stdout_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    let status = match timeout_secs {
        Some(secs) => match timeout(Duration::from_secs(secs), child.wait()).await {
            Ok(status) => status,
            Err(_) => {
                let _ = child.kill().await;
                stdout_task.abort();
                stderr_task.abort();
                return Err(DownloadError::NetworkTimeout(format!(
                    "{} timed out after {}s",
                    program, secs
                )));
            }
        },
        None => child.wait().await,
    }
    .map_err(|e| DownloadError::ExecutionError(format!("Failed to wait for {}: {}", program, e)))?;

    let stdout = join_pipe(stdout_task, "stdout").await?;
    let stderr = join_pipe(stderr_task, "stderr").await?;

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}

async fn join_pipe(
    task: tokio::task::JoinHandle<io::Result<Vec<u8>>>,
    name: &str,
) -> Result<Vec<u8>, DownloadError> {
    task.await
        .map_err(|e| DownloadError::ExecutionError(format!("{} task failed: {}", name, e)))?
        .map_err(|e| DownloadError::ExecutionError(format!("Failed to read {}: {}", name, e)))
}

/// Run a command, handing each stdout line to `on_line` as it arrives.
/// Returns the exit status and everything written to stderr.
pub async fn run_streaming<F>(
    program: &str,
    args: &[String],
    mut on_line: F,
) -> Result<(ExitStatus, String), DownloadError>
where
    F: FnMut(&str) + Send,
{
    let mut child = TokioCommand::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| spawn_error(program, e))?;

    let stdout = child.stdout.take().ok_or_else(|| {
        DownloadError::ExecutionError(format!("Failed to capture stdout from {}", program))
    })?;
    let mut stderr_pipe = child.stderr.take().ok_or_else(|| {
        DownloadError::ExecutionError(format!("Failed to capture stderr from {}", program))
    })?;

    // Drained concurrently so a chatty stderr cannot block the child
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        stderr_pipe.read_to_end(&mut buf).await.map(|_| buf)
    });

    // Lines are decoded lossily: file names in yt-dlp output need not be UTF-8
    let mut reader = BufReader::new(stdout);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                on_line(line.trim_end_matches(['\n', '\r']));
            }
            Err(e) => {
                let _ = child.kill().await;
                stderr_task.abort();
                return Err(DownloadError::ExecutionError(format!(
                    "Failed to read stdout from {}: {}",
                    program, e
                )));
            }
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| DownloadError::ExecutionError(format!("Failed to wait for {}: {}", program, e)))?;
    let stderr = join_pipe(stderr_task, "stderr").await?;

    Ok((status, String::from_utf8_lossy(&stderr).into_owned()))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[tokio::test]
    async fn captures_both_streams() {
        let out = run_output_with_timeout("sh", &sh("echo out; echo err >&2"), Some(5))
            .await
            .unwrap();
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "out\n");
        assert_eq!(String::from_utf8_lossy(&out.stderr), "err\n");
    }

    #[tokio::test]
    async fn kills_after_timeout() {
        let err = run_output_with_timeout("sh", &sh("sleep 5"), Some(1))
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::NetworkTimeout(_)));
    }

    #[tokio::test]
    async fn missing_program_is_tool_not_found() {
        let err = run_output_with_timeout("definitely-not-a-real-binary-7f3a", &[], None)
            .await
            .unwrap_err();
        assert!(matches!(err, DownloadError::ToolNotFound(_)));
    }

    #[tokio::test]
    async fn streams_lines_in_order() {
        let mut seen = Vec::new();
        let (status, stderr) = run_streaming("sh", &sh("printf 'a\\nb\\n'; echo oops >&2; exit 3"), |line| {
            seen.push(line.to_string())
        })
        .await
        .unwrap();

        assert_eq!(seen, vec!["a", "b"]);
        assert_eq!(status.code(), Some(3));
        assert_eq!(stderr, "oops\n");
    }

    #[tokio::test]
    async fn non_utf8_output_is_decoded_lossily() {
        let mut seen = Vec::new();
        let (status, _) = run_streaming(
            "sh",
            &sh("printf '[download] Destination: caf\\351.mp4\\nlast'; exit 0"),
            |line| seen.push(line.to_string()),
        )
        .await
        .unwrap();

        assert!(status.success());
        assert_eq!(seen, vec!["[download] Destination: caf\u{FFFD}.mp4", "last"]);
    }
}
