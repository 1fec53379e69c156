// multi-rs: Multi-Repository Workspace Engine
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdin writer task (optional, closes pipe when done)
//!   stdout/stderr reader tasks (read to EOF)
//!   wait + drain, all under the timeout; on expiry kill and abort the tasks
//!   --> ProcessOutput { exit_code, stdout, stderr }
//! ```
//!
//! All three pipes are serviced concurrently, so a child that fills its
//! stdout before draining stdin cannot deadlock the parent.

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Child;
use tokio::task::JoinHandle;
use tracing::{trace, warn};

use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::{MultiResult, ProcessError};

type ReaderHandle = JoinHandle<std::io::Result<Vec<u8>>>;

fn spawn_reader<R>(reader: Option<R>) -> Option<ReaderHandle>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    reader.map(|mut reader| {
        tokio::spawn(async move {
            let mut buf = Vec::new();
            reader.read_to_end(&mut buf).await?;
            Ok(buf)
        })
    })
}

/// Awaits a reader task and applies the stream flags to its bytes.
async fn finish_reader(
    handle: Option<&mut ReaderHandle>,
    flags: StreamFlags,
    process_name: &str,
    stream_name: &str,
) -> String {
    let Some(handle) = handle else {
        return String::new();
    };
    let bytes = match handle.await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            warn!(process = %process_name, stream = %stream_name, error = %e, "error reading stream");
            return String::new();
        }
        Err(e) => {
            warn!(process = %process_name, stream = %stream_name, error = %e, "reader task failed");
            return String::new();
        }
    };

    let text = String::from_utf8_lossy(&bytes).into_owned();
    if flags.contains(StreamFlags::FORWARD_TO_LOG) {
        for line in text.lines() {
            trace!(process = %process_name, stream = %stream_name, line = %line, "output");
        }
    }
    if flags.contains(StreamFlags::KEEP_IN_STRING) {
        text
    } else {
        String::new()
    }
}

/// Tasks servicing the child's pipes.
struct Pipes {
    stdin: Option<JoinHandle<std::io::Result<()>>>,
    stdout: Option<ReaderHandle>,
    stderr: Option<ReaderHandle>,
}

impl Pipes {
    fn abort(&self) {
        if let Some(handle) = &self.stdin {
            handle.abort();
        }
        for handle in [&self.stdout, &self.stderr].into_iter().flatten() {
            handle.abort();
        }
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O and waiting for completion.
    ///
    /// The timeout covers draining the pipes as well as the exit, so a
    /// grandchild that inherited stdout cannot hold the caller.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
        stdin: Option<Vec<u8>>,
    ) -> MultiResult<ProcessOutput> {
        let stdin = match (stdin, child.stdin.take()) {
            (Some(content), Some(mut pipe)) => Some(tokio::spawn(async move {
                pipe.write_all(&content).await?;
                pipe.shutdown().await
            })),
            _ => None,
        };
        let mut pipes = Pipes {
            stdin,
            stdout: spawn_reader(child.stdout.take()),
            stderr: spawn_reader(child.stderr.take()),
        };

        let Some(limit) = self.timeout else {
            return self.complete(name, cmd_line, child, &mut pipes).await;
        };
        let outcome =
            tokio::time::timeout(limit, self.complete(name, cmd_line, child, &mut pipes)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                warn!(process = %name, timeout = ?limit, "process timed out");
                child.kill().await.ok();
                pipes.abort();
                Err(ProcessError::Timeout {
                    command: cmd_line.to_string(),
                    timeout_secs: timeout_secs(limit),
                }
                .into())
            }
        }
    }

    /// Waits for the exit, the stdin writer and both readers.
    async fn complete(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
        pipes: &mut Pipes,
    ) -> MultiResult<ProcessOutput> {
        let exit_status = child
            .wait()
            .await
            .map_err(|e| ProcessError::OutputError {
                command: cmd_line.to_string(),
                message: e.to_string(),
            })?;

        if let Some(handle) = pipes.stdin.as_mut() {
            match handle.await {
                Ok(Ok(())) => {}
                // The child may exit without reading all of stdin.
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => {
                    return Err(ProcessError::OutputError {
                        command: cmd_line.to_string(),
                        message: format!("failed to write stdin: {e}"),
                    }
                    .into());
                }
                Err(e) => warn!(process = %name, error = %e, "stdin task failed"),
            }
        }

        let stdout = finish_reader(pipes.stdout.as_mut(), self.stdout, name, "stdout").await;
        let stderr = finish_reader(pipes.stderr.as_mut(), self.stderr, name, "stderr").await;

        Ok(ProcessOutput::new(
            exit_status.code().unwrap_or(-1),
            stdout,
            stderr,
        ))
    }
}

fn timeout_secs(limit: Duration) -> u64 {
    limit.as_secs().max(u64::from(limit.subsec_nanos() > 0))
}
