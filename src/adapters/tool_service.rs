//! Runs ToolServiceCmd as a child process.
//!
//! stdin is written while stdout and stderr are drained, all three joined on
//! the same task, so a chatty helper can never block on a full pipe.

use crate::core::{Invocation, ReportSource, ToolOutput};
use crate::utils::error::{Result, RunnerError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::process::{Child, Command};

#[derive(Debug, Clone, Default)]
pub struct ToolServiceCmd {
    timeout: Option<Duration>,
}

impl ToolServiceCmd {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    fn command(invocation: &Invocation) -> Command {
        let mut command = match &invocation.launcher {
            Some(launcher) => {
                let mut command = Command::new(launcher);
                command.arg(&invocation.helper);
                command
            }
            None => Command::new(&invocation.helper),
        };
        command
            .args(&invocation.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl ReportSource for ToolServiceCmd {
    async fn execute(&self, invocation: &Invocation, stdin: &[u8]) -> Result<ToolOutput> {
        let mut child = Self::command(invocation)
            .spawn()
            .map_err(|source| RunnerError::SpawnError {
                program: invocation.program(),
                source,
            })?;
        tracing::debug!(pid = ?child.id(), "Spawned {}", invocation.program());

        match self.timeout {
            None => communicate(&mut child, stdin).await,
            Some(limit) => {
                let finished = tokio::time::timeout(limit, communicate(&mut child, stdin)).await;
                match finished {
                    Ok(output) => output,
                    Err(_) => {
                        tracing::warn!("Helper still running after {:?}, killing it", limit);
                        if let Err(e) = child.kill().await {
                            tracing::warn!("Failed to kill helper: {}", e);
                        }
                        Err(RunnerError::TimeoutError {
                            seconds: limit.as_secs(),
                        })
                    }
                }
            }
        }
    }
}

async fn communicate(child: &mut Child, input: &[u8]) -> Result<ToolOutput> {
    let (written, stdout, stderr) = tokio::join!(
        write_input(child.stdin.take(), input),
        read_pipe(child.stdout.take()),
        read_pipe(child.stderr.take()),
    );
    written?;
    let stdout = stdout?;
    let stderr = stderr?;
    let status = child.wait().await?;

    Ok(ToolOutput {
        stdout,
        stderr,
        exit_code: status.code(),
    })
}

/// Writes `input` and closes the pipe. A helper that exits without reading
/// its input is not an error.
async fn write_input<W: AsyncWrite + Unpin>(pipe: Option<W>, input: &[u8]) -> std::io::Result<()> {
    let Some(mut pipe) = pipe else {
        return Ok(());
    };

    let result: std::io::Result<()> = async {
        pipe.write_all(input).await?;
        pipe.shutdown().await
    }
    .await;
    drop(pipe);

    match result {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            tracing::debug!("Helper closed stdin early");
            Ok(())
        }
        other => other,
    }
}

async fn read_pipe<R: AsyncRead + Unpin>(pipe: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buffer).await?;
    }
    Ok(buffer)
}
