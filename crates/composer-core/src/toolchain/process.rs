//! Child process execution with streamed output and a timeout

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Dependency installs can be slow on a cold cache
const RUN_TIMEOUT: Duration = Duration::from_secs(600);

/// Run `program args..` in `dir`, echoing stdout and stderr line by line
pub async fn run_streamed(program: &str, args: &[&str], dir: &Path) -> Result<()> {
    let cmd = format!("{} {}", program, args.join(" "));
    println!();
    println!("{} {}", "Running:".dimmed(), cmd.yellow());
    println!();

    let mut child = TokioCommand::new(program)
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to start `{}`", cmd))?;

    let stdout = child.stdout.take().context("Failed to capture stdout")?;
    let stderr = child.stderr.take().context("Failed to capture stderr")?;

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    let output_task = async {
        let mut stderr_open = true;
        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => break,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            break;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }
    };

    if timeout(RUN_TIMEOUT, output_task).await.is_err() {
        let _ = child.kill().await;
        println!();
        anyhow::bail!(
            "`{}` timed out after {} seconds.\nPlease run it manually.",
            cmd,
            RUN_TIMEOUT.as_secs()
        );
    }

    match timeout(Duration::from_secs(5), child.wait()).await {
        Ok(Ok(status)) => {
            println!();
            if status.success() {
                tracing::debug!(command = %cmd, "command finished");
                Ok(())
            } else {
                anyhow::bail!(
                    "`{}` failed with exit code: {}",
                    cmd,
                    status.code().unwrap_or(-1)
                );
            }
        }
        Ok(Err(e)) => {
            anyhow::bail!("Failed to wait for `{}`: {}", cmd, e);
        }
        Err(_) => {
            let _ = child.kill().await;
            anyhow::bail!("`{}` hung. Please run it manually.", cmd);
        }
    }
}
