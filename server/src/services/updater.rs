//! Periodic `git pull` of the content checkout.
//!
//! The first pull waits a little so startup is not competing with it; after
//! that one pull runs per interval. Every command is bounded by a timeout,
//! and a failed pull only produces a log line.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Delay before the first pull.
pub const FIRST_PULL_DELAY: Duration = Duration::from_secs(30);

/// Upper bound on a single command.
pub const COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` timed out after {}s", .timeout.as_secs())]
    TimedOut { program: String, timeout: Duration },
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed { program: String, status: std::process::ExitStatus, stderr: String },
}

/// Run `program args..` in `dir`, returning its trimmed stdout.
///
/// # Errors
///
/// Returns [`CommandError`] if the program cannot start, exceeds `timeout`,
/// or exits unsuccessfully.
pub async fn run_command(dir: &Path, program: &str, args: &[&str], timeout: Duration) -> Result<String, CommandError> {
    let child = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .output();

    let output = tokio::time::timeout(timeout, child)
        .await
        .map_err(|_| CommandError::TimedOut { program: program.to_owned(), timeout })?
        .map_err(|source| CommandError::Spawn { program: program.to_owned(), source })?;

    if !output.status.success() {
        return Err(CommandError::Failed {
            program: program.to_owned(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
}

/// One `git pull` in `root`.
///
/// # Errors
///
/// See [`run_command`].
pub async fn pull(root: &Path) -> Result<String, CommandError> {
    run_command(root, "git", &["pull"], COMMAND_TIMEOUT).await
}

/// Spawn the background updater for `root`.
#[must_use]
pub fn spawn_update_task(root: PathBuf, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(FIRST_PULL_DELAY).await;
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match pull(&root).await {
                Ok(out) if out.is_empty() => debug!(root = %root.display(), "git pull: no output"),
                Ok(out) => info!(root = %root.display(), output = %out, "git pull done"),
                Err(err) => warn!(root = %root.display(), error = %err, "git pull failed"),
            }
        }
    })
}

#[cfg(test)]
#[path = "updater_test.rs"]
mod tests;
