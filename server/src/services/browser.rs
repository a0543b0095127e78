//! Open the reader's browser at startup.

use std::process::Stdio;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Launch the platform's URL opener on `url`. The returned task reaps the
/// opener when it exits.
///
/// # Errors
///
/// Returns the spawn error if the opener is not available.
pub fn open_browser(url: &str) -> std::io::Result<JoinHandle<()>> {
    let mut child = opener_command(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    Ok(tokio::spawn(async move {
        match child.wait().await {
            Ok(status) if status.success() => debug!("browser opener finished"),
            Ok(status) => warn!(%status, "browser opener failed"),
            Err(err) => warn!(error = %err, "browser opener wait failed"),
        }
    }))
}

fn opener_command(url: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/c", "start", "", url]);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}
