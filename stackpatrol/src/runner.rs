//! External command execution.
//!
//! Everything that mutates the host (compose pull/down/up, apt, prune) and
//! every engine query goes through [`run_shell`]. Output is fully captured so
//! child processes never interleave with the run's own logging; failures of
//! any kind are folded into the returned outcome rather than surfacing as
//! errors.

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Result of one external command invocation.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// True iff the process spawned and exited with status zero.
    pub ok: bool,
    /// Captured standard output, lossily decoded.
    pub stdout: String,
    /// Captured standard error on failure, or the spawn error text when the
    /// process could not be started at all. Empty on success.
    pub stderr: String,
}

/// Run `sh -c <command>` with `cwd` as working directory, blocking until it
/// exits. Never returns an error: a command that cannot be spawned (missing
/// working directory, missing shell) yields `ok = false` with the reason in
/// `stderr`.
pub async fn run_shell(command: &str, cwd: &Path) -> CommandOutcome {
    debug!(command, cwd = %cwd.display(), "running command");

    let result = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .output()
        .await;

    match result {
        Ok(output) => CommandOutcome {
            ok: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(err) => CommandOutcome {
            ok: false,
            stdout: String::new(),
            stderr: format!("failed to spawn '{}': {}", command, err),
        },
    }
}
