//! Mailbox synchronization as a detached background command.

use anyhow::{Context, Result};
use std::process::{Child, Command, Stdio};
use std::thread;

const DEFAULT_SHELL: &str = "/bin/sh";

/// A shell pipeline run fire-and-forget (e.g. `mbsync -a && notmuch new`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncCommand {
    shell: String,
    command: String,
}

impl SyncCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self::with_shell(DEFAULT_SHELL, command)
    }

    pub fn with_shell(shell: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Spawn the pipeline without waiting for it.
    ///
    /// Output is discarded. A reaper thread collects the exit status so no
    /// zombie is left behind; nothing observes it besides the debug log.
    pub fn launch(&self) -> Result<()> {
        #[allow(clippy::disallowed_methods)]
        let child = Command::new(&self.shell)
            .arg("-c")
            .arg(&self.command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to launch sync command: {}", self.command))?;

        tracing::info!(pid = child.id(), command = %self.command, "Sync started");
        reap_in_background(child);
        Ok(())
    }

    /// Launch, downgrading any failure to a warning.
    pub fn trigger(&self) {
        if let Err(e) = self.launch() {
            tracing::warn!("Sync failed to start: {:#}", e);
        }
    }
}

fn reap_in_background(mut child: Child) {
    let spawned = thread::Builder::new()
        .name("mailshell-sync-reaper".into())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!(%status, "Sync command finished"),
            Err(e) => tracing::debug!("Wait for sync command: {}", e),
        });
    if let Err(e) = spawned {
        tracing::debug!("Could not spawn sync reaper thread: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn launches_a_trivial_command() {
        let sync = SyncCommand::new("true");
        assert!(sync.launch().is_ok());
    }

    #[test]
    fn missing_shell_is_an_error() {
        let sync = SyncCommand::with_shell("/nonexistent/mailshell-sh", "true");
        let err = sync.launch().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to launch sync command"));
    }

    #[test]
    #[traced_test]
    fn trigger_only_warns_on_failure() {
        let sync = SyncCommand::with_shell("/nonexistent/mailshell-sh", "mbsync -a");
        sync.trigger();
        assert!(logs_contain("Sync failed to start"));
    }

    #[test]
    fn keeps_the_configured_command() {
        let sync = SyncCommand::new("mbsync -a && notmuch new");
        assert_eq!(sync.command(), "mbsync -a && notmuch new");
    }
}
