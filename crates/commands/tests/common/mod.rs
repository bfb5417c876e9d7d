//! Shared helpers for the routing scenario tests.

#![allow(dead_code)]

use commands::Host;

// ============================================================================
// Recording host
// ============================================================================

/// Host that records everything done to it, in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostEvent {
    Write(Vec<u8>),
    Focus,
    Close,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the writes, in issue order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// All written bytes joined, as the child would read them.
    pub fn stream(&self) -> Vec<u8> {
        self.writes().concat()
    }

    pub fn focus_count(&self) -> usize {
        self.events.iter().filter(|e| **e == HostEvent::Focus).count()
    }

    pub fn closed(&self) -> bool {
        self.events.contains(&HostEvent::Close)
    }
}

impl Host for RecordingHost {
    fn write(&mut self, bytes: &[u8]) {
        self.events.push(HostEvent::Write(bytes.to_vec()));
    }

    fn focus_session(&mut self) {
        self.events.push(HostEvent::Focus);
    }

    fn close_window(&mut self) {
        self.events.push(HostEvent::Close);
    }
}

/// Sync command that is never expected to run successfully.
pub fn inert_sync() -> commands::SyncCommand {
    commands::SyncCommand::with_shell("/nonexistent/mailshell-sh", "true")
}
