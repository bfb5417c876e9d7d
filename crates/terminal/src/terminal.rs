//! Terminal session core.
//!
//! PTY management for the mail client and VT parsing into an alacritty grid.
//! No GUI dependency; the view layer polls the flags exposed here.

mod pty_handler;
pub mod types;
pub mod vt_processor;

pub use pty_handler::{PtyHandler, SpawnSpec};
pub use types::TermSize;
pub use vt_processor::TerminalProcessor;
