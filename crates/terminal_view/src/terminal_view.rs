//! Terminal GPUI view layer.
//!
//! Rendering and color conversion for the mail client session.

mod colors;
mod pane;
mod render;

pub use colors::Palette;
pub use pane::{TerminalExitEvent, TerminalPane};
