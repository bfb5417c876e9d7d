//! Two-phase shutdown.

use crate::command_table::Action;
use crate::host::Host;

/// Ask the mail client to quit, then close the window without waiting.
///
/// The close is unconditional: if the child ignores the keystrokes, tearing
/// down the window kills the session anyway.
pub fn run<H: Host + ?Sized>(host: &mut H) {
    tracing::info!("Quit requested, sending forced-quit keys before closing");
    host.write(Action::Quit.keys());
    host.close_window();
}
