//! [`Host`] over the live terminal pane and its window.

use commands::Host;
use gpui::{App, Entity, Focusable, Window};
use terminal_view::TerminalPane;

/// Borrowed for the duration of one event handler.
pub(crate) struct ShellHost<'a> {
    terminal: &'a Entity<TerminalPane>,
    window: &'a mut Window,
    cx: &'a mut App,
}

impl<'a> ShellHost<'a> {
    pub(crate) fn new(
        terminal: &'a Entity<TerminalPane>,
        window: &'a mut Window,
        cx: &'a mut App,
    ) -> Self {
        Self {
            terminal,
            window,
            cx,
        }
    }
}

impl Host for ShellHost<'_> {
    fn write(&mut self, bytes: &[u8]) {
        self.terminal.update(self.cx, |pane, _cx| pane.write(bytes));
    }

    fn focus_session(&mut self) {
        let handle = self.terminal.read(self.cx).focus_handle(self.cx);
        self.window.focus(&handle);
    }

    fn close_window(&mut self) {
        tracing::info!("Closing main window");
        self.window.remove_window();
    }
}
