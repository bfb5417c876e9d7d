/// The surface routing logic acts on: one session, its focus, and the window.
///
/// Implemented by the view layer over the live terminal pane; tests substitute
/// a recorder or a mock.
#[cfg_attr(test, mockall::automock)]
pub trait Host {
    /// Write bytes to the session's child process.
    fn write(&mut self, bytes: &[u8]);

    /// Move keyboard focus to the session.
    fn focus_session(&mut self);

    /// Close the host window, tearing down the session with it.
    fn close_window(&mut self);
}
