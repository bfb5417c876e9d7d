//! Centralized configuration constants for mailshell.
//!
//! Organized by component.

/// Terminal pane configuration.
pub mod terminal {
    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: f32 = 14.0;
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 32.0;

    /// Default monospace font family (macOS).
    #[cfg(target_os = "macos")]
    pub const FONT_FAMILY: &str = "Menlo";

    /// Default monospace font family (Windows).
    #[cfg(target_os = "windows")]
    pub const FONT_FAMILY: &str = "Consolas";

    /// Generic family that always resolves to something.
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    pub const FONT_FAMILY: &str = "monospace";

    /// Padding around terminal content.
    pub const PADDING: f32 = 4.0;
    /// Cursor thickness in pixels.
    pub const CURSOR_THICKNESS: f32 = 2.0;

    /// Grid size used until the first layout pass measures the pane.
    pub const INITIAL_ROWS: u16 = 24;
    pub const INITIAL_COLS: u16 = 80;
}

/// Mail client defaults.
pub mod mail {
    /// Client spawned in the terminal.
    pub const COMMAND: &str = "neomutt";
    /// Mailbox sync pipeline, run through `/bin/sh -c`.
    pub const SYNC_COMMAND: &str = "mbsync -a && notmuch new";
    /// TERM exported to the client.
    pub const TERM: &str = "xterm-256color";
}

/// Sidebar configuration.
pub mod sidebar {
    pub const WIDTH: f32 = 168.0;
    pub const BUTTON_HEIGHT: f32 = 28.0;
    pub const SECTION_GAP: f32 = 12.0;
    pub const PADDING: f32 = 8.0;
}

/// Search bar configuration.
pub mod search_bar {
    pub const HEIGHT: f32 = 36.0;
    pub const MAX_QUERY_LENGTH: usize = 512;
}

/// Window configuration.
pub mod window {
    pub const DEFAULT_WIDTH: f32 = 1200.0;
    pub const DEFAULT_HEIGHT: f32 = 800.0;
    pub const MIN_WIDTH: f32 = 640.0;
    pub const MIN_HEIGHT: f32 = 400.0;
}

/// Timing configuration.
pub mod timing {
    use std::time::Duration;

    /// Render-flag poll interval while output is flowing.
    pub const ACTIVE_POLL_INTERVAL: Duration = Duration::from_millis(4);
    /// Poll interval once the session has been quiet for a while.
    pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);
    /// Consecutive empty polls before switching to the idle interval.
    pub const IDLE_THRESHOLD: u32 = 5;
}

/// Settings file validation limits.
pub mod settings {
    /// Maximum config or layout file size in bytes (64 KB).
    pub const MAX_FILE_SIZE: u64 = 64 * 1024;

    /// Maximum length for string fields (font family, commands).
    pub const MAX_STRING_LENGTH: usize = 256;
}
