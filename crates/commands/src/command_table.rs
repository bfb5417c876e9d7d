//! Static mapping from logical actions and folders to mail-client keystrokes.
//!
//! Lookups are `match` expressions over closed enums, so an unmapped entry is a
//! compile error rather than a runtime condition.

/// Escape: leaves any pending prompt in the mail client.
pub const ESCAPE: u8 = 0x1b;

/// BEL: the mail client's "abort current input" key.
pub const CANCEL_INPUT: u8 = 0x07;

/// Terminates a command typed at the mail client's `:` prompt.
pub const NEWLINE: &[u8] = b"\n";

/// Arrow keys the window would otherwise keep for widget navigation.
///
/// Keys are GPUI key names; values are single-character mail-client commands.
pub const NAVIGATION_KEYS: &[(&str, &[u8])] = &[
    ("left", b"k"),  // previous entry
    ("right", b"j"), // next entry
    ("up", b"-"),    // previous page
    ("down", b" "),  // next page
];

/// Key that opens the mail client's own help screen.
pub const HELP_KEY: &str = "f1";

/// The mail client's help-invocation character.
pub const HELP_COMMAND: &[u8] = b"?";

/// A logical command the shell can send to the mail client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveNext,
    MovePrev,
    Open,
    Delete,
    Write,
    Reply,
    ReplyAll,
    Quit,
    Sync,
    Search,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::MoveNext,
        Action::MovePrev,
        Action::Open,
        Action::Delete,
        Action::Write,
        Action::Reply,
        Action::ReplyAll,
        Action::Quit,
        Action::Sync,
        Action::Search,
    ];

    /// Literal keystrokes for this action.
    pub const fn keys(self) -> &'static [u8] {
        match self {
            Action::MoveNext => b"j",
            Action::MovePrev => b"k",
            Action::Open => b"\n",
            Action::Delete => b"d",
            Action::Write => b"m",
            Action::Reply => b"r",
            Action::ReplyAll => b"g",
            // Escape out of any prompt, then force-quit without saving.
            Action::Quit => b"\x1b:q!\n",
            Action::Sync => b"$",
            // Abort pending input, then open the notmuch query prompt.
            Action::Search => b"\x07:exec vfolder-from-query\n",
        }
    }

    /// Sidebar label.
    pub const fn label(self) -> &'static str {
        match self {
            Action::MoveNext => "Next",
            Action::MovePrev => "Previous",
            Action::Open => "Open",
            Action::Delete => "Delete",
            Action::Write => "Compose",
            Action::Reply => "Reply",
            Action::ReplyAll => "Reply all",
            Action::Quit => "Quit",
            Action::Sync => "Sync",
            Action::Search => "Search",
        }
    }
}

/// A mailbox reachable through a two-key jump macro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Folder {
    Inbox,
    Sent,
    Local,
    Trash,
    Drafts,
    Quarantine,
    Archives,
}

impl Folder {
    pub const ALL: [Folder; 7] = [
        Folder::Inbox,
        Folder::Sent,
        Folder::Local,
        Folder::Trash,
        Folder::Drafts,
        Folder::Quarantine,
        Folder::Archives,
    ];

    /// Jump macro for this folder.
    pub const fn keys(self) -> &'static [u8] {
        match self {
            Folder::Inbox => b"gi",
            Folder::Sent => b"go",
            Folder::Local => b"gl",
            Folder::Trash => b"gt",
            Folder::Drafts => b"gd",
            Folder::Quarantine => b"gq",
            Folder::Archives => b"ga",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Folder::Inbox => "Inbox",
            Folder::Sent => "Sent",
            Folder::Local => "Local",
            Folder::Trash => "Trash",
            Folder::Drafts => "Drafts",
            Folder::Quarantine => "Quarantine",
            Folder::Archives => "Archives",
        }
    }
}

/// Look up the remapped command for a navigation key.
pub fn navigation_command(key: &str) -> Option<&'static [u8]> {
    NAVIGATION_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, command)| *command)
}
