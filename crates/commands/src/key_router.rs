//! Window-level key routing.
//!
//! Every key-down in the window passes through [`KeyRouter::route`] before
//! any widget sees it. The checks run in a fixed order and the first match
//! wins:
//!
//! 1. the search entry has focus: leave the key to it
//! 2. arrows: remapped to mail-client navigation commands
//! 3. the quit chord: forced quit
//! 4. F1: the mail client's help screen
//! 5. anything with a textual payload: forwarded verbatim to the session
//! 6. everything else is left to the toolkit

use crate::command_table::{navigation_command, HELP_COMMAND, HELP_KEY};
use crate::host::Host;
use crate::quit;
use termwiz::input::{KeyCode, KeyCodeEncodeModes, KeyboardEncoding, Modifiers as TermwizMods};

/// Modifier state of a key event, decoupled from the GUI toolkit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub control: bool,
    pub alt: bool,
    pub shift: bool,
    /// Cmd on macOS, Super/Win elsewhere.
    pub platform: bool,
}

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers {
        control: false,
        alt: false,
        shift: false,
        platform: false,
    };

    pub const fn ctrl() -> Self {
        KeyModifiers {
            control: true,
            ..Self::NONE
        }
    }

    fn to_termwiz(self) -> TermwizMods {
        let mut tm = TermwizMods::NONE;
        if self.shift {
            tm |= TermwizMods::SHIFT;
        }
        if self.alt {
            tm |= TermwizMods::ALT;
        }
        if self.control {
            tm |= TermwizMods::CTRL;
        }
        tm
    }
}

/// One key-down event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress<'a> {
    /// Toolkit key name: `"a"`, `"enter"`, `"left"`, `"f1"`.
    pub key: &'a str,
    /// Text the key would insert, if any.
    pub key_char: Option<&'a str>,
    pub modifiers: KeyModifiers,
}

impl<'a> KeyPress<'a> {
    pub fn new(key: &'a str, key_char: Option<&'a str>, modifiers: KeyModifiers) -> Self {
        Self {
            key,
            key_char,
            modifiers,
        }
    }

    /// A plain unmodified key that inserts `text`.
    pub fn text(key: &'a str, text: &'a str) -> Self {
        Self::new(key, Some(text), KeyModifiers::NONE)
    }

    /// A named key with no inserted text.
    pub fn named(key: &'a str, modifiers: KeyModifiers) -> Self {
        Self::new(key, None, modifiers)
    }
}

/// Outcome of routing one key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyRoute {
    /// The search entry owns the key.
    TextEntry,
    Navigate(&'static [u8]),
    Quit,
    Help(&'static [u8]),
    Forward(Vec<u8>),
    Unhandled,
}

impl KeyRoute {
    /// Whether the event stops here instead of reaching the toolkit.
    pub fn is_consumed(&self) -> bool {
        !matches!(self, KeyRoute::TextEntry | KeyRoute::Unhandled)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyRouter {
    application_cursor_keys: bool,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode cursor keys in application mode (DECCKM) when forwarding.
    pub fn with_application_cursor_keys(mut self, enabled: bool) -> Self {
        self.application_cursor_keys = enabled;
        self
    }

    pub fn route(&self, press: &KeyPress<'_>, text_entry_focused: bool) -> KeyRoute {
        if text_entry_focused {
            return KeyRoute::TextEntry;
        }

        // Arrows match regardless of modifiers.
        if let Some(command) = navigation_command(press.key) {
            return KeyRoute::Navigate(command);
        }

        if is_quit_chord(press) {
            return KeyRoute::Quit;
        }

        if press.key == HELP_KEY {
            return KeyRoute::Help(HELP_COMMAND);
        }

        match self.payload(press) {
            Some(bytes) if !bytes.is_empty() => KeyRoute::Forward(bytes),
            _ => KeyRoute::Unhandled,
        }
    }

    /// Route `press` and carry out the result on `host`.
    ///
    /// Returns whether the key was consumed.
    pub fn handle<H: Host + ?Sized>(
        &self,
        host: &mut H,
        press: &KeyPress<'_>,
        text_entry_focused: bool,
    ) -> bool {
        let route = self.route(press, text_entry_focused);
        tracing::debug!(key = press.key, ?route, "Routed key");

        match &route {
            KeyRoute::TextEntry | KeyRoute::Unhandled => {}
            KeyRoute::Navigate(bytes) | KeyRoute::Help(bytes) => host.write(bytes),
            KeyRoute::Quit => quit::run(host),
            KeyRoute::Forward(bytes) => {
                host.focus_session();
                host.write(bytes);
            }
        }
        route.is_consumed()
    }

    fn payload(&self, press: &KeyPress<'_>) -> Option<Vec<u8>> {
        let mods = press.modifiers;
        if mods.platform {
            return None;
        }

        let named = named_key(press.key);
        if named.is_none() && !mods.control && !mods.alt {
            if let Some(text) = press.key_char.filter(|t| !t.is_empty()) {
                return Some(text.as_bytes().to_vec());
            }
        }

        let keycode = named.or_else(|| single_char(press.key))?;
        let modes = KeyCodeEncodeModes {
            encoding: KeyboardEncoding::Xterm,
            application_cursor_keys: self.application_cursor_keys,
            newline_mode: false,
            modify_other_keys: None,
        };
        match keycode.encode(mods.to_termwiz(), modes, true) {
            Ok(seq) => Some(seq.into_bytes()),
            Err(e) => {
                tracing::debug!("Could not encode key {:?}: {}", press.key, e);
                None
            }
        }
    }
}

fn is_quit_chord(press: &KeyPress<'_>) -> bool {
    let mods = press.modifiers;
    if !press.key.eq_ignore_ascii_case("q") || mods.alt || mods.shift {
        return false;
    }
    #[cfg(target_os = "macos")]
    if mods.platform && !mods.control {
        return true;
    }
    mods.control && !mods.platform
}

/// Keys that carry no inserted text but still have a terminal encoding.
fn named_key(key: &str) -> Option<KeyCode> {
    match key {
        "home" => Some(KeyCode::Home),
        "end" => Some(KeyCode::End),
        "pageup" => Some(KeyCode::PageUp),
        "pagedown" => Some(KeyCode::PageDown),
        "insert" => Some(KeyCode::Insert),
        "delete" => Some(KeyCode::Delete),
        "tab" => Some(KeyCode::Tab),
        "enter" => Some(KeyCode::Enter),
        "escape" => Some(KeyCode::Escape),
        "backspace" => Some(KeyCode::Backspace),
        "space" => Some(KeyCode::Char(' ')),
        k => function_key(k),
    }
}

fn function_key(key: &str) -> Option<KeyCode> {
    let n: u8 = key.strip_prefix('f')?.parse().ok()?;
    (1..=12).contains(&n).then_some(KeyCode::Function(n))
}

fn single_char(key: &str) -> Option<KeyCode> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeyCode::Char(c)),
        _ => None,
    }
}
