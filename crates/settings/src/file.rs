//! TOML config file support.
//!
//! Config location: `~/.config/mailshell/config.toml`

use crate::constants::{mail, settings as limits, terminal};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// User-facing config parsed from TOML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Mail client spawned in the terminal.
    pub mail_command: String,
    /// Shell pipeline run by the Sync button.
    pub sync_command: String,
    /// Terminal font family.
    pub font_family: String,
    /// Terminal font size in points.
    pub font_size: f32,
    /// Window width when not maximized.
    pub window_width: Option<f32>,
    /// Window height when not maximized.
    pub window_height: Option<f32>,
    /// Linux: window decoration style ("server" or "client").
    pub linux_decorations: Option<String>,
    /// TERM exported to the mail client.
    pub term: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mail_command: mail::COMMAND.to_string(),
            sync_command: mail::SYNC_COMMAND.to_string(),
            font_family: terminal::FONT_FAMILY.to_string(),
            font_size: terminal::DEFAULT_FONT_SIZE,
            window_width: None,
            window_height: None,
            linux_decorations: None,
            term: mail::TERM.to_string(),
        }
    }
}

impl Config {
    /// Clamp out-of-range values and reset oversized or blank strings.
    fn sanitized(mut self) -> Self {
        let defaults = Config::default();

        if !self.font_size.is_finite() {
            tracing::warn!(
                "font-size {} is not a number, using {}",
                self.font_size,
                defaults.font_size
            );
            self.font_size = defaults.font_size;
        } else if !(terminal::MIN_FONT_SIZE..=terminal::MAX_FONT_SIZE).contains(&self.font_size) {
            tracing::warn!(
                "font-size {} out of range, clamping to {}..={}",
                self.font_size,
                terminal::MIN_FONT_SIZE,
                terminal::MAX_FONT_SIZE
            );
            self.font_size = self
                .font_size
                .clamp(terminal::MIN_FONT_SIZE, terminal::MAX_FONT_SIZE);
        }

        for (name, value, default) in [
            ("mail-command", &mut self.mail_command, defaults.mail_command),
            ("sync-command", &mut self.sync_command, defaults.sync_command),
            ("font-family", &mut self.font_family, defaults.font_family),
            ("term", &mut self.term, defaults.term),
        ] {
            if value.trim().is_empty() || value.len() > limits::MAX_STRING_LENGTH {
                tracing::warn!("Invalid {} in config, using default", name);
                *value = default;
            }
        }
        self
    }
}

/// Default config file content with comments (generated on first launch).
const DEFAULT_CONFIG: &str = r#"# mailshell configuration
# Read once at startup.

# Mail client run inside the terminal
mail-command = "neomutt"

# Run by the Sync button through /bin/sh -c, output discarded
sync-command = "mbsync -a && notmuch new"

# Terminal font family (any monospace font installed on your system)
font-family = "FONT_PLACEHOLDER"

# Terminal font size in points
font-size = 14

# TERM exported to the mail client
# term = "xterm-256color"

# Window dimensions, used when the layout does not maximize the window
# window-width = 1200
# window-height = 800

# Linux: window decoration style, "server" (native) or "client" (app-drawn)
# linux-decorations = "server"
"#;

/// Return the config file path.
pub fn config_path() -> PathBuf {
    mailshell_paths::config_file()
}

/// Ensure the config file exists, creating a default if missing.
/// Returns the path to the config file.
pub fn ensure_config_file() -> Option<PathBuf> {
    let path = config_path();
    write_default_if_missing(&path)?;
    Some(path)
}

fn write_default_if_missing(path: &Path) -> Option<()> {
    if path.exists() {
        return Some(());
    }
    let parent = path.parent()?;
    if let Err(e) = std::fs::create_dir_all(parent) {
        tracing::warn!("Failed to create config directory {:?}: {}", parent, e);
        return None;
    }
    let content = DEFAULT_CONFIG.replace("FONT_PLACEHOLDER", terminal::FONT_FAMILY);
    if let Err(e) = std::fs::write(path, content) {
        tracing::warn!("Failed to write default config {:?}: {}", path, e);
        return None;
    }
    tracing::info!("Created default config at {:?}", path);
    Some(())
}

/// Load and parse the config file. Returns default on any error.
pub fn load_config() -> Config {
    load_config_from(&config_path())
}

pub(crate) fn load_config_from(path: &Path) -> Config {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config: {}", e);
            }
            return Config::default();
        }
    };

    // Size guard
    if content.len() > limits::MAX_FILE_SIZE as usize {
        tracing::warn!(
            "Config file too large ({} bytes), using defaults",
            content.len()
        );
        return Config::default();
    }

    match toml::from_str::<Config>(&content) {
        Ok(cfg) => cfg.sanitized(),
        Err(e) => {
            tracing::warn!("Failed to parse config.toml: {}", e);
            Config::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn default_config_has_sane_values() {
        let cfg = Config::default();
        assert_eq!(cfg.mail_command, "neomutt");
        assert_eq!(cfg.sync_command, "mbsync -a && notmuch new");
        assert_eq!(cfg.term, "xterm-256color");
        assert_eq!(cfg.font_size, 14.0);
        assert!(cfg.window_width.is_none());
    }

    #[test]
    fn parses_minimal_toml() {
        let cfg: Config = toml::from_str(r#"mail-command = "mutt""#).unwrap();
        assert_eq!(cfg.mail_command, "mutt");
        assert_eq!(cfg.sync_command, "mbsync -a && notmuch new");
    }

    #[test]
    fn parses_full_toml() {
        let toml_str = r#"
mail-command = "/usr/bin/neomutt"
sync-command = "offlineimap"
font-family = "JetBrains Mono"
font-size = 16
window-width = 1920
window-height = 1080
linux-decorations = "client"
term = "screen-256color"
"#;
        let cfg: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(cfg.mail_command, "/usr/bin/neomutt");
        assert_eq!(cfg.sync_command, "offlineimap");
        assert_eq!(cfg.font_family, "JetBrains Mono");
        assert_eq!(cfg.font_size, 16.0);
        assert_eq!(cfg.window_width, Some(1920.0));
        assert_eq!(cfg.window_height, Some(1080.0));
        assert_eq!(cfg.linux_decorations.as_deref(), Some("client"));
        assert_eq!(cfg.term, "screen-256color");
    }

    #[test]
    fn ignores_unknown_keys() {
        let result: Result<Config, _> = toml::from_str("theme = \"Nord\"\n");
        assert!(result.is_ok());
    }

    #[test]
    fn default_config_template_is_valid_toml() {
        let content = DEFAULT_CONFIG.replace("FONT_PLACEHOLDER", "Menlo");
        let cfg: Config = toml::from_str(&content).unwrap();
        assert_eq!(cfg.font_family, "Menlo");
        assert_eq!(cfg.mail_command, Config::default().mail_command);
        assert_eq!(cfg.sync_command, Config::default().sync_command);
    }

    #[test]
    fn empty_string_parses_to_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml"));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "font-size = [not toml").unwrap();
        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn oversized_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let padding = "#".repeat(limits::MAX_FILE_SIZE as usize + 1);
        std::fs::write(&path, format!("mail-command = \"mutt\"\n{}", padding)).unwrap();
        assert_eq!(load_config_from(&path), Config::default());
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "font-size = 200\nmail-command = \"  \"\n").unwrap();
        let cfg = load_config_from(&path);
        assert_eq!(cfg.font_size, terminal::MAX_FONT_SIZE);
        assert_eq!(cfg.mail_command, "neomutt");
    }

    #[test]
    fn non_finite_font_size_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        for value in ["nan", "inf", "-inf"] {
            std::fs::write(&path, format!("font-size = {}\n", value)).unwrap();
            assert_eq!(
                load_config_from(&path).font_size,
                terminal::DEFAULT_FONT_SIZE,
                "font-size = {}",
                value
            );
        }
    }

    #[test]
    fn default_file_is_written_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(write_default_if_missing(&path).is_some());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("mail-command"));

        std::fs::write(&path, "mail-command = \"mutt\"\n").unwrap();
        assert!(write_default_if_missing(&path).is_some());
        assert_eq!(load_config_from(&path).mail_command, "mutt");
    }
}
