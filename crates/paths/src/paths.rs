//! Centralized path management for mailshell.
//!
//! The config directory is lazily resolved and cached for the process lifetime.

use std::io;
use std::path::PathBuf;
use std::sync::OnceLock;

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

const APP_DIR_NAME: &str = "mailshell";

/// ~/.config/mailshell (or platform equivalent)
pub fn config_dir() -> &'static PathBuf {
    CONFIG_DIR.get_or_init(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    })
}

/// Config file path: config_dir()/config.toml
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Optional layout override: config_dir()/layout.toml
pub fn layout_file() -> PathBuf {
    config_dir().join("layout.toml")
}

/// Create the config directory if it is missing.
pub fn ensure_dirs() -> io::Result<()> {
    std::fs::create_dir_all(config_dir())
}
