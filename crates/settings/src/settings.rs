//! Configuration for mailshell.
//!
//! Provides compile-time constants, the user's `config.toml`, and the
//! declarative sidebar layout.

pub mod constants;
pub mod file;
pub mod layout;

pub use file::{config_path, ensure_config_file, load_config, Config};
pub use layout::{load_layout, Layout, SearchLayout, SidebarLayout, WidgetEntry, WindowLayout};
