//! Window contents for mailshell.
//!
//! Sidebar, search bar, help overlay, and the key capture that feeds the
//! command router.

mod help;
mod host;
mod search_bar;
mod shell_view;
mod sidebar;

pub use shell_view::{keybindings, ShellView};
