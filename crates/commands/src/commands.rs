//! Keystroke routing for the embedded mail client.
//!
//! Everything here is independent of the GUI toolkit: the view layer adapts its
//! widgets to the [`Host`] trait and feeds key events through [`KeyRouter`].
//! Byte literals are the de facto protocol with the mail client and must be
//! reproduced exactly.

pub mod command_table;
pub mod controls;
mod folder_panel;
mod host;
pub mod key_router;
pub mod quit;
pub mod search;
pub mod sync;

pub use command_table::{Action, Folder};
pub use controls::Control;
pub use folder_panel::{run_action, FolderPanel};
pub use host::Host;
pub use key_router::{KeyModifiers, KeyPress, KeyRoute, KeyRouter};
pub use search::{DateRange, FieldPrefix, SearchQuery};
pub use sync::SyncCommand;

#[cfg(test)]
pub(crate) use host::MockHost;
