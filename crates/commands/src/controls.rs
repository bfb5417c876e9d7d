//! Declarative binding of layout widget identifiers to controls.

use crate::command_table::{Action, Folder};

/// What a sidebar widget does when clicked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Folder(Folder),
    Action(Action),
    /// Toggle the shell's own reference guide.
    Help,
}

/// Widget identifiers understood by the layout resource.
pub const WIDGETS: &[(&str, Control)] = &[
    ("btn_inbox", Control::Folder(Folder::Inbox)),
    ("btn_sent", Control::Folder(Folder::Sent)),
    ("btn_locale", Control::Folder(Folder::Local)),
    ("btn_trash", Control::Folder(Folder::Trash)),
    ("btn_draft", Control::Folder(Folder::Drafts)),
    ("btn_quarantine", Control::Folder(Folder::Quarantine)),
    ("btn_archives", Control::Folder(Folder::Archives)),
    ("btn_prev", Control::Action(Action::MovePrev)),
    ("btn_next", Control::Action(Action::MoveNext)),
    ("btn_enter", Control::Action(Action::Open)),
    ("btn_write", Control::Action(Action::Write)),
    ("btn_reply", Control::Action(Action::Reply)),
    ("btn_reply_all", Control::Action(Action::ReplyAll)),
    ("btn_del", Control::Action(Action::Delete)),
    ("btn_stop", Control::Action(Action::Quit)),
    ("btn_sync", Control::Action(Action::Sync)),
    ("btn_help", Control::Help),
];

impl Control {
    /// Resolve a layout widget id. Unknown ids yield `None`.
    pub fn from_widget_id(id: &str) -> Option<Control> {
        WIDGETS
            .iter()
            .find(|(widget, _)| *widget == id)
            .map(|(_, control)| *control)
    }

    /// Default label when the layout does not provide one.
    pub fn label(self) -> &'static str {
        match self {
            Control::Folder(folder) => folder.label(),
            Control::Action(action) => action.label(),
            Control::Help => "Help",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn resolves_known_widgets() {
        assert_eq!(
            Control::from_widget_id("btn_inbox"),
            Some(Control::Folder(Folder::Inbox))
        );
        assert_eq!(
            Control::from_widget_id("btn_stop"),
            Some(Control::Action(Action::Quit))
        );
        assert_eq!(Control::from_widget_id("btn_help"), Some(Control::Help));
    }

    #[test]
    fn unknown_widget_is_none() {
        assert_eq!(Control::from_widget_id("btn_calendar"), None);
        assert_eq!(Control::from_widget_id(""), None);
    }

    #[test]
    fn widget_ids_are_unique() {
        let ids: HashSet<&str> = WIDGETS.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids.len(), WIDGETS.len());
    }

    #[test]
    fn every_folder_has_a_widget() {
        for folder in Folder::ALL {
            assert!(
                WIDGETS.iter().any(|(_, c)| *c == Control::Folder(folder)),
                "{:?} has no widget",
                folder
            );
        }
    }
}
