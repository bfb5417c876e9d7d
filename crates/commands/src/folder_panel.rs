//! Sidebar folder selection and action dispatch.

use crate::command_table::{Action, Folder};
use crate::host::Host;
use crate::quit;
use crate::sync::SyncCommand;

/// Folder buttons in layout order, at most one of them active.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderPanel {
    folders: Vec<Folder>,
    active: Option<Folder>,
}

impl FolderPanel {
    /// The first folder starts active, mirroring the mail client opening on it.
    pub fn new(folders: Vec<Folder>) -> Self {
        let active = folders.first().copied();
        Self { folders, active }
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn active(&self) -> Option<Folder> {
        self.active
    }

    pub fn is_active(&self, folder: Folder) -> bool {
        self.active == Some(folder)
    }

    /// Jump to `folder`: send its macro, mark it active, return focus to the session.
    pub fn select<H: Host + ?Sized>(&mut self, host: &mut H, folder: Folder) {
        tracing::debug!(?folder, "Folder selected");
        host.write(folder.keys());
        self.active = Some(folder);
        host.focus_session();
    }
}

/// Carry out a sidebar action.
pub fn run_action<H: Host + ?Sized>(host: &mut H, action: Action, sync: &SyncCommand) {
    match action {
        Action::Quit => quit::run(host),
        Action::Sync => sync.trigger(),
        _ => {
            tracing::debug!(?action, "Action clicked");
            host.write(action.keys());
            host.focus_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MockHost;
    use mockall::Sequence;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn unused_sync() -> SyncCommand {
        SyncCommand::with_shell("/nonexistent/mailshell-sh", "true")
    }

    #[test]
    fn first_folder_starts_active() {
        let panel = FolderPanel::new(vec![Folder::Inbox, Folder::Sent]);
        assert_eq!(panel.active(), Some(Folder::Inbox));
        assert!(panel.is_active(Folder::Inbox));
        assert!(!panel.is_active(Folder::Sent));
    }

    #[test]
    fn empty_panel_has_no_active_folder() {
        let panel = FolderPanel::new(Vec::new());
        assert_eq!(panel.active(), None);
    }

    #[test]
    fn select_writes_macro_then_focuses() {
        let mut host = MockHost::new();
        let mut seq = Sequence::new();
        host.expect_write()
            .withf(|bytes| bytes == b"gt")
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_focus_session()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        let mut panel = FolderPanel::new(Folder::ALL.to_vec());
        panel.select(&mut host, Folder::Trash);
        assert_eq!(panel.active(), Some(Folder::Trash));
    }

    #[test]
    fn exactly_one_folder_is_active_after_selection() {
        let mut host = MockHost::new();
        host.expect_write().returning(|_| ());
        host.expect_focus_session().returning(|| ());

        let mut panel = FolderPanel::new(Folder::ALL.to_vec());
        for folder in [Folder::Sent, Folder::Archives, Folder::Drafts] {
            panel.select(&mut host, folder);
            let active: Vec<_> = panel
                .folders()
                .iter()
                .filter(|f| panel.is_active(**f))
                .collect();
            assert_eq!(active, vec![&folder]);
        }
    }

    #[test_case(Action::Reply, b"r" ; "reply")]
    #[test_case(Action::Delete, b"d" ; "delete")]
    #[test_case(Action::Open, b"\n" ; "open")]
    fn action_writes_macro_then_focuses(action: Action, expected: &'static [u8]) {
        let mut host = MockHost::new();
        let mut seq = Sequence::new();
        host.expect_write()
            .withf(move |bytes| bytes == expected)
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        host.expect_focus_session()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        run_action(&mut host, action, &unused_sync());
    }

    #[test]
    fn quit_action_closes_window() {
        let mut host = MockHost::new();
        host.expect_write()
            .withf(|bytes| bytes == b"\x1b:q!\n")
            .times(1)
            .return_const(());
        host.expect_close_window().times(1).return_const(());
        host.expect_focus_session().never();

        run_action(&mut host, Action::Quit, &unused_sync());
    }

    #[test]
    fn sync_action_never_touches_the_session() {
        let mut host = MockHost::new();
        host.expect_write().never();
        host.expect_focus_session().never();
        host.expect_close_window().never();

        run_action(&mut host, Action::Sync, &unused_sync());
    }
}
