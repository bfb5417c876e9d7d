//! End-to-end routing scenarios against a recording host.

mod common;

use commands::{
    run_action, Action, Control, DateRange, FieldPrefix, Folder, FolderPanel, KeyModifiers,
    KeyPress, KeyRouter, SearchQuery,
};
use common::{inert_sync, HostEvent, RecordingHost};
use pretty_assertions::assert_eq;

/// Dispatch a widget click the way the sidebar does.
fn click(host: &mut RecordingHost, panel: &mut FolderPanel, widget: &str) {
    match Control::from_widget_id(widget) {
        Some(Control::Folder(folder)) => panel.select(host, folder),
        Some(Control::Action(action)) => run_action(host, action, &inert_sync()),
        Some(Control::Help) | None => {}
    }
}

#[test]
fn inbox_button_jumps_and_refocuses() {
    let mut host = RecordingHost::new();
    let mut panel = FolderPanel::new(Folder::ALL.to_vec());

    click(&mut host, &mut panel, "btn_sent");
    click(&mut host, &mut panel, "btn_inbox");

    assert_eq!(
        host.events,
        vec![
            HostEvent::Write(b"go".to_vec()),
            HostEvent::Focus,
            HostEvent::Write(b"gi".to_vec()),
            HostEvent::Focus,
        ]
    );
    assert_eq!(panel.active(), Some(Folder::Inbox));
}

#[test]
fn ctrl_q_sends_forced_quit_then_closes() {
    let mut host = RecordingHost::new();
    let press = KeyPress::new("q", Some("q"), KeyModifiers::ctrl());

    assert!(KeyRouter::new().handle(&mut host, &press, false));
    assert_eq!(
        host.events,
        vec![HostEvent::Write(b"\x1b:q!\n".to_vec()), HostEvent::Close]
    );
}

#[test]
fn stop_button_matches_quit_chord() {
    let mut host = RecordingHost::new();
    let mut panel = FolderPanel::new(Folder::ALL.to_vec());

    click(&mut host, &mut panel, "btn_stop");
    assert_eq!(host.writes(), vec![Action::Quit.keys().to_vec()]);
    assert!(host.closed());
}

#[test]
fn search_emits_five_separate_writes() {
    let mut host = RecordingHost::new();
    let query = SearchQuery::new("foo", FieldPrefix::From, DateRange::Week);

    assert!(query.submit(&mut host));
    assert_eq!(
        host.writes(),
        vec![
            b"\x07:exec vfolder-from-query\n".to_vec(),
            b"date:7d.. ".to_vec(),
            b"from:".to_vec(),
            b"foo".to_vec(),
            b"\n".to_vec(),
        ]
    );
    assert_eq!(host.focus_count(), 1);
}

#[test]
fn typing_while_search_is_focused_reaches_nobody() {
    let mut host = RecordingHost::new();
    let router = KeyRouter::new();

    for c in ["f", "o", "o"] {
        assert!(!router.handle(&mut host, &KeyPress::text(c, c), true));
    }
    assert!(host.events.is_empty());
}

#[test]
fn keys_and_clicks_share_one_ordered_stream() {
    let mut host = RecordingHost::new();
    let router = KeyRouter::new();
    let mut panel = FolderPanel::new(Folder::ALL.to_vec());

    router.handle(&mut host, &KeyPress::named("down", KeyModifiers::NONE), false);
    click(&mut host, &mut panel, "btn_reply");
    router.handle(&mut host, &KeyPress::text("y", "y"), false);

    assert_eq!(host.stream(), b" ry".to_vec());
}

#[test]
fn only_one_folder_active_through_a_session() {
    let mut host = RecordingHost::new();
    let mut panel = FolderPanel::new(Folder::ALL.to_vec());

    for widget in ["btn_trash", "btn_draft", "btn_archives", "btn_inbox"] {
        click(&mut host, &mut panel, widget);
        let active = Folder::ALL.iter().filter(|f| panel.is_active(**f)).count();
        assert_eq!(active, 1);
    }
    assert_eq!(panel.active(), Some(Folder::Inbox));
}

#[test]
fn sync_button_leaves_session_untouched() {
    let mut host = RecordingHost::new();
    let mut panel = FolderPanel::new(Folder::ALL.to_vec());

    click(&mut host, &mut panel, "btn_sync");
    assert!(host.events.is_empty());
}
