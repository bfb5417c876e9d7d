//! In-window reference guide for the mail client's keys.

use crate::shell_view::ShellView;
use gpui::*;
use terminal_view::Palette;

/// (section, [(keys, description)])
pub(crate) const GUIDE: &[(&str, &[(&str, &str)])] = &[
    (
        "Moving around",
        &[
            ("j / Right", "Next message"),
            ("k / Left", "Previous message"),
            ("Down / Up", "Page down / page up in the index"),
            ("Enter", "Open message"),
            ("q", "Back to the index"),
        ],
    ),
    (
        "Folders",
        &[
            ("gi", "Inbox"),
            ("go", "Sent"),
            ("gd", "Drafts"),
            ("ga", "Archives"),
            ("gt", "Trash"),
            ("c", "Change to any folder"),
        ],
    ),
    (
        "Messages",
        &[
            ("m", "Compose"),
            ("r", "Reply"),
            ("g", "Reply to all"),
            ("f", "Forward"),
            ("d", "Delete"),
            ("u", "Undelete"),
            ("$", "Sync the mailbox"),
        ],
    ),
    (
        "Searching",
        &[
            ("/", "Search the current folder"),
            ("l", "Limit the index to a pattern"),
            ("from:alice", "Match the sender"),
            ("subject:invoice", "Match the subject"),
            ("date:7d..", "Messages from the last week"),
        ],
    ),
    (
        "mailshell",
        &[
            ("F1", "The mail client's own help"),
            ("Ctrl+Q", "Quit without saving changes"),
            ("Escape", "Close this guide"),
        ],
    ),
];

pub(crate) fn render_help(palette: &Palette, cx: &mut Context<ShellView>) -> impl IntoElement {
    let palette = *palette;

    div()
        .absolute()
        .inset_0()
        .flex()
        .flex_col()
        .items_center()
        .child(
            div()
                .id("help-backdrop")
                .absolute()
                .inset_0()
                .bg(palette.overlay)
                .on_click(cx.listener(|this, _: &ClickEvent, _window, cx| {
                    this.close_help(cx);
                })),
        )
        .child(
            div()
                .id("help-guide")
                .mt(px(60.0))
                .w(px(520.0))
                .max_h(px(560.0))
                .overflow_y_scroll()
                .p(px(16.0))
                .flex()
                .flex_col()
                .gap(px(12.0))
                .bg(palette.surface)
                .border_1()
                .border_color(palette.border)
                .rounded(px(8.0))
                .shadow_lg()
                .child(
                    div()
                        .text_color(palette.foreground)
                        .font_weight(FontWeight::BOLD)
                        .child("Reference guide"),
                )
                .children(GUIDE.iter().map(|(section, entries)| {
                    div()
                        .flex()
                        .flex_col()
                        .gap(px(2.0))
                        .child(
                            div()
                                .text_size(px(11.0))
                                .text_color(palette.accent)
                                .child(*section),
                        )
                        .children(entries.iter().map(|(keys, description)| {
                            div()
                                .flex()
                                .flex_row()
                                .text_sm()
                                .child(
                                    div()
                                        .w(px(140.0))
                                        .flex_none()
                                        .text_color(palette.foreground)
                                        .child(*keys),
                                )
                                .child(div().text_color(palette.muted).child(*description))
                        }))
                })),
        )
}
