//! Sidebar of folder, action and control buttons.
//!
//! Buttons come from the layout's widget ids; ids without a binding are
//! skipped so a stale layout still opens.

use crate::shell_view::ShellView;
use commands::{Control, Folder};
use gpui::prelude::FluentBuilder;
use gpui::*;
use settings::constants::sidebar::{BUTTON_HEIGHT, PADDING, SECTION_GAP, WIDTH};
use settings::{SidebarLayout, WidgetEntry};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SidebarButton {
    pub id: String,
    pub label: String,
    pub control: Control,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SidebarSections {
    pub folders: Vec<SidebarButton>,
    pub actions: Vec<SidebarButton>,
    pub controls: Vec<SidebarButton>,
}

fn resolve_section(section: &str, entries: &[WidgetEntry]) -> Vec<SidebarButton> {
    entries
        .iter()
        .filter_map(|entry| match Control::from_widget_id(&entry.id) {
            Some(control) => Some(SidebarButton {
                id: entry.id.clone(),
                label: entry
                    .label
                    .clone()
                    .unwrap_or_else(|| control.label().to_string()),
                control,
            }),
            None => {
                tracing::warn!(section, id = %entry.id, "Unknown widget id in layout, skipping");
                None
            }
        })
        .collect()
}

impl SidebarSections {
    pub fn from_layout(layout: &SidebarLayout) -> Self {
        let sections = Self {
            folders: resolve_section("folders", &layout.folders),
            actions: resolve_section("actions", &layout.actions),
            controls: resolve_section("controls", &layout.controls),
        };
        if sections.folders.is_empty() {
            tracing::warn!("Layout has no folder buttons");
        }
        sections
    }

    /// Folders in the order they appear, for the folder panel.
    pub fn folder_order(&self) -> Vec<Folder> {
        self.folders
            .iter()
            .filter_map(|button| match button.control {
                Control::Folder(folder) => Some(folder),
                _ => None,
            })
            .collect()
    }
}

fn render_section(
    title: &'static str,
    buttons: &[SidebarButton],
    view: &ShellView,
    cx: &mut Context<ShellView>,
) -> AnyElement {
    let palette = *view.palette();

    div()
        .flex()
        .flex_col()
        .gap(px(2.0))
        .child(
            div()
                .px(px(PADDING))
                .pb(px(4.0))
                .text_size(px(11.0))
                .text_color(palette.muted)
                .child(title),
        )
        .children(buttons.iter().map(|button| {
            let control = button.control;
            let is_active = match control {
                Control::Folder(folder) => view.folder_panel().is_active(folder),
                _ => false,
            };
            let label: SharedString = button.label.clone().into();

            div()
                .id(ElementId::Name(button.id.clone().into()))
                .h(px(BUTTON_HEIGHT))
                .w_full()
                .px(px(PADDING))
                .flex()
                .items_center()
                .rounded(px(4.0))
                .text_sm()
                .cursor_pointer()
                .when(is_active, |d| {
                    d.bg(palette.surface_hover).text_color(palette.accent)
                })
                .when(!is_active, |d| {
                    d.text_color(palette.foreground)
                        .hover(|d| d.bg(palette.surface))
                })
                .on_click(cx.listener(move |this, _: &ClickEvent, window, cx| {
                    this.activate(control, window, cx);
                }))
                .child(label)
        }))
        .into_any_element()
}

pub(crate) fn render_sidebar(view: &ShellView, cx: &mut Context<ShellView>) -> impl IntoElement {
    let palette = *view.palette();
    let sections = view.sidebar();

    let mut column = div()
        .id("sidebar")
        .w(px(WIDTH))
        .h_full()
        .flex_none()
        .flex()
        .flex_col()
        .gap(px(SECTION_GAP))
        .p(px(PADDING))
        .bg(palette.sidebar)
        .border_r_1()
        .border_color(palette.border);

    for (title, buttons) in [
        ("FOLDERS", &sections.folders),
        ("MESSAGE", &sections.actions),
        ("MAILSHELL", &sections.controls),
    ] {
        if !buttons.is_empty() {
            column = column.child(render_section(title, buttons, view, cx));
        }
    }
    column
}
