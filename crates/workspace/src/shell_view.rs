//! Application state for the one mailshell window.

use crate::help::render_help;
use crate::host::ShellHost;
use crate::search_bar::{SearchBar, SearchSubmitted};
use crate::sidebar::{render_sidebar, SidebarSections};
use commands::{
    run_action, Control, FolderPanel, KeyModifiers, KeyPress, KeyRouter, SearchQuery, SyncCommand,
};
use gpui::prelude::FluentBuilder;
use gpui::*;
use settings::{Config, Layout};
use terminal_view::{Palette, TerminalExitEvent, TerminalPane};

// Tab would otherwise be claimed by the toolkit's focus traversal bindings
actions!(mailshell, [SendTab, SendShiftTab]);

/// Key context of the shell's root element.
pub const KEY_CONTEXT: &str = "MailShell";

/// Bindings that must win over focus traversal inside the shell.
pub fn keybindings() -> Vec<KeyBinding> {
    vec![
        KeyBinding::new("tab", SendTab, Some(KEY_CONTEXT)),
        KeyBinding::new("shift-tab", SendShiftTab, Some(KEY_CONTEXT)),
    ]
}

fn tab_press(shift: bool) -> KeyPress<'static> {
    KeyPress::named(
        "tab",
        KeyModifiers {
            shift,
            ..KeyModifiers::NONE
        },
    )
}

/// Owns the session pane, the sidebar state and the search bar, and routes
/// every key event in the window.
pub struct ShellView {
    terminal: Entity<TerminalPane>,
    search_bar: Option<Entity<SearchBar>>,
    sidebar: SidebarSections,
    folder_panel: FolderPanel,
    sync: SyncCommand,
    help_open: bool,
    palette: Palette,
    _subscriptions: Vec<Subscription>,
}

impl ShellView {
    pub fn new(layout: &Layout, config: &Config, window: &mut Window, cx: &mut Context<Self>) -> Self {
        let terminal = cx.new(|cx| TerminalPane::new(config, cx));
        let palette = *terminal.read(cx).palette();

        let mut subscriptions = vec![cx.subscribe(
            &terminal,
            |_this, _terminal, _: &TerminalExitEvent, cx| {
                tracing::info!("Session ended, quitting");
                cx.quit();
            },
        )];

        let search_bar = match &layout.search {
            Some(search_layout) => {
                let bar = cx.new(|cx| SearchBar::new(search_layout, palette, cx));
                subscriptions.push(cx.subscribe_in(
                    &bar,
                    window,
                    |this, _bar, event: &SearchSubmitted, window, cx| {
                        this.submit_search(&event.0, window, cx);
                    },
                ));
                Some(bar)
            }
            None => {
                tracing::debug!("Layout has no search bar");
                None
            }
        };

        let sidebar = SidebarSections::from_layout(&layout.sidebar);
        let folder_panel = FolderPanel::new(sidebar.folder_order());

        let terminal_focus = terminal.read(cx).focus_handle(cx);
        window.focus(&terminal_focus);

        Self {
            terminal,
            search_bar,
            sidebar,
            folder_panel,
            sync: SyncCommand::new(config.sync_command.clone()),
            help_open: false,
            palette,
            _subscriptions: subscriptions,
        }
    }

    pub(crate) fn palette(&self) -> &Palette {
        &self.palette
    }

    pub(crate) fn sidebar(&self) -> &SidebarSections {
        &self.sidebar
    }

    pub(crate) fn folder_panel(&self) -> &FolderPanel {
        &self.folder_panel
    }

    /// Run a sidebar control.
    pub(crate) fn activate(&mut self, control: Control, window: &mut Window, cx: &mut Context<Self>) {
        match control {
            Control::Help => {
                self.help_open = !self.help_open;
                tracing::debug!(open = self.help_open, "Help toggled");
            }
            Control::Folder(folder) => {
                let mut host = ShellHost::new(&self.terminal, window, cx);
                self.folder_panel.select(&mut host, folder);
            }
            Control::Action(action) => {
                let mut host = ShellHost::new(&self.terminal, window, cx);
                run_action(&mut host, action, &self.sync);
            }
        }
        cx.notify();
    }

    pub(crate) fn close_help(&mut self, cx: &mut Context<Self>) {
        if self.help_open {
            self.help_open = false;
            cx.notify();
        }
    }

    fn submit_search(&mut self, query: &SearchQuery, window: &mut Window, cx: &mut Context<Self>) {
        let mut host = ShellHost::new(&self.terminal, window, cx);
        query.submit(&mut host);
    }

    fn text_entry_focused(&self, window: &Window, cx: &App) -> bool {
        self.search_bar
            .as_ref()
            .is_some_and(|bar| bar.read(cx).is_focused(window))
    }

    /// Capture-phase handler: runs before any focused element sees the key.
    fn on_key_down(&mut self, event: &KeyDownEvent, window: &mut Window, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;

        if self.help_open {
            if keystroke.key == "escape" {
                self.close_help(cx);
            }
            cx.stop_propagation();
            return;
        }

        let press = KeyPress::new(
            &keystroke.key,
            keystroke.key_char.as_deref(),
            KeyModifiers {
                control: keystroke.modifiers.control,
                alt: keystroke.modifiers.alt,
                shift: keystroke.modifiers.shift,
                platform: keystroke.modifiers.platform,
            },
        );
        if self.route_key(&press, window, cx) {
            cx.stop_propagation();
        }
    }

    /// Tab arrives as an action, ahead of the key-down listeners.
    fn on_tab(&mut self, shift: bool, window: &mut Window, cx: &mut Context<Self>) {
        if self.help_open {
            return;
        }
        if !self.route_key(&tab_press(shift), window, cx) {
            cx.propagate();
        }
    }

    /// Run `press` through the key router. Returns whether it was consumed.
    fn route_key(&self, press: &KeyPress<'_>, window: &mut Window, cx: &mut Context<Self>) -> bool {
        let text_entry_focused = self.text_entry_focused(window, cx);
        let router = KeyRouter::new()
            .with_application_cursor_keys(self.terminal.read(cx).application_cursor_keys());

        let mut host = ShellHost::new(&self.terminal, window, cx);
        router.handle(&mut host, press, text_entry_focused)
    }
}

impl Render for ShellView {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = self.palette;

        div()
            .id("mailshell")
            .key_context(KEY_CONTEXT)
            .size_full()
            .relative()
            .flex()
            .flex_row()
            .bg(palette.background)
            .text_color(palette.foreground)
            .capture_key_down(cx.listener(|this, event: &KeyDownEvent, window, cx| {
                this.on_key_down(event, window, cx);
            }))
            .on_action(cx.listener(|this, _: &SendTab, window, cx| {
                this.on_tab(false, window, cx);
            }))
            .on_action(cx.listener(|this, _: &SendShiftTab, window, cx| {
                this.on_tab(true, window, cx);
            }))
            .child(render_sidebar(self, cx))
            .child(
                div()
                    .flex_1()
                    .h_full()
                    .flex()
                    .flex_col()
                    .overflow_hidden()
                    .when_some(self.search_bar.clone(), |d, bar| d.child(bar))
                    .child(
                        div()
                            .flex_1()
                            .w_full()
                            .overflow_hidden()
                            .child(self.terminal.clone()),
                    ),
            )
            .when(self.help_open, |d| d.child(render_help(&palette, cx)))
    }
}
