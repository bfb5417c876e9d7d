//! Search bar above the terminal.
//!
//! Editing happens here; turning a submitted query into keystrokes is left to
//! the shell, which owns the session.

use commands::{DateRange, FieldPrefix, SearchQuery};
use gpui::prelude::FluentBuilder;
use gpui::*;
use settings::constants::search_bar::{HEIGHT, MAX_QUERY_LENGTH};
use settings::SearchLayout;
use terminal_view::Palette;

/// A non-empty query the user submitted.
#[derive(Clone, Debug)]
pub(crate) struct SearchSubmitted(pub SearchQuery);

/// Text and selector state, kept apart from the view for testing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SearchBarState {
    text: String,
    field: FieldPrefix,
    date: DateRange,
}

impl SearchBarState {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Append typed text. Control characters are dropped and the length is capped.
    pub fn insert(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars().filter(|c| !c.is_control()) {
            if self.text.len() + c.len_utf8() > MAX_QUERY_LENGTH {
                break;
            }
            self.text.push(c);
            changed = true;
        }
        changed
    }

    pub fn backspace(&mut self) -> bool {
        self.text.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn field(&self) -> FieldPrefix {
        self.field
    }

    pub fn set_field(&mut self, field: FieldPrefix) {
        self.field = field;
    }

    pub fn date(&self) -> DateRange {
        self.date
    }

    pub fn set_date(&mut self, date: DateRange) {
        self.date = date;
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.text.clone(), self.field, self.date)
    }

    /// The query to send, clearing the text. `None` when there is nothing to send.
    pub fn take_submission(&mut self) -> Option<SearchQuery> {
        let query = self.query();
        if query.is_empty() {
            return None;
        }
        self.clear();
        Some(query)
    }
}

pub(crate) struct SearchBar {
    state: SearchBarState,
    date_filter: bool,
    placeholder: SharedString,
    palette: Palette,
    focus_handle: FocusHandle,
}

impl EventEmitter<SearchSubmitted> for SearchBar {}

impl SearchBar {
    pub fn new(layout: &SearchLayout, palette: Palette, cx: &mut Context<Self>) -> Self {
        Self {
            state: SearchBarState::default(),
            date_filter: layout.date_filter,
            placeholder: layout.placeholder.clone().into(),
            palette,
            focus_handle: cx.focus_handle(),
        }
    }

    pub fn is_focused(&self, window: &Window) -> bool {
        self.focus_handle.is_focused(window)
    }

    fn submit(&mut self, cx: &mut Context<Self>) {
        match self.state.take_submission() {
            Some(query) => {
                cx.emit(SearchSubmitted(query));
                cx.notify();
            }
            None => tracing::debug!("Empty search, nothing to submit"),
        }
    }

    fn on_key_down(&mut self, event: &KeyDownEvent, cx: &mut Context<Self>) {
        let keystroke = &event.keystroke;
        let mods = &keystroke.modifiers;

        let changed = match keystroke.key.as_str() {
            "enter" => {
                self.submit(cx);
                false
            }
            "backspace" => self.state.backspace(),
            "escape" => {
                self.state.clear();
                true
            }
            _ if mods.control || mods.platform || mods.alt => false,
            _ => keystroke
                .key_char
                .as_deref()
                .is_some_and(|text| self.state.insert(text)),
        };
        if changed {
            cx.notify();
        }
    }

    fn render_segment(
        &self,
        id: String,
        label: &'static str,
        selected: bool,
        on_select: impl Fn(&mut SearchBarState) + 'static,
        cx: &mut Context<Self>,
    ) -> Stateful<Div> {
        let palette = self.palette;
        div()
            .id(ElementId::Name(id.into()))
            .px(px(8.0))
            .py(px(2.0))
            .rounded(px(4.0))
            .text_size(px(12.0))
            .cursor_pointer()
            .when(selected, |d| {
                d.bg(palette.surface_hover).text_color(palette.accent)
            })
            .when(!selected, |d| {
                d.text_color(palette.muted)
                    .hover(|d| d.bg(palette.surface))
            })
            .on_click(cx.listener(move |this, _: &ClickEvent, _window, cx| {
                on_select(&mut this.state);
                cx.notify();
            }))
            .child(label)
    }
}

impl Focusable for SearchBar {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for SearchBar {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let palette = self.palette;
        let focused = self.is_focused(window);
        let is_empty = self.state.text().is_empty();
        let display: SharedString = if is_empty {
            self.placeholder.clone()
        } else {
            self.state.text().to_string().into()
        };

        let fields = FieldPrefix::ALL.into_iter().enumerate().map(|(idx, field)| {
            self.render_segment(
                format!("search-field-{}", idx),
                field.label(),
                self.state.field() == field,
                move |state| state.set_field(field),
                cx,
            )
        });
        let fields: Vec<Stateful<Div>> = fields.collect();

        let dates: Vec<Stateful<Div>> = if self.date_filter {
            DateRange::ALL
                .into_iter()
                .enumerate()
                .map(|(idx, date)| {
                    self.render_segment(
                        format!("search-date-{}", idx),
                        date.label(),
                        self.state.date() == date,
                        move |state| state.set_date(date),
                        cx,
                    )
                })
                .collect()
        } else {
            Vec::new()
        };

        div()
            .id("search-bar")
            .track_focus(&self.focus_handle)
            .on_key_down(cx.listener(|this, event: &KeyDownEvent, _window, cx| {
                this.on_key_down(event, cx);
            }))
            .h(px(HEIGHT))
            .w_full()
            .flex_none()
            .flex()
            .flex_row()
            .items_center()
            .gap(px(8.0))
            .px(px(8.0))
            .bg(palette.sidebar)
            .border_b_1()
            .border_color(palette.border)
            .child(
                div()
                    .id("search-input")
                    .flex_1()
                    .h(px(HEIGHT - 10.0))
                    .px(px(8.0))
                    .flex()
                    .items_center()
                    .overflow_hidden()
                    .rounded(px(4.0))
                    .border_1()
                    .border_color(if focused {
                        palette.accent
                    } else {
                        palette.border
                    })
                    .bg(palette.background)
                    .text_sm()
                    .cursor_text()
                    .on_click(cx.listener(|this, _: &ClickEvent, window, _cx| {
                        window.focus(&this.focus_handle);
                    }))
                    .child(
                        div()
                            .when(is_empty, |d| d.text_color(palette.muted))
                            .when(!is_empty, |d| d.text_color(palette.foreground))
                            .child(display),
                    )
                    .when(focused, |d| {
                        d.child(div().w(px(1.0)).h(px(14.0)).bg(palette.cursor))
                    }),
            )
            .child(div().flex().flex_row().children(fields))
            .when(self.date_filter, |d| {
                d.child(
                    div()
                        .flex()
                        .flex_row()
                        .border_l_1()
                        .border_color(palette.border)
                        .pl(px(8.0))
                        .children(dates),
                )
            })
            .child(
                div()
                    .id("search-submit")
                    .px(px(10.0))
                    .py(px(3.0))
                    .rounded(px(4.0))
                    .text_sm()
                    .cursor_pointer()
                    .bg(palette.surface)
                    .text_color(palette.foreground)
                    .hover(|d| d.bg(palette.surface_hover))
                    .on_click(cx.listener(|this, _: &ClickEvent, _window, cx| {
                        this.submit(cx);
                    }))
                    .child("Search"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn typing_builds_the_term() {
        let mut state = SearchBarState::default();
        assert!(state.insert("from "));
        assert!(state.insert("alice"));
        assert_eq!(state.text(), "from alice");
    }

    #[test]
    fn control_characters_are_dropped() {
        let mut state = SearchBarState::default();
        assert!(!state.insert("\u{1b}\n"));
        assert!(state.insert("a\tb"));
        assert_eq!(state.text(), "ab");
    }

    #[test]
    fn length_is_capped() {
        let mut state = SearchBarState::default();
        state.insert(&"x".repeat(MAX_QUERY_LENGTH));
        assert!(!state.insert("y"));
        assert_eq!(state.text().len(), MAX_QUERY_LENGTH);
    }

    #[test]
    fn backspace_on_empty_is_a_no_op() {
        let mut state = SearchBarState::default();
        assert!(!state.backspace());
        state.insert("ab");
        assert!(state.backspace());
        assert_eq!(state.text(), "a");
    }

    #[test]
    fn empty_text_without_date_submits_nothing() {
        let mut state = SearchBarState::default();
        state.set_field(FieldPrefix::From);
        assert_eq!(state.take_submission(), None);
    }

    #[test_case(DateRange::Today ; "today")]
    #[test_case(DateRange::Month ; "month")]
    fn date_alone_is_a_valid_search(date: DateRange) {
        let mut state = SearchBarState::default();
        state.set_date(date);
        let query = state.take_submission().unwrap();
        assert_eq!(query.date, date);
        assert!(query.term.is_empty());
    }

    #[test]
    fn submission_clears_text_but_keeps_selectors() {
        let mut state = SearchBarState::default();
        state.insert("invoice");
        state.set_field(FieldPrefix::Subject);
        state.set_date(DateRange::Week);

        let query = state.take_submission().unwrap();
        assert_eq!(
            query,
            SearchQuery::new("invoice", FieldPrefix::Subject, DateRange::Week)
        );
        assert_eq!(state.text(), "");
        assert_eq!(state.field(), FieldPrefix::Subject);
        assert_eq!(state.date(), DateRange::Week);
    }
}
