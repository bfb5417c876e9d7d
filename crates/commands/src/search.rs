//! Search composer: flattens a query into keystrokes for the mail client's
//! notmuch query prompt.

use crate::command_table::{Action, NEWLINE};
use crate::host::Host;

/// Date-range filter applied before the search term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateRange {
    #[default]
    Any,
    Today,
    Week,
    Month,
}

impl DateRange {
    pub const ALL: [DateRange; 4] = [
        DateRange::Any,
        DateRange::Today,
        DateRange::Week,
        DateRange::Month,
    ];

    /// Query-language token, trailing space included. `None` for [`DateRange::Any`].
    pub const fn token(self) -> Option<&'static str> {
        match self {
            DateRange::Any => None,
            DateRange::Today => Some("date:today "),
            DateRange::Week => Some("date:7d.. "),
            DateRange::Month => Some("date:1m.. "),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DateRange::Any => "Any date",
            DateRange::Today => "Today",
            DateRange::Week => "7 days",
            DateRange::Month => "1 month",
        }
    }
}

/// Field the free-text term is matched against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldPrefix {
    #[default]
    None,
    From,
    Subject,
}

impl FieldPrefix {
    pub const ALL: [FieldPrefix; 3] = [FieldPrefix::None, FieldPrefix::From, FieldPrefix::Subject];

    pub const fn token(self) -> Option<&'static str> {
        match self {
            FieldPrefix::None => None,
            FieldPrefix::From => Some("from:"),
            FieldPrefix::Subject => Some("subject:"),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FieldPrefix::None => "All",
            FieldPrefix::From => "From",
            FieldPrefix::Subject => "Subject",
        }
    }
}

/// A search as entered in the search bar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub date: DateRange,
    pub field: FieldPrefix,
    pub term: String,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>, field: FieldPrefix, date: DateRange) -> Self {
        Self {
            date,
            field,
            term: term.into(),
        }
    }

    /// No text and no date filter: submitting does nothing.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.date == DateRange::Any
    }

    /// Ordered writes for this query. Empty when [`Self::is_empty`].
    ///
    /// Order follows the query grammar: invoke, date, field, term, newline.
    pub fn writes(&self) -> Vec<&[u8]> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut writes: Vec<&[u8]> = Vec::with_capacity(5);
        writes.push(Action::Search.keys());
        if let Some(token) = self.date.token() {
            writes.push(token.as_bytes());
        }
        if let Some(token) = self.field.token() {
            writes.push(token.as_bytes());
        }
        if !self.term.is_empty() {
            writes.push(self.term.as_bytes());
        }
        writes.push(NEWLINE);
        writes
    }

    /// Send the query to the session. Returns `false` for a no-op submit.
    ///
    /// On success focus moves back to the session; clearing the entry is left
    /// to the caller, which owns it.
    pub fn submit<H: Host + ?Sized>(&self, host: &mut H) -> bool {
        let writes = self.writes();
        if writes.is_empty() {
            tracing::debug!("Empty search submitted, ignoring");
            return false;
        }

        tracing::debug!(
            date = ?self.date,
            field = ?self.field,
            term_len = self.term.len(),
            "Submitting search"
        );
        for bytes in writes {
            host.write(bytes);
        }
        host.focus_session();
        true
    }
}
