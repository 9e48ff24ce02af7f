//! Symbol search widget state
//!
//! `SymbolSearch` holds everything the autocomplete input needs to render:
//! the query text, the current suggestion list, whether the popup is open
//! and which row is highlighted. It performs no I/O. Text changes hand back
//! a [`SearchRequest`] for the driver to execute, and the driver feeds the
//! outcome back through [`SymbolSearch::apply_response`].
//!
//! Every request carries a sequence number. Only the response to the most
//! recently issued request is applied, so a slow answer for an old query
//! can never replace the list for the current one.

use crate::api::Suggestion;
use crate::error::Result;
use std::fmt;
use tracing::{debug, warn};

/// Keys the widget reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

/// Where a pointer-down landed, relative to this widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Input,
    Popup,
    Outside,
}

/// A search the widget wants executed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub seq: u64,
    pub query: String,
}

/// Outcome of a [`SearchRequest`]
#[derive(Debug)]
pub struct SearchResponse {
    pub seq: u64,
    pub result: Result<Vec<Suggestion>>,
}

type SelectCallback = Box<dyn FnMut(&str) + Send>;

/// Autocomplete state for ticker lookup
pub struct SymbolSearch {
    query_text: String,
    suggestions: Vec<Suggestion>,
    popup_open: bool,
    highlighted: Option<usize>,
    /// Sequence number of the last request issued (or invalidated)
    latest_seq: u64,
    pending: bool,
    on_select: SelectCallback,
}

impl fmt::Debug for SymbolSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymbolSearch")
            .field("query_text", &self.query_text)
            .field("suggestions", &self.suggestions)
            .field("popup_open", &self.popup_open)
            .field("highlighted", &self.highlighted)
            .field("latest_seq", &self.latest_seq)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl SymbolSearch {
    /// Create a widget reporting selections to `on_select`
    ///
    /// The callback receives the symbol exactly as the server returned it.
    pub fn new(on_select: impl FnMut(&str) + Send + 'static) -> Self {
        Self {
            query_text: String::new(),
            suggestions: Vec::new(),
            popup_open: false,
            highlighted: None,
            latest_seq: 0,
            pending: false,
            on_select: Box::new(on_select),
        }
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn is_popup_open(&self) -> bool {
        self.popup_open
    }

    /// The dropdown is only drawn when open and there is something to show
    pub fn is_popup_visible(&self) -> bool {
        self.popup_open && !self.suggestions.is_empty()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted(&self) -> Option<&Suggestion> {
        self.highlighted.and_then(|i| self.suggestions.get(i))
    }

    /// Whether a request is outstanding for the current text
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Input text changed
    ///
    /// Returns the request to run, or `None` when the text is blank (the
    /// list is cleared and anything in flight is ignored).
    pub fn on_text_changed(&mut self, text: impl Into<String>) -> Option<SearchRequest> {
        self.query_text = text.into();
        self.popup_open = true;
        self.latest_seq += 1;

        if self.query_text.trim().is_empty() {
            self.suggestions.clear();
            self.highlighted = None;
            self.pending = false;
            return None;
        }

        self.pending = true;
        debug!("search #{} for {:?}", self.latest_seq, self.query_text);

        Some(SearchRequest {
            seq: self.latest_seq,
            query: self.query_text.clone(),
        })
    }

    /// Input gained focus
    pub fn on_focus(&mut self) {
        if !self.suggestions.is_empty() || self.pending {
            self.popup_open = true;
        }
    }

    /// Key pressed in the input; ignored while the popup is closed
    pub fn on_key_down(&mut self, key: Key) {
        if !self.popup_open {
            return;
        }

        match key {
            Key::ArrowDown => {
                if let Some(last) = self.suggestions.len().checked_sub(1) {
                    self.highlighted = Some(match self.highlighted {
                        Some(i) => (i + 1).min(last),
                        None => 0,
                    });
                }
            }
            Key::ArrowUp => {
                if !self.suggestions.is_empty() {
                    self.highlighted = Some(self.highlighted.map_or(0, |i| i.saturating_sub(1)));
                }
            }
            Key::Enter => {
                if let Some(index) = self.highlighted {
                    self.on_suggestion_activated(index);
                }
            }
            Key::Escape => self.popup_open = false,
            Key::Other => {}
        }
    }

    /// Pointer entered a suggestion row
    pub fn on_suggestion_hovered(&mut self, index: usize) {
        if index < self.suggestions.len() {
            self.highlighted = Some(index);
        }
    }

    /// Suggestion clicked or chosen with Enter
    ///
    /// Returns false if `index` is out of range.
    pub fn on_suggestion_activated(&mut self, index: usize) -> bool {
        let Some(item) = self.suggestions.get(index) else {
            return false;
        };
        let symbol = item.symbol.clone();

        debug!("selected {}", symbol);
        self.query_text = symbol.clone();
        (self.on_select)(&symbol);

        self.popup_open = false;
        self.suggestions.clear();
        self.highlighted = None;
        // Anything still in flight belongs to text the user has moved past
        self.latest_seq += 1;
        self.pending = false;
        true
    }

    /// Pointer went down somewhere in the document
    pub fn on_click_outside(&mut self, target: HitTarget) {
        if target == HitTarget::Outside {
            self.popup_open = false;
        }
    }

    /// Apply the outcome of a search
    ///
    /// Returns true if the response was current and has been applied.
    pub fn apply_response(&mut self, response: SearchResponse) -> bool {
        if response.seq != self.latest_seq || !self.pending {
            debug!(
                "dropping stale search response #{} (latest #{})",
                response.seq, self.latest_seq
            );
            return false;
        }

        self.pending = false;
        self.highlighted = None;

        match response.result {
            Ok(items) => {
                debug!("search #{} returned {} suggestions", response.seq, items.len());
                self.suggestions = items;
            }
            Err(e) => {
                warn!("Failed to fetch suggestions for {:?}: {}", self.query_text, e);
                self.suggestions.clear();
            }
        }

        true
    }
}
