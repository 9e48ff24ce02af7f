//! Ticker symbol search
//!
//! Headless autocomplete: [`SymbolSearch`] is the widget state,
//! [`SearchController`] drives it on a tokio runtime against any
//! [`SuggestionSource`], and [`PointerEvents`] delivers document-level
//! clicks so the popup can close when the user clicks elsewhere.

mod controller;
mod pointer;
mod source;
mod widget;

pub use controller::{SearchController, UiEvent};
pub use pointer::{ClickOutsideSubscription, PointerDown, PointerEvents, Region, WidgetId};
pub use source::SuggestionSource;
pub use widget::{HitTarget, Key, SearchRequest, SearchResponse, SymbolSearch};
