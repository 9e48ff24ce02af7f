//! Event-loop driver for a [`SymbolSearch`] widget
//!
//! Owns the widget and runs its searches as tokio tasks:
//! - waits out the debounce period before hitting the network
//! - aborts the previous task when a newer request supersedes it
//! - routes responses back by sequence number
//! - listens for clicks outside the widget until it is torn down

use crate::search::pointer::{ClickOutsideSubscription, PointerEvents, WidgetId};
use crate::search::source::SuggestionSource;
use crate::search::widget::{Key, SearchRequest, SearchResponse, SymbolSearch};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Input events for the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    TextChanged(String),
    Focus,
    KeyDown(Key),
    SuggestionHovered(usize),
    SuggestionClicked(usize),
}

/// Drives one mounted search widget
pub struct SearchController {
    widget: SymbolSearch,
    source: Arc<dyn SuggestionSource>,
    debounce: Duration,
    responses_tx: mpsc::UnboundedSender<SearchResponse>,
    responses_rx: mpsc::UnboundedReceiver<SearchResponse>,
    in_flight: Option<JoinHandle<()>>,
    click_outside: ClickOutsideSubscription,
}

impl SearchController {
    pub fn new(
        widget: SymbolSearch,
        source: Arc<dyn SuggestionSource>,
        debounce: Duration,
        pointer: &PointerEvents,
    ) -> Self {
        let (responses_tx, responses_rx) = mpsc::unbounded_channel();
        let click_outside = pointer.subscribe_click_outside();
        debug!("Search widget {:?} mounted", click_outside.id());

        Self {
            widget,
            source,
            debounce,
            responses_tx,
            responses_rx,
            in_flight: None,
            click_outside,
        }
    }

    pub fn widget(&self) -> &SymbolSearch {
        &self.widget
    }

    /// Id to tag pointer events on this widget's input and popup with
    pub fn id(&self) -> WidgetId {
        self.click_outside.id()
    }

    /// Apply one input event
    pub fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::TextChanged(text) => match self.widget.on_text_changed(text) {
                Some(request) => self.issue(request),
                None => self.cancel_in_flight(),
            },
            UiEvent::Focus => self.widget.on_focus(),
            UiEvent::KeyDown(key) => {
                self.widget.on_key_down(key);
                if !self.widget.is_pending() {
                    self.cancel_in_flight();
                }
            }
            UiEvent::SuggestionHovered(index) => self.widget.on_suggestion_hovered(index),
            UiEvent::SuggestionClicked(index) => {
                if self.widget.on_suggestion_activated(index) {
                    self.cancel_in_flight();
                }
            }
        }
    }

    /// Handle pointer-downs already published to the bus
    pub fn drain_pointer_events(&mut self) {
        while let Some(target) = self.click_outside.try_recv() {
            self.widget.on_click_outside(target);
        }
    }

    /// Wait until the outstanding search, if any, has been applied
    pub async fn settle(&mut self) {
        while self.widget.is_pending() {
            match self.responses_rx.recv().await {
                Some(response) => {
                    self.widget.apply_response(response);
                }
                None => break,
            }
        }
    }

    /// Run until `events` closes, then tear down and hand the widget back
    pub async fn run(mut self, mut events: mpsc::Receiver<UiEvent>) -> SymbolSearch {
        info!("Search widget {:?} running", self.id());

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event),
                    None => break,
                },
                Some(response) = self.responses_rx.recv() => {
                    self.widget.apply_response(response);
                }
                Some(target) = self.click_outside.recv() => {
                    self.widget.on_click_outside(target);
                }
            }
        }

        info!("Search widget {:?} unmounted", self.id());
        self.into_widget()
    }

    /// Tear down: cancel the pending search and release the pointer subscription
    pub fn into_widget(mut self) -> SymbolSearch {
        self.cancel_in_flight();
        std::mem::replace(&mut self.widget, SymbolSearch::new(|_| {}))
    }

    fn issue(&mut self, request: SearchRequest) {
        self.cancel_in_flight();

        let source = self.source.clone();
        let tx = self.responses_tx.clone();
        let debounce = self.debounce;

        self.in_flight = Some(tokio::spawn(async move {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }
            let result = source.search(&request.query).await;
            // Receiver gone means the widget was unmounted
            let _ = tx.send(SearchResponse {
                seq: request.seq,
                result,
            });
        }));
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
