//! Document-level pointer events
//!
//! The host publishes every pointer-down to a [`PointerEvents`] bus. Each
//! search widget holds a [`ClickOutsideSubscription`] that translates those
//! events into a [`HitTarget`] relative to itself. Dropping the
//! subscription unsubscribes it.

use crate::search::widget::HitTarget;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

/// Identifies one mounted widget on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

/// Part of a widget a pointer event can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Input,
    Popup,
}

/// A pointer-down anywhere in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerDown {
    Widget { id: WidgetId, region: Region },
    Elsewhere,
}

/// Broadcast bus for pointer-down events
#[derive(Debug, Clone)]
pub struct PointerEvents {
    tx: broadcast::Sender<PointerDown>,
    next_id: Arc<AtomicU64>,
}

impl PointerEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Publish an event; returns how many subscribers will see it
    pub fn publish(&self, event: PointerDown) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Start listening for clicks outside a new widget
    pub fn subscribe_click_outside(&self) -> ClickOutsideSubscription {
        ClickOutsideSubscription {
            id: WidgetId(self.next_id.fetch_add(1, Ordering::Relaxed)),
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for PointerEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

/// A widget's view of the pointer bus; unsubscribes on drop
#[derive(Debug)]
pub struct ClickOutsideSubscription {
    id: WidgetId,
    rx: broadcast::Receiver<PointerDown>,
}

impl ClickOutsideSubscription {
    /// Id the host uses when tagging events on this widget
    pub fn id(&self) -> WidgetId {
        self.id
    }

    fn classify(&self, event: PointerDown) -> HitTarget {
        match event {
            PointerDown::Widget { id, region } if id == self.id => match region {
                Region::Input => HitTarget::Input,
                Region::Popup => HitTarget::Popup,
            },
            _ => HitTarget::Outside,
        }
    }

    /// Wait for the next pointer-down; `None` once the bus is gone
    pub async fn recv(&mut self) -> Option<HitTarget> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(self.classify(event)),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Pointer subscription lagged, skipped {} events", skipped);
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published pointer-down, without waiting
    pub fn try_recv(&mut self) -> Option<HitTarget> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(self.classify(event)),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    warn!("Pointer subscription lagged, skipped {} events", skipped);
                }
                Err(_) => return None,
            }
        }
    }
}
