//! Market Info - ticker lookup
//!
//! A headless symbol search widget with debounced, cancellable remote
//! lookups, a typed client for the Market Info backend, and the company
//! search server that backs it.

pub mod api;
pub mod config;
pub mod error;
pub mod search;
pub mod server;
pub mod services;
pub mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging
///
/// `RUST_LOG` overrides the default filter. Safe to call more than once;
/// later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_info=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
