//! Suggestion source abstraction

use crate::api::Suggestion;
use crate::error::Result;
use async_trait::async_trait;

/// Anything that can answer a company search
///
/// `MarketApiClient` is the production implementation; the widget itself
/// never touches the network directly.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Return matches for `query` in relevance order
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>>;
}
