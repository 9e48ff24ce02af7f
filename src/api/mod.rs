//! Market Info backend API
//!
//! Typed access to the three endpoints the lookup dashboard uses:
//! - `/api/companies` (company search, feeds the symbol search widget)
//! - `/api/stock/{ticker}` (profile and real-time price)
//! - `/api/stock/{ticker}/history` (daily candles and dividends)

mod client;
mod types;

pub use client::MarketApiClient;
pub use types::{
    Candle, DividendMarker, StockHistory, StockSnapshot, Suggestion, Timeframe, NOT_AVAILABLE,
};
