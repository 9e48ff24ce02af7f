//! Market Info backend wire types

use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shown in place of a missing sector or exchange
pub const NOT_AVAILABLE: &str = "N/A";

/// One company-search match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
}

impl Suggestion {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: None,
            sector: None,
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = Some(exchange.into());
        self
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Exchange for display, `N/A` when missing or blank
    pub fn exchange_label(&self) -> &str {
        display_or_na(self.exchange.as_deref())
    }

    /// Sector for display, `N/A` when missing or blank
    pub fn sector_label(&self) -> &str {
        display_or_na(self.sector.as_deref())
    }
}

fn display_or_na(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE,
    }
}

/// Chart timeframe accepted by the history endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[default]
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "10Y")]
    TenYears,
}

impl Timeframe {
    pub const ALL: [Timeframe; 6] = [
        Timeframe::OneDay,
        Timeframe::OneWeek,
        Timeframe::OneMonth,
        Timeframe::SixMonths,
        Timeframe::OneYear,
        Timeframe::TenYears,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::OneWeek => "1W",
            Timeframe::OneMonth => "1M",
            Timeframe::SixMonths => "6M",
            Timeframe::OneYear => "1Y",
            Timeframe::TenYears => "10Y",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let upper = s.trim().to_uppercase();
        Timeframe::ALL
            .into_iter()
            .find(|tf| tf.as_str() == upper)
            .ok_or_else(|| AppError::Validation(format!("Unknown timeframe: {}", s)))
    }
}

/// Company profile plus real-time price, as served by `/api/stock/{ticker}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSnapshot {
    pub ticker: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub listed_on: Option<String>,
    #[serde(default)]
    pub number: Option<String>,

    // Populated with `advanced=true`
    #[serde(default)]
    pub cik: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub post_code: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub primary_exchange: Option<String>,
    #[serde(default)]
    pub share_class_figi: Option<String>,
    #[serde(default)]
    pub composite_figi: Option<String>,
    #[serde(default)]
    pub last_updated_utc: Option<String>,
    #[serde(default)]
    pub round_lot: Option<i64>,
    #[serde(default, rename = "type")]
    pub security_type: Option<String>,

    // Populated with `dividend=true`
    #[serde(default)]
    pub dividend_cash_amount: Option<f64>,
    #[serde(default)]
    pub dividend_declaration_date: Option<String>,
    #[serde(default)]
    pub dividend_type: Option<String>,
    #[serde(default)]
    pub ex_dividend_date: Option<String>,
    #[serde(default)]
    pub frequency: Option<i64>,
    #[serde(default)]
    pub pay_date: Option<String>,

    #[serde(default)]
    pub real_time_price: Option<f64>,
    #[serde(default)]
    pub price_change: Option<f64>,
    #[serde(default)]
    pub percent_change: Option<f64>,
}

/// Daily OHLC bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Unix seconds
    pub t: i64,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

impl Candle {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.t, 0)
    }
}

/// Dividend paid on a given day, plotted at that day's close
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DividendMarker {
    pub t: i64,
    pub y: f64,
    pub amount: f64,
}

/// Response of `/api/stock/{ticker}/history`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHistory {
    pub timeframe: Timeframe,
    #[serde(default)]
    pub candles: Vec<Candle>,
    #[serde(default)]
    pub dividends: Vec<DividendMarker>,
}
