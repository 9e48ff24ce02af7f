//! Company search REST API
//!
//! Serves the endpoint the symbol search widget queries:
//! `GET /api/companies?query=<text>` answers with at most ten
//! `{symbol, name, exchange, sector}` objects matched against the company
//! directory loaded at startup.

pub mod handlers;
#[allow(clippy::module_inception)]
mod server;

pub use server::{router, ApiServer};
