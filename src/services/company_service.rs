//! Company Service
//!
//! Handles company search over the in-memory directory.
//! Called by the REST API.

use crate::api::Suggestion;
use crate::state::{AppState, Company};
use tracing::info;

/// Maximum matches returned per search
pub const SEARCH_LIMIT: usize = 10;

/// Company service for business logic
pub struct CompanyService;

impl CompanyService {
    /// Search companies by symbol or name
    ///
    /// The query is trimmed and matched case-insensitively as a substring of
    /// either field. Matches keep directory order. A blank query matches
    /// nothing.
    pub fn search_companies(state: &AppState, query: &str, limit: Option<usize>) -> Vec<Suggestion> {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return Vec::new();
        }

        info!("CompanyService::search_companies - query={}", query_lower);

        let limit = limit.unwrap_or(SEARCH_LIMIT);

        state
            .companies
            .read()
            .iter()
            .filter(|company| {
                let name = company.name.as_deref().unwrap_or_default();
                let symbol = company.symbol.as_deref().unwrap_or_default();
                name.to_lowercase().contains(&query_lower)
                    || symbol.to_lowercase().contains(&query_lower)
            })
            .take(limit)
            .map(Self::to_suggestion)
            .collect()
    }

    fn to_suggestion(company: &Company) -> Suggestion {
        Suggestion {
            symbol: company.symbol.clone().unwrap_or_default(),
            name: company.name.clone().unwrap_or_default(),
            exchange: Some(company.market_category.clone().unwrap_or_default()),
            sector: Some(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn company(symbol: &str, name: &str) -> Company {
        Company {
            symbol: Some(symbol.to_string()),
            name: Some(name.to_string()),
            market_category: Some("Q".to_string()),
        }
    }

    fn state(companies: Vec<Company>) -> AppState {
        AppState::with_companies(companies, PathBuf::from("companies.json"))
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let state = state(vec![company("AAPL", "Apple Inc.")]);

        assert!(CompanyService::search_companies(&state, "", None).is_empty());
        assert!(CompanyService::search_companies(&state, "   ", None).is_empty());
    }

    #[test]
    fn test_matches_symbol_or_name_case_insensitive() {
        let state = state(vec![
            company("AAPL", "Apple Inc."),
            company("PINE", "Pineapple Energy"),
            company("MSFT", "Microsoft Corporation"),
        ]);

        let results = CompanyService::search_companies(&state, " APPLE ", None);
        let symbols: Vec<&str> = results.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "PINE"]);

        let results = CompanyService::search_companies(&state, "msf", None);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Microsoft Corporation");
        assert_eq!(results[0].exchange.as_deref(), Some("Q"));
        assert_eq!(results[0].sector.as_deref(), Some(""));
        assert_eq!(results[0].sector_label(), "N/A");
    }

    #[test]
    fn test_results_capped_at_limit() {
        let companies = (0..25)
            .map(|i| company(&format!("T{}", i), &format!("Tech {}", i)))
            .collect();
        let state = state(companies);

        let results = CompanyService::search_companies(&state, "tech", None);

        assert_eq!(results.len(), SEARCH_LIMIT);
        assert_eq!(results[0].symbol, "T0");
        assert_eq!(results[9].symbol, "T9");
    }

    #[test]
    fn test_records_with_missing_fields() {
        let state = state(vec![Company {
            symbol: Some("XYZ".to_string()),
            name: None,
            market_category: None,
        }]);

        let results = CompanyService::search_companies(&state, "xyz", None);

        assert_eq!(results[0].name, "");
        assert_eq!(results[0].exchange_label(), "N/A");
    }
}
