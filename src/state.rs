//! Server state management

use crate::config::ServerConfig;
use crate::error::Result;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Company directory record, as stored in `companies.json`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "Symbol", default)]
    pub symbol: Option<String>,
    #[serde(rename = "Company Name", default)]
    pub name: Option<String>,
    #[serde(rename = "Market Category", default)]
    pub market_category: Option<String>,
}

/// State shared by all request handlers
pub struct AppState {
    /// Company directory, in file order
    pub companies: RwLock<Vec<Company>>,

    /// File the directory was loaded from
    pub companies_path: PathBuf,
}

impl AppState {
    /// Create state and load the company directory
    ///
    /// A missing or malformed file is logged and leaves the directory empty;
    /// search then answers `[]` for everything.
    pub fn new(config: &ServerConfig) -> Self {
        let companies = match load_companies(&config.companies_path) {
            Ok(companies) => {
                tracing::info!(
                    "Loaded {} companies from {:?}",
                    companies.len(),
                    config.companies_path
                );
                companies
            }
            Err(e) => {
                tracing::error!(
                    "Error loading {:?}: {}",
                    config.companies_path,
                    e
                );
                Vec::new()
            }
        };

        Self::with_companies(companies, config.companies_path.clone())
    }

    pub fn with_companies(companies: Vec<Company>, companies_path: PathBuf) -> Self {
        Self {
            companies: RwLock::new(companies),
            companies_path,
        }
    }

    /// Re-read the directory file, keeping the old data on failure
    pub fn reload(&self) -> Result<usize> {
        let companies = load_companies(&self.companies_path)?;
        let count = companies.len();
        *self.companies.write() = companies;
        tracing::info!("Reloaded {} companies", count);
        Ok(count)
    }

    pub fn company_count(&self) -> usize {
        self.companies.read().len()
    }
}

/// Parse a company directory file
pub fn load_companies(path: &Path) -> Result<Vec<Company>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
