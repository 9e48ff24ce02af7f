//! HTTP server for the company search API
//!
//! Provides:
//! - Company search (/api/companies?query=...)
//! - Directory reload (/api/companies/reload)
//! - Health check (/health, /)
//! - Permissive CORS so the dashboard can call it from any origin

use crate::config::ServerConfig;
use crate::error::{AppError, Result};
use crate::server::handlers;
use crate::state::AppState;
use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Build the router with all routes and middleware
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::health_check))
        .route("/health", get(handlers::health_check))
        .route("/api/companies", get(handlers::search_companies))
        .route("/api/companies/reload", post(handlers::reload_companies))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// API server manager
pub struct ApiServer {
    state: Arc<AppState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            shutdown_tx: None,
        }
    }

    /// Bind and start serving in the background
    ///
    /// Returns the bound address, which differs from the configured one when
    /// port 0 is requested.
    pub async fn start(&mut self, config: &ServerConfig) -> Result<SocketAddr> {
        if self.is_running() {
            return Err(AppError::Internal("API server already running".to_string()));
        }

        let addr: SocketAddr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid address: {}", e)))?;

        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        let app = router(self.state.clone());

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
                info!("API server shutting down");
            });

            if let Err(e) = server.await {
                error!("API server error: {}", e);
            }
        });

        info!("Market Info API server listening on {}", local_addr);
        info!("  GET  http://{}/health", local_addr);
        info!("  GET  http://{}/api/companies?query=<text>", local_addr);

        Ok(local_addr)
    }

    /// Stop the server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            info!("API server stop signal sent");
        }
    }

    /// Check if server is running
    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }
}

impl Drop for ApiServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MarketApiClient;
    use crate::config::ClientConfig;
    use crate::search::{Key, PointerEvents, SearchController, SymbolSearch, UiEvent};
    use crate::state::Company;
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::time::Duration;

    fn company(symbol: &str, name: &str, category: &str) -> Company {
        Company {
            symbol: Some(symbol.to_string()),
            name: Some(name.to_string()),
            market_category: Some(category.to_string()),
        }
    }

    async fn start_server() -> (ApiServer, MarketApiClient) {
        let state = Arc::new(AppState::with_companies(
            vec![
                company("AAPL", "Apple Inc. - Common Stock", "Q"),
                company("AAL", "American Airlines Group Inc.", "Q"),
                company("MSFT", "Microsoft Corporation - Common Stock", "Q"),
            ],
            PathBuf::from("companies.json"),
        ));

        let mut server = ApiServer::new(state);
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..ServerConfig::default()
        };
        let addr = server.start(&config).await.unwrap();

        let client = MarketApiClient::new(&ClientConfig {
            base_url: format!("http://{}", addr),
            ..ClientConfig::default()
        })
        .unwrap();

        (server, client)
    }

    #[tokio::test]
    async fn test_company_search_endpoint() {
        let (_server, client) = start_server().await;

        let results = client.search_companies("aa").await.unwrap();
        let symbols: Vec<&str> = results.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "AAL"]);
        assert_eq!(results[0].exchange.as_deref(), Some("Q"));

        assert!(client.search_companies("   ").await.unwrap().is_empty());
        assert!(client.search_companies("common stock").await.unwrap().len() == 2);
    }

    #[tokio::test]
    async fn test_health_and_cors() {
        let (_server, client) = start_server().await;

        let response = reqwest::Client::new()
            .get(format!("{}/health", client.base_url()))
            .header("Origin", "https://example.com")
            .send()
            .await
            .unwrap();

        assert!(response.status().is_success());
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["companies"], 3);
    }

    #[tokio::test]
    async fn test_widget_against_live_server() {
        let (_server, client) = start_server().await;
        let selected = Arc::new(Mutex::new(Vec::new()));
        let sink = selected.clone();

        let pointer = PointerEvents::default();
        let mut ctl = SearchController::new(
            SymbolSearch::new(move |symbol| sink.lock().push(symbol.to_string())),
            Arc::new(client),
            Duration::ZERO,
            &pointer,
        );

        ctl.dispatch(UiEvent::TextChanged("micro".to_string()));
        ctl.settle().await;
        assert_eq!(ctl.widget().suggestions().len(), 1);

        ctl.dispatch(UiEvent::KeyDown(Key::ArrowDown));
        ctl.dispatch(UiEvent::KeyDown(Key::Enter));

        assert_eq!(selected.lock().as_slice(), ["MSFT".to_string()]);
    }

    #[tokio::test]
    async fn test_reload_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("companies.json");
        let state = Arc::new(AppState::with_companies(Vec::new(), path.clone()));
        let mut server = ApiServer::new(state);
        let addr = server
            .start(&ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                ..ServerConfig::default()
            })
            .await
            .unwrap();
        let url = format!("http://{}/api/companies/reload", addr);
        let http = reqwest::Client::new();

        let missing = http.post(&url).send().await.unwrap();
        assert_eq!(missing.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = missing.json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "IO_ERROR");

        std::fs::write(&path, r#"[{"Symbol": "NVDA", "Company Name": "NVIDIA Corporation"}]"#)
            .unwrap();
        let reloaded = http.post(&url).send().await.unwrap();
        assert!(reloaded.status().is_success());
        let body: serde_json::Value = reloaded.json().await.unwrap();
        assert_eq!(body["companies"], 1);
    }

    #[tokio::test]
    async fn test_stop_and_double_start() {
        let (mut server, _client) = start_server().await;
        assert!(server.is_running());

        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            ..ServerConfig::default()
        };
        assert!(server.start(&config).await.is_err());

        server.stop();
        assert!(!server.is_running());
    }
}
