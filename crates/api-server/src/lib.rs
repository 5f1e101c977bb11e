//! HTTP surface for the grounded company Q&A pipeline.
//!
//! The server holds one engine and one read-only symbol directory for its
//! whole lifetime; requests are independent and share nothing mutable.

pub mod ask_routes;
pub mod symbol_routes;
pub mod symbols;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use context_engine::InsightEngine;
use gemini_client::{GeminiClient, GeminiConfig};
use serde::Serialize;
use crate::symbols::SymbolDirectory;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use yahoo_client::YahooClient;

/// Shared application state, constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<InsightEngine>,
    pub symbols: Arc<SymbolDirectory>,
}

/// Standard API response envelope.
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Converts any anyhow error into a 500 JSON response.
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::<()>::error(self.0.to_string())),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn health() -> &'static str {
    "ok"
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let symbols_file =
        std::env::var("SYMBOLS_FILE").unwrap_or_else(|_| "symbols.csv".to_string());
    let symbols = Arc::new(SymbolDirectory::load(&symbols_file)?);
    tracing::info!("Loaded {} symbols from {}", symbols.len(), symbols_file);

    let gemini_config = GeminiConfig::default();
    if gemini_config.api_key.is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; completion calls will fail");
    }

    let engine = Arc::new(InsightEngine::new(
        Arc::new(YahooClient::new()),
        Arc::new(GeminiClient::new(gemini_config)),
    ));

    let state = AppState { engine, symbols };

    let app = Router::new()
        .route("/health", get(health))
        .merge(ask_routes::ask_routes())
        .merge(symbol_routes::symbol_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
