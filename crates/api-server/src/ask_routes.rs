//! Ask Routes
//!
//! The question-answering endpoint: resolves the requested symbol, runs
//! the aggregation pipeline and returns the model's answer.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::{ApiResponse, AppError, AppState};

/// Advisory the UI shows between queries; completion quota resets roughly
/// once a minute.
pub const COOLDOWN_NOTICE: &str =
    "Due to API rate limits, please allow a 1-minute interval between queries.";

#[derive(Deserialize)]
pub struct AskRequest {
    pub symbol: String,
    #[serde(default)]
    pub query: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub symbol: String,
    pub ticker: String,
    pub answer: String,
    pub notice: &'static str,
}

pub fn ask_routes() -> Router<AppState> {
    Router::new().route("/api/ask", post(ask))
}

async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<ApiResponse<AskResponse>>, AppError> {
    let symbol = request.symbol.trim().to_string();
    if symbol.is_empty() {
        return Ok(Json(ApiResponse::error("symbol must not be empty")));
    }

    // Unknown display symbols are treated as raw provider tickers.
    let ticker = state
        .symbols
        .resolve(&symbol)
        .unwrap_or(symbol.as_str())
        .to_string();

    tracing::info!("Answering query for {} ({})", symbol, ticker);
    let answer = state.engine.answer(&ticker, &request.query).await;

    Ok(Json(ApiResponse::success(AskResponse {
        symbol,
        ticker,
        answer,
        notice: COOLDOWN_NOTICE,
    })))
}
