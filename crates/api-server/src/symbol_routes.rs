//! Symbol Routes
//!
//! Serves the symbol directory backing the company dropdown.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::symbols::SymbolEntry;
use crate::{ApiResponse, AppState};

#[derive(Serialize)]
pub struct SymbolListResponse {
    pub symbols: Vec<SymbolEntry>,
    pub count: usize,
}

pub fn symbol_routes() -> Router<AppState> {
    Router::new().route("/api/symbols", get(list_symbols))
}

async fn list_symbols(State(state): State<AppState>) -> Json<ApiResponse<SymbolListResponse>> {
    let symbols = state.symbols.entries().to_vec();
    let count = symbols.len();
    Json(ApiResponse::success(SymbolListResponse { symbols, count }))
}
