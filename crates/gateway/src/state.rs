//! Shared app state handed to every route handler.

use std::sync::Arc;

use {
    axum::{http::StatusCode, response::Json},
    serde_json::{Value, json},
};

use {
    emberdash_burn::service::BurnService,
    emberdash_expenses::ExpenseBook,
    emberdash_prices::CachedPrices,
    emberdash_wallets::WalletRegistry,
};

#[derive(Clone)]
pub struct AppState {
    pub burn: Arc<BurnService>,
    pub wallets: Arc<WalletRegistry>,
    pub expenses: Arc<ExpenseBook>,
    pub prices: Arc<CachedPrices>,
}

/// Uniform JSON error body.
pub fn error_response(status: StatusCode, message: impl ToString) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "error": message.to_string() })))
}

pub fn internal_error(message: impl ToString) -> (StatusCode, Json<Value>) {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}
