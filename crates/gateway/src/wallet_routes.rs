//! Wallet registry API.

use {
    axum::{
        Router,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{delete, get, put},
    },
    serde::Deserialize,
    serde_json::json,
};

use emberdash_wallets::{Error as WalletError, WalletCreate};

use crate::state::{AppState, error_response};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_handler).post(add_handler))
        .route("/total", get(total_handler))
        .route("/{id}", delete(remove_handler))
        .route("/{id}/label", put(label_handler))
        .route("/{id}/balance", put(balance_handler))
}

fn wallet_error(e: WalletError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        WalletError::InvalidAddress { .. } | WalletError::DuplicateAddress { .. } => {
            StatusCode::BAD_REQUEST
        },
        WalletError::NotFound { .. } => StatusCode::NOT_FOUND,
        WalletError::Store(_) | WalletError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, e)
}

async fn list_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.wallets.list().await {
        Ok(wallets) => Json(wallets).into_response(),
        Err(e) => wallet_error(e).into_response(),
    }
}

async fn add_handler(
    State(state): State<AppState>,
    Json(create): Json<WalletCreate>,
) -> impl IntoResponse {
    match state.wallets.add(create).await {
        Ok(wallet) => (StatusCode::CREATED, Json(wallet)).into_response(),
        Err(e) => wallet_error(e).into_response(),
    }
}

async fn remove_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.wallets.remove(&id).await {
        Ok(()) => Json(json!({ "removed": id })).into_response(),
        Err(e) => wallet_error(e).into_response(),
    }
}

#[derive(Deserialize)]
struct LabelBody {
    label: String,
}

async fn label_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<LabelBody>,
) -> impl IntoResponse {
    match state.wallets.update_label(&id, &body.label).await {
        Ok(wallet) => Json(wallet).into_response(),
        Err(e) => wallet_error(e).into_response(),
    }
}

#[derive(Deserialize)]
struct BalanceBody {
    balance: String,
}

async fn balance_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<BalanceBody>,
) -> impl IntoResponse {
    match state.wallets.update_balance(&id, &body.balance).await {
        Ok(wallet) => Json(wallet).into_response(),
        Err(e) => wallet_error(e).into_response(),
    }
}

async fn total_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.wallets.total_balance().await {
        Ok(total) => Json(json!({ "total": total })).into_response(),
        Err(e) => wallet_error(e).into_response(),
    }
}
