//! Spot price API.

use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
};

use emberdash_prices::Error as PriceError;

use crate::state::{AppState, error_response};

pub fn router() -> Router<AppState> {
    Router::new().route("/{pair}", get(spot_handler))
}

async fn spot_handler(
    State(state): State<AppState>,
    Path(pair): Path<String>,
) -> impl IntoResponse {
    match state.prices.spot(&pair).await {
        Ok(price) => Json(price).into_response(),
        Err(e @ PriceError::InvalidPair { .. }) => {
            error_response(StatusCode::BAD_REQUEST, e).into_response()
        },
        Err(e @ PriceError::Request(_)) => {
            error_response(StatusCode::BAD_GATEWAY, e).into_response()
        },
    }
}
