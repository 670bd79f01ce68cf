//! Burn schedule API.

use {
    axum::{
        Router,
        extract::{Query, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{get, post},
    },
    serde::Deserialize,
    serde_json::json,
};

use emberdash_burn::{Error as BurnError, types::BurnSchedulePatch};

use crate::state::{AppState, error_response, internal_error};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_schedule_handler).put(put_schedule_handler))
        .route("/status", get(status_handler))
        .route(
            "/history",
            get(history_handler).delete(clear_history_handler),
        )
        .route("/run", post(run_handler))
}

async fn get_schedule_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.burn.config().await {
        Ok(schedule) => Json(schedule).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

async fn put_schedule_handler(
    State(state): State<AppState>,
    Json(patch): Json<BurnSchedulePatch>,
) -> impl IntoResponse {
    match state.burn.save_config(patch).await {
        Ok(schedule) => Json(schedule).into_response(),
        Err(e @ (BurnError::InvalidSchedule { .. } | BurnError::UnknownTimezone { .. })) => {
            error_response(StatusCode::BAD_REQUEST, e).into_response()
        },
        Err(e) => internal_error(e).into_response(),
    }
}

async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.burn.status().await {
        Ok(status) => Json(status).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

#[derive(Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    20
}

async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> impl IntoResponse {
    match state.burn.history(query.limit).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

async fn clear_history_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.burn.clear_history().await {
        Ok(()) => Json(json!({ "cleared": true })).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}

async fn run_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.burn.run_due_check_once().await {
        Ok(executed) => Json(json!({ "executed": executed })).into_response(),
        Err(e) => internal_error(e).into_response(),
    }
}
