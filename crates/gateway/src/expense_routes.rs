//! Expense tracking API.

use {
    axum::{
        Router,
        extract::{Path, State},
        http::StatusCode,
        response::{IntoResponse, Json},
        routing::{delete, get},
    },
    serde_json::json,
};

use emberdash_expenses::{Error as ExpenseError, ExpenseCreate, types::CATEGORIES};

use crate::state::{AppState, error_response};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_handler).post(add_handler))
        .route("/categories", get(categories_handler))
        .route("/summary", get(summary_handler))
        .route("/{id}", delete(remove_handler))
}

async fn categories_handler() -> Json<serde_json::Value> {
    Json(
        CATEGORIES
            .iter()
            .map(|(id, label)| json!({ "id": id, "label": label }))
            .collect(),
    )
}

fn expense_error(e: ExpenseError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match e {
        ExpenseError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
        ExpenseError::NotFound { .. } => StatusCode::NOT_FOUND,
        ExpenseError::Store(_) | ExpenseError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, e)
}

async fn list_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.expenses.list().await {
        Ok(expenses) => Json(expenses).into_response(),
        Err(e) => expense_error(e).into_response(),
    }
}

async fn add_handler(
    State(state): State<AppState>,
    Json(create): Json<ExpenseCreate>,
) -> impl IntoResponse {
    match state.expenses.add(create).await {
        Ok(expense) => (StatusCode::CREATED, Json(expense)).into_response(),
        Err(e) => expense_error(e).into_response(),
    }
}

async fn remove_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.expenses.remove(&id).await {
        Ok(()) => Json(json!({ "removed": id })).into_response(),
        Err(e) => expense_error(e).into_response(),
    }
}

async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    let total = match state.expenses.total().await {
        Ok(total) => total,
        Err(e) => return expense_error(e).into_response(),
    };
    match state.expenses.totals_by_category().await {
        Ok(by_category) => Json(json!({
            "total": total,
            "byCategory": by_category,
        }))
        .into_response(),
        Err(e) => expense_error(e).into_response(),
    }
}
