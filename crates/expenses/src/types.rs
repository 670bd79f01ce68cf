//! Expense and balance-history types.

use serde::{Deserialize, Serialize};

/// Fixed category ids the dashboard groups expenses under.
pub const CATEGORIES: &[(&str, &str)] = &[
    ("food", "Food"),
    ("entertainment", "Entertainment"),
    ("transport", "Transport"),
    ("utilities", "Utilities"),
    ("shopping", "Shopping"),
    ("crypto", "Crypto/Gas"),
    ("other", "Other"),
];

/// A single recorded expense. `date` is an ISO 8601 timestamp string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

/// Input for recording an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCreate {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

/// One day's balance for the history chart. `date` is `YYYY-MM-DD`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSnapshot {
    pub date: String,
    pub balance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,
}

/// Aggregated spend per category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}
