//! Expense log and balance-history persistence.

use std::{collections::HashMap, sync::Arc};

use {
    chrono::{DateTime, Datelike, Utc},
    emberdash_store::KvStore,
    uuid::Uuid,
};

use crate::{
    Result,
    error::Error,
    types::{BalanceSnapshot, CategoryTotal, Expense, ExpenseCreate},
};

pub const EXPENSES_KEY: &str = "dashboard_expenses";
pub const BALANCE_HISTORY_KEY: &str = "balance_history";

/// Balance history keeps the most recent snapshots only.
pub const BALANCE_HISTORY_LIMIT: usize = 30;

pub struct ExpenseBook {
    kv: Arc<dyn KvStore>,
}

impl ExpenseBook {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    // ── Expenses ────────────────────────────────────────────────────────

    /// All expenses, newest first.
    pub async fn list(&self) -> Result<Vec<Expense>> {
        match self.kv.get(EXPENSES_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn add(&self, create: ExpenseCreate) -> Result<Expense> {
        parse_date(&create.date)?;

        let expense = Expense {
            id: format!("exp_{}", Uuid::new_v4()),
            amount: create.amount,
            category: create.category,
            description: create.description,
            date: create.date,
            wallet_id: create.wallet_id,
        };

        let mut expenses = self.list().await?;
        expenses.insert(0, expense.clone());
        self.save_expenses(&expenses).await?;
        Ok(expense)
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut expenses = self.list().await?;
        let before = expenses.len();
        expenses.retain(|e| e.id != id);
        if expenses.len() == before {
            return Err(Error::not_found(id));
        }
        self.save_expenses(&expenses).await
    }

    /// Spend per category, for the breakdown chart.
    pub async fn totals_by_category(&self) -> Result<Vec<CategoryTotal>> {
        let mut totals: HashMap<String, f64> = HashMap::new();
        for expense in self.list().await? {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
        let mut out: Vec<CategoryTotal> = totals
            .into_iter()
            .map(|(category, amount)| CategoryTotal { category, amount })
            .collect();
        out.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(out)
    }

    pub async fn total(&self) -> Result<f64> {
        Ok(self.list().await?.iter().map(|e| e.amount).sum())
    }

    /// Expenses dated in the month containing `now_ms`.
    pub async fn current_month(&self, now_ms: u64) -> Result<Vec<Expense>> {
        let now = DateTime::from_timestamp_millis(now_ms as i64)
            .ok_or_else(|| Error::invalid_date(now_ms.to_string()))?;
        let (year, month) = (now.year(), now.month());

        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|e| {
                parse_date(&e.date)
                    .map(|d| d.year() == year && d.month() == month)
                    .unwrap_or(false)
            })
            .collect())
    }

    // ── Balance history ─────────────────────────────────────────────────

    /// Snapshots, newest first.
    pub async fn balance_history(&self) -> Result<Vec<BalanceSnapshot>> {
        match self.kv.get(BALANCE_HISTORY_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Record today's balance. A snapshot for the same day and wallet is
    /// updated in place; the history is capped to
    /// [`BALANCE_HISTORY_LIMIT`] entries, oldest dropped.
    pub async fn record_snapshot(
        &self,
        now_ms: u64,
        balance: f64,
        wallet_id: Option<String>,
    ) -> Result<()> {
        let now = DateTime::from_timestamp_millis(now_ms as i64)
            .ok_or_else(|| Error::invalid_date(now_ms.to_string()))?;
        let today = now.format("%Y-%m-%d").to_string();

        let mut history = self.balance_history().await?;
        match history
            .iter_mut()
            .find(|s| s.date == today && s.wallet_id == wallet_id)
        {
            Some(existing) => existing.balance = balance,
            None => history.insert(0, BalanceSnapshot {
                date: today,
                balance,
                wallet_id,
            }),
        }

        history.sort_by(|a, b| b.date.cmp(&a.date));
        history.truncate(BALANCE_HISTORY_LIMIT);

        self.kv
            .set(BALANCE_HISTORY_KEY, serde_json::to_value(&history)?)
            .await?;
        Ok(())
    }

    /// The last `days` snapshots, oldest first (chart order).
    pub async fn recent_history(&self, days: usize) -> Result<Vec<BalanceSnapshot>> {
        let mut history = self.balance_history().await?;
        history.truncate(days);
        history.reverse();
        Ok(history)
    }

    async fn save_expenses(&self, expenses: &[Expense]) -> Result<()> {
        self.kv
            .set(EXPENSES_KEY, serde_json::to_value(expenses)?)
            .await?;
        Ok(())
    }
}

fn parse_date(date: &str) -> Result<DateTime<Utc>> {
    date.parse::<DateTime<Utc>>()
        .map_err(|_| Error::invalid_date(date))
}
