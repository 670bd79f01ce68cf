//! Expense tracking and daily balance snapshots.

pub mod book;
pub mod error;
pub mod types;

pub use {
    book::ExpenseBook,
    error::{Error, Result},
    types::{BalanceSnapshot, CategoryTotal, Expense, ExpenseCreate},
};
