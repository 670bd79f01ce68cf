//! Weekly token-burn scheduler.
//!
//! A single schedule per installation: a (day-of-week, time-of-day) pair, a
//! percentage of the source wallet's balance, and a token kind. A polling
//! service checks once a minute whether the next occurrence is due and, if
//! so, dispatches the burn through an external signing capability, records
//! the outcome in a capped history, and advances the schedule.
//!
//! Wallet balances, transaction signing, and the clock are capability traits
//! ([`service::WalletLookup`], [`service::BurnInvoker`], [`service::Clock`])
//! so the whole core runs against fakes in tests.

pub mod error;
pub mod schedule;
pub mod service;
pub mod store;
pub mod types;

pub use error::{Error, Result};
