//! Wallet registry: labeled wallet records with cached balances, persisted
//! as one document in the key-value store.

pub mod error;
pub mod registry;
pub mod types;

pub use {
    error::{Error, Result},
    registry::WalletRegistry,
    types::{Wallet, WalletCreate, WalletKind},
};
