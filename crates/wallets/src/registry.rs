//! CRUD over the stored wallet list.

use std::sync::Arc;

use {emberdash_store::KvStore, tracing::info, uuid::Uuid};

use crate::{
    Result,
    error::Error,
    types::{Wallet, WalletCreate, WalletKind},
};

pub const WALLETS_KEY: &str = "dashboard_wallets";

pub struct WalletRegistry {
    kv: Arc<dyn KvStore>,
}

impl WalletRegistry {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    pub async fn list(&self) -> Result<Vec<Wallet>> {
        match self.kv.get(WALLETS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Register a wallet. Addresses are unique case-insensitively.
    pub async fn add(&self, create: WalletCreate) -> Result<Wallet> {
        if !is_valid_eth_address(&create.address) {
            return Err(Error::invalid_address(&create.address));
        }

        let mut wallets = self.list().await?;
        if wallets
            .iter()
            .any(|w| w.address.eq_ignore_ascii_case(&create.address))
        {
            return Err(Error::duplicate_address(&create.address));
        }

        let wallet = Wallet {
            id: format!("wallet_{}", Uuid::new_v4()),
            address: create.address,
            balance: create.balance.unwrap_or_else(|| "0".to_string()),
            label: create.label,
            kind: create.kind,
            is_connected: create.is_connected,
        };
        wallets.push(wallet.clone());
        self.save(&wallets).await?;

        info!(id = %wallet.id, label = %wallet.label, "wallet added");
        Ok(wallet)
    }

    /// Register a watch-only address.
    pub async fn add_manual(&self, address: &str, label: &str) -> Result<Wallet> {
        self.add(WalletCreate {
            address: address.to_string(),
            balance: None,
            label: label.to_string(),
            kind: WalletKind::Manual,
            is_connected: false,
        })
        .await
    }

    pub async fn remove(&self, id: &str) -> Result<()> {
        let mut wallets = self.list().await?;
        let before = wallets.len();
        wallets.retain(|w| w.id != id);
        if wallets.len() == before {
            return Err(Error::not_found(id));
        }
        self.save(&wallets).await?;
        info!(id, "wallet removed");
        Ok(())
    }

    pub async fn update_label(&self, id: &str, label: &str) -> Result<Wallet> {
        self.update(id, |w| w.label = label.to_string()).await
    }

    pub async fn update_balance(&self, id: &str, balance: &str) -> Result<Wallet> {
        self.update(id, |w| w.balance = balance.to_string()).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Wallet>> {
        Ok(self.list().await?.into_iter().find(|w| w.id == id))
    }

    /// Sum of all cached balances, 4 fractional digits.
    pub async fn total_balance(&self) -> Result<String> {
        let total: f64 = self
            .list()
            .await?
            .iter()
            .map(|w| w.balance.parse::<f64>().unwrap_or(0.0))
            .sum();
        Ok(format!("{total:.4}"))
    }

    async fn update<F: FnOnce(&mut Wallet)>(&self, id: &str, f: F) -> Result<Wallet> {
        let mut wallets = self.list().await?;
        let wallet = wallets
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| Error::not_found(id))?;
        f(wallet);
        let updated = wallet.clone();
        self.save(&wallets).await?;
        Ok(updated)
    }

    async fn save(&self, wallets: &[Wallet]) -> Result<()> {
        self.kv
            .set(WALLETS_KEY, serde_json::to_value(wallets)?)
            .await?;
        Ok(())
    }
}

/// `0x` followed by exactly 40 hex digits.
fn is_valid_eth_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}
