//! Live wallet lookup backed by the wallet registry.

use std::sync::Arc;

use async_trait::async_trait;

use {
    emberdash_burn::service::{WalletBalance, WalletLookup},
    emberdash_wallets::WalletRegistry,
};

pub struct RegistryWalletLookup {
    registry: Arc<WalletRegistry>,
}

impl RegistryWalletLookup {
    pub fn new(registry: Arc<WalletRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl WalletLookup for RegistryWalletLookup {
    async fn find_wallet(&self, id: &str) -> emberdash_burn::Result<Option<WalletBalance>> {
        let wallet = self
            .registry
            .find(id)
            .await
            .map_err(|e| emberdash_burn::Error::registry(e.to_string()))?;
        Ok(wallet.map(|w| WalletBalance { balance: w.balance }))
    }
}
