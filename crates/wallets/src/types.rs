//! Wallet record types.

use serde::{Deserialize, Serialize};

/// How a wallet entered the registry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Metamask,
    Coinbase,
    /// Watch-only address added by hand.
    Manual,
}

/// A tracked wallet. `balance` is a decimal-as-string, refreshed by callers
/// that talk to the chain; the registry itself never fetches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub address: String,
    pub balance: String,
    pub label: String,
    pub kind: WalletKind,
    pub is_connected: bool,
}

/// Input for registering a wallet (id is assigned by the registry).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletCreate {
    pub address: String,
    #[serde(default)]
    pub balance: Option<String>,
    pub label: String,
    pub kind: WalletKind,
    #[serde(default)]
    pub is_connected: bool,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_roundtrip() {
        let wallet = Wallet {
            id: "wallet_1".into(),
            address: "0x0000000000000000000000000000000000000001".into(),
            balance: "1.5".into(),
            label: "Main".into(),
            kind: WalletKind::Metamask,
            is_connected: true,
        };
        let json = serde_json::to_string(&wallet).unwrap();
        assert!(json.contains("\"kind\":\"metamask\""));
        assert!(json.contains("isConnected"));
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(wallet, back);
    }
}
