//! Config schema with serde defaults for every field.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmberdashConfig {
    pub server: ServerConfig,
    /// Overrides the platform data dir when set.
    pub data_dir: Option<PathBuf>,
    pub signer: SignerConfig,
    pub prices: PricesConfig,
    pub schedule: ScheduleConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 5870,
        }
    }
}

/// External wallet-signing service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SignerConfig {
    /// Base URL of the signing service. Scheduled burns fail with a
    /// configuration error until this is set.
    pub url: Option<String>,
    /// Burn to the 0x…0369 vanity address instead of the dead address.
    pub resonant_369: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PricesConfig {
    pub base_url: String,
    pub cache_ttl_secs: u64,
}

impl Default for PricesConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coinbase.com".to_string(),
            cache_ttl_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ScheduleConfig {
    /// Optional bound on the external signing call. Unset waits
    /// indefinitely.
    pub invoke_timeout_secs: Option<u64>,
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EmberdashConfig::default();
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.server.port, 5870);
        assert!(cfg.signer.url.is_none());
        assert!(!cfg.signer.resonant_369);
        assert_eq!(cfg.prices.cache_ttl_secs, 60);
        assert!(cfg.schedule.invoke_timeout_secs.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let cfg: EmberdashConfig = toml::from_str(
            r#"
            [server]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.port, 9000);
        assert_eq!(cfg.server.bind, "127.0.0.1");
        assert_eq!(cfg.prices.base_url, "https://api.coinbase.com");
    }
}
