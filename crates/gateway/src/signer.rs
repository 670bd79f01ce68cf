//! Burn invocation via an external wallet-signing service.
//!
//! The gateway never touches key material: it POSTs the transfer to a
//! configured signer which builds, signs, and submits the transaction, then
//! returns the hash.

use {async_trait::async_trait, serde::Deserialize, tracing::info};

use emberdash_burn::{
    Error, Result,
    service::BurnInvoker,
    types::TokenKind,
};

/// Conventional unspendable address.
pub const BURN_ADDRESS_DEAD: &str = "0x000000000000000000000000000000000000dEaD";
/// Vanity null address used in "resonant 369" mode.
pub const BURN_ADDRESS_369: &str = "0x0000000000000000000000000000000000000369";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignerResponse {
    tx_hash: String,
}

pub struct SignerBurnInvoker {
    client: reqwest::Client,
    base_url: Option<String>,
    burn_address: &'static str,
}

impl SignerBurnInvoker {
    pub fn new(client: reqwest::Client, base_url: Option<String>, resonant_369: bool) -> Self {
        let burn_address = if resonant_369 {
            BURN_ADDRESS_369
        } else {
            BURN_ADDRESS_DEAD
        };
        Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            burn_address,
        }
    }
}

#[async_trait]
impl BurnInvoker for SignerBurnInvoker {
    async fn invoke(&self, kind: TokenKind, amount: &str) -> Result<String> {
        match kind {
            TokenKind::Eth => {},
            TokenKind::Eternal369 | TokenKind::Sol => {
                return Err(Error::UnsupportedToken { kind });
            },
        }

        let base_url = self
            .base_url
            .as_deref()
            .ok_or_else(|| Error::invocation("signer url not configured"))?;

        info!(amount, to = self.burn_address, "submitting burn to signer");
        let response = self
            .client
            .post(format!("{base_url}/burn"))
            .json(&serde_json::json!({
                "to": self.burn_address,
                "amount": amount,
            }))
            .send()
            .await
            .map_err(|e| Error::invocation(e.to_string()))?
            .error_for_status()
            .map_err(|e| Error::invocation(e.to_string()))?
            .json::<SignerResponse>()
            .await
            .map_err(|e| Error::invocation(e.to_string()))?;

        Ok(response.tx_hash)
    }
}
