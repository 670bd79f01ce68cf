//! HTTP client for the spot-price endpoint.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A spot quote. `amount` stays a decimal-as-string, exactly as the upstream
/// reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpotPrice {
    pub base: String,
    pub currency: String,
    pub amount: String,
}

#[derive(Debug, Deserialize)]
struct SpotResponse {
    data: SpotPrice,
}

pub struct PriceClient {
    client: reqwest::Client,
    base_url: String,
}

impl PriceClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    /// Fetch the spot price for a pair like `BTC-USD`.
    pub async fn spot(&self, pair: &str) -> Result<SpotPrice> {
        let pair = normalize_pair(pair)?;
        let url = format!("{}/v2/prices/{pair}/spot", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<SpotResponse>()
            .await?;
        Ok(response.data)
    }
}

/// Uppercase `BASE-QUOTE`, alphanumeric symbols only.
fn normalize_pair(pair: &str) -> Result<String> {
    let upper = pair.trim().to_ascii_uppercase();
    let valid = match upper.split_once('-') {
        Some((base, quote)) => {
            !base.is_empty()
                && !quote.is_empty()
                && upper
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-')
        },
        None => false,
    };
    if valid {
        Ok(upper)
    } else {
        Err(Error::invalid_pair(pair))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_pair() {
        assert_eq!(normalize_pair("btc-usd").unwrap(), "BTC-USD");
        assert_eq!(normalize_pair(" ETH-USD ").unwrap(), "ETH-USD");
        assert!(normalize_pair("BTCUSD").is_err());
        assert!(normalize_pair("-USD").is_err());
        assert!(normalize_pair("BTC/USD").is_err());
    }

    #[tokio::test]
    async fn test_spot_parses_upstream_shape() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v2/prices/BTC-USD/spot")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":{"base":"BTC","currency":"USD","amount":"43250.00"}}"#)
            .create_async()
            .await;

        let client = PriceClient::new(reqwest::Client::new(), server.url());
        let price = client.spot("btc-usd").await.unwrap();

        mock.assert_async().await;
        assert_eq!(price, SpotPrice {
            base: "BTC".into(),
            currency: "USD".into(),
            amount: "43250.00".into(),
        });
    }

    #[tokio::test]
    async fn test_spot_upstream_error_is_surfaced() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/prices/DOGE-USD/spot")
            .with_status(500)
            .create_async()
            .await;

        let client = PriceClient::new(reqwest::Client::new(), server.url());
        assert!(client.spot("DOGE-USD").await.is_err());
    }
}
