//! TTL cache in front of the price client.

use std::{
    collections::HashMap,
    time::{Duration, Instant},
};

use {tokio::sync::Mutex, tracing::debug};

use crate::{
    Result,
    client::{PriceClient, SpotPrice},
};

/// Default time a quote stays fresh.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

pub struct CachedPrices {
    client: PriceClient,
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, SpotPrice)>>,
}

impl CachedPrices {
    pub fn new(client: PriceClient, ttl: Duration) -> Self {
        Self {
            client,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached quote when fresh, otherwise fetch and cache.
    /// A failed refresh does not evict a stale entry; it surfaces the error
    /// and leaves the cache for the next attempt.
    pub async fn spot(&self, pair: &str) -> Result<SpotPrice> {
        let key = pair.trim().to_ascii_uppercase();

        {
            let entries = self.entries.lock().await;
            if let Some((fetched_at, price)) = entries.get(&key)
                && fetched_at.elapsed() < self.ttl
            {
                debug!(pair = %key, "price served from cache");
                return Ok(price.clone());
            }
        }

        let price = self.client.spot(&key).await?;
        let mut entries = self.entries.lock().await;
        entries.insert(key, (Instant::now(), price.clone()));
        Ok(price)
    }
}
