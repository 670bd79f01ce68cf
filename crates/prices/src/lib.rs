//! Spot-price proxy for the dashboard.
//!
//! Thin client over a Coinbase-compatible `/v2/prices/{PAIR}/spot` endpoint
//! plus a TTL cache so UI polling doesn't hammer the upstream. Upstream
//! failures surface as errors; there are no fallback prices.

pub mod cache;
pub mod client;
pub mod error;

pub use {
    cache::CachedPrices,
    client::{PriceClient, SpotPrice},
    error::{Error, Result},
};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.coinbase.com";
