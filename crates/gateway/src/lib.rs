//! Gateway: HTTP API over the dashboard services.
//!
//! Lifecycle:
//! 1. Load config, resolve the data dir
//! 2. Wire stores, registries, and the burn scheduler with its live
//!    collaborators (wallet lookup, signing client)
//! 3. Start the burn poller
//! 4. Serve the REST API
//!
//! Domain logic lives in the other crates; this one adapts them to HTTP and
//! to each other.

pub mod expense_routes;
pub mod price_routes;
pub mod schedule_routes;
pub mod server;
pub mod signer;
pub mod state;
pub mod wallet_lookup;
pub mod wallet_routes;
