//! Router assembly and server startup.

use std::{sync::Arc, time::Duration};

use {
    axum::{Router, response::Json, routing::get},
    serde_json::json,
    tower_http::cors::{Any, CorsLayer},
    tracing::info,
};

use {
    emberdash_burn::service::{BurnService, SystemClock},
    emberdash_config::{EmberdashConfig, data_dir},
    emberdash_expenses::ExpenseBook,
    emberdash_prices::{CachedPrices, PriceClient},
    emberdash_store::{FileKvStore, KvStore},
    emberdash_wallets::WalletRegistry,
};

use crate::{
    expense_routes, price_routes, schedule_routes,
    signer::SignerBurnInvoker,
    state::AppState,
    wallet_lookup::RegistryWalletLookup,
    wallet_routes,
};

/// Build the router (shared between production startup and tests).
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/schedule", schedule_routes::router())
        .nest("/api/wallets", wallet_routes::router())
        .nest("/api/expenses", expense_routes::router())
        .nest("/api/prices", price_routes::router())
        .layer(cors)
        .with_state(state)
}

/// Wire stores, registries, and the burn scheduler from config.
pub fn build_state(config: &EmberdashConfig) -> AppState {
    let kv: Arc<dyn KvStore> = Arc::new(FileKvStore::new(data_dir(config)));
    build_state_with_store(config, kv)
}

/// Same wiring over an explicit store (tests use the in-memory one).
pub fn build_state_with_store(config: &EmberdashConfig, kv: Arc<dyn KvStore>) -> AppState {
    let http = reqwest::Client::new();

    let wallets = Arc::new(WalletRegistry::new(Arc::clone(&kv)));
    let expenses = Arc::new(ExpenseBook::new(Arc::clone(&kv)));
    let prices = Arc::new(CachedPrices::new(
        PriceClient::new(http.clone(), config.prices.base_url.clone()),
        Duration::from_secs(config.prices.cache_ttl_secs),
    ));

    let invoker = Arc::new(SignerBurnInvoker::new(
        http,
        config.signer.url.clone(),
        config.signer.resonant_369,
    ));
    let lookup = Arc::new(RegistryWalletLookup::new(Arc::clone(&wallets)));
    let burn = BurnService::with_options(
        kv,
        lookup,
        invoker,
        Arc::new(SystemClock),
        config.schedule.invoke_timeout_secs.map(Duration::from_secs),
    );

    AppState {
        burn,
        wallets,
        expenses,
        prices,
    }
}

/// Start the burn poller and serve the API until shutdown.
pub async fn start_server(config: EmberdashConfig) -> anyhow::Result<()> {
    let state = build_state(&config);
    state.burn.start().await?;

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let app = build_app(state.clone());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "gateway listening");

    axum::serve(listener, app).await?;

    state.burn.stop().await;
    Ok(())
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
