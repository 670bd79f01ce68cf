//! Configuration loading and defaults.
//!
//! Config files: `emberdash.toml` or `emberdash.json`, searched in `./` then
//! the user config dir. Missing file means defaults; a file that fails to
//! parse logs a warning and falls back to defaults.

pub mod loader;
pub mod schema;

pub use {
    loader::{data_dir, discover_and_load, load_config},
    schema::{EmberdashConfig, PricesConfig, ScheduleConfig, ServerConfig, SignerConfig},
};
