//! Config file discovery and parsing.

use std::path::{Path, PathBuf};

use {thiserror::Error, tracing::{debug, warn}};

use crate::schema::EmberdashConfig;

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["emberdash.toml", "emberdash.json"];

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}

/// Load config from a specific path (format chosen by extension, TOML when
/// unrecognized).
pub fn load_config(path: &Path) -> Result<EmberdashConfig, Error> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.display().to_string(),
        source,
    })?;

    let parsed = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    } else {
        toml::from_str(&raw).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| Error::Parse {
        path: path.display().to_string(),
        message,
    })
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `override_dir` when given
/// 2. `./emberdash.{toml,json}` (project-local)
/// 3. the user config dir (`~/.config/emberdash/` on Linux)
///
/// Returns defaults when no file is found or the found file fails to parse.
#[must_use]
pub fn discover_and_load(override_dir: Option<&Path>) -> EmberdashConfig {
    if let Some(path) = find_config_file(override_dir) {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    EmberdashConfig::default()
}

fn find_config_file(override_dir: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
        return None;
    }

    // Project-local.
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global.
    if let Some(dirs) = directories::ProjectDirs::from("", "", "emberdash") {
        let config_dir = dirs.config_dir();
        for name in CONFIG_FILENAMES {
            let p = config_dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Resolve the data directory: config override, else the platform data dir,
/// else `./emberdash-data` as a last resort.
#[must_use]
pub fn data_dir(config: &EmberdashConfig) -> PathBuf {
    if let Some(dir) = &config.data_dir {
        return dir.clone();
    }
    directories::ProjectDirs::from("", "", "emberdash")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("emberdash-data"))
}
