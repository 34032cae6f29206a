//! # snack-config
//!
//! Layered configuration loading for snackbox using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SNACKBOX_*` prefix, `__` as separator)
//! 2. Project-level `.snackbox/config.toml`
//! 3. User-level `~/.config/snackbox/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SNACKBOX_DATABASE__URL` -> `database.url`,
//! `SNACKBOX_SEARCH__DEFAULT_PAGE_SIZE` -> `search.default_page_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use snack_config::SnackConfig;
//!
//! let config = SnackConfig::load_with_dotenv().expect("config");
//!
//! if config.database.is_remote() {
//!     println!("hosted database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod search;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use search::SearchConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnackConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl SnackConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if extraction fails,
    /// `ConfigError::NotConfigured` if a hosted URL has no token, or
    /// `ConfigError::InvalidValue` if a search tuning value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.database.validate()?;
        config.search.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".snackbox/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("SNACKBOX_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("snackbox").join("config.toml"))
    }

    /// Load `.env` from the workspace root, walking up from `CARGO_MANIFEST_DIR`
    /// when it is set. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = SnackConfig::default();
        assert!(!config.database.is_remote());
        assert_eq!(config.database.path, "snackbox.db");
        assert_eq!(config.search.default_page_size, 24);
    }

    #[test]
    fn defaults_pass_validation() {
        SnackConfig::default().search.validate().unwrap();
    }
}
