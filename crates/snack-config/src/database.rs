//! libSQL database location.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_path() -> String {
    String::from("snackbox.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, used when no hosted database is configured.
    #[serde(default = "default_path")]
    pub path: String,

    /// Hosted database URL (e.g., `libsql://snacks.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the hosted database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether both fields needed for the hosted database are set.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// A hosted URL without a token is a half-configured section.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when `url` is set but `auth_token` is not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.url.is_empty() && self.auth_token.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "database".to_string(),
            });
        }
        Ok(())
    }
}
