use anyhow::Context;
use snack_config::SnackConfig;
use snack_db::SnackDb;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: SnackDb,
    pub config: SnackConfig,
}

impl AppContext {
    /// Open the catalog database.
    ///
    /// `--db` wins over config; otherwise a fully configured hosted database
    /// is used, falling back to the configured local file.
    pub async fn init(config: SnackConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        let db = match db_override {
            Some(path) => SnackDb::open_local(path)
                .await
                .with_context(|| format!("failed to open database at {path}"))?,
            None if config.database.is_remote() => SnackDb::open_remote(
                &config.database.url,
                &config.database.auth_token,
            )
            .await
            .with_context(|| format!("failed to connect to {}", config.database.url))?,
            None => SnackDb::open_local(&config.database.path)
                .await
                .with_context(|| format!("failed to open database at {}", config.database.path))?,
        };

        Ok(Self { db, config })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn override_path_wins_over_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("override.db");
        let path = path.to_string_lossy().to_string();

        let ctx = AppContext::init(SnackConfig::default(), Some(&path))
            .await
            .unwrap();
        assert!(!ctx.db.is_remote());
        assert!(std::path::Path::new(&path).exists());
    }
}
