use std::path::Path;

use anyhow::Context;

/// Load `.env` from the working directory (if present), then layered config.
pub fn load_config() -> anyhow::Result<snack_config::SnackConfig> {
    let env_path = Path::new(".env");
    if env_path.exists() {
        dotenvy::from_path(env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    snack_config::SnackConfig::load().context("failed to load snackbox configuration")
}
