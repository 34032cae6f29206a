use snack_config::SnackConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SnackConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SnackConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.database.is_remote() && has_single_underscore_key(&env_keys, "SNACKBOX_DATABASE") {
        warnings.push(
            "Database config appears default while SNACKBOX_DATABASE_* env vars exist. Use double underscores (example: SNACKBOX_DATABASE__URL)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "SNACKBOX_SEARCH") {
        warnings.push(
            "SNACKBOX_SEARCH_* env vars are ignored. Use double underscores (example: SNACKBOX_SEARCH__MAX_PAGE_SIZE)."
                .to_string(),
        );
    }

    warnings
}

/// `SNACKBOX_SECTION_FIELD` rather than `SNACKBOX_SECTION__FIELD`.
fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    let single = format!("{section}_");
    let double = format!("{section}__");
    keys.iter()
        .any(|key| key.starts_with(&single) && !key.starts_with(&double))
}

#[cfg(test)]
mod tests {
    use snack_config::SnackConfig;

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let warnings = collect_unconfigured_warnings(
            &SnackConfig::default(),
            vec![
                ("SNACKBOX_DATABASE_URL".to_string(), "libsql://demo".to_string()),
                ("SNACKBOX_SEARCH_MAX_PAGE_SIZE".to_string(), "50".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_for_well_formed_keys() {
        let warnings = collect_unconfigured_warnings(
            &SnackConfig::default(),
            vec![
                ("SNACKBOX_DATABASE__PATH".to_string(), "x.db".to_string()),
                ("SNACKBOX_SEARCH__MAX_PAGE_SIZE".to_string(), "50".to_string()),
                ("SNACKBOX_LOG".to_string(), "debug".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }
}
