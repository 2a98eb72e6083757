mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./tvindex.toml",
        "~/.config/tvindex/config.toml",
        "/etc/tvindex/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.cache.capacity == 0 {
        anyhow::bail!("Cache capacity cannot be 0");
    }

    if config.api.requests_per_second == 0 {
        anyhow::bail!("api.requests_per_second cannot be 0");
    }

    if config.api.timeout_secs == 0 {
        anyhow::bail!("api.timeout_secs cannot be 0");
    }

    if !config.api.api_url.starts_with("http://") && !config.api.api_url.starts_with("https://") {
        anyhow::bail!("api.api_url must be an http(s) URL: {}", config.api.api_url);
    }

    if config.api.apikey.as_deref().map_or(true, str::is_empty) {
        tracing::warn!("No api.apikey configured; remote lookups will fail to authenticate");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EpisodeOrder;
    use std::io::Write;

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn empty_file_yields_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.api_url, "https://api.thetvdb.com");
        assert_eq!(config.catalog.language.as_str(), "en");
        assert_eq!(config.catalog.episode_order, EpisodeOrder::Aired);
        assert_eq!(config.cache.capacity, 100);
        assert_eq!(config.cache.sweep_interval_secs, 20);
        assert!(!config.catalog.banners);
    }

    #[test]
    fn parses_every_section() {
        let file = write_config(
            r#"
[api]
apikey = "0123456789ABCDEF"
timeout_secs = 5

[catalog]
language = "de"
episode_order = "dvd"
banners = true
actors = true

[cache]
capacity = 10
sweep_interval_secs = 1
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.api.apikey.as_deref(), Some("0123456789ABCDEF"));
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.catalog.language.tvdb_id(), 14);
        assert_eq!(config.catalog.episode_order, EpisodeOrder::Dvd);
        assert!(config.catalog.banners && config.catalog.actors);
        assert_eq!(config.cache.policy().capacity, 10);
    }

    #[test]
    fn unknown_language_is_rejected() {
        let file = write_config("[catalog]\nlanguage = \"xx\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("xx"));
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let file = write_config("[cache]\ncapacity = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("capacity"));
    }

    #[test]
    fn explicit_missing_path_errors() {
        let result = load_config_or_default(Some(Path::new("/nonexistent/tvindex.toml")));
        assert!(result.is_err());
    }
}
