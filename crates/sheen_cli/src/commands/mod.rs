pub mod config;
pub mod contact;
pub mod routes;
pub mod simulate;
pub mod theme;

use anyhow::{Context, Result};
use sheen_site::{FileThemeStore, SiteConfig};
use std::path::{Path, PathBuf};

/// Theme file used when the config names none
const DEFAULT_THEME_PATH: &str = ".sheen/theme.toml";

pub fn load_config(path: &Path) -> Result<SiteConfig> {
    let config = SiteConfig::load_or_default(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn theme_store(config: &SiteConfig) -> FileThemeStore {
    let path = config
        .theme
        .store_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_THEME_PATH));
    FileThemeStore::new(path)
}
