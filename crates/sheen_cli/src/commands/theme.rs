use anyhow::{Context, Result};
use sheen_site::{SiteConfig, ThemeStore};

pub fn show(config: &SiteConfig) -> Result<()> {
    let store = super::theme_store(config);
    let stored = store
        .load()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;

    match stored {
        Some(mode) => println!("{mode}"),
        None => println!("{} (default)", config.theme.default),
    }
    Ok(())
}

pub fn toggle(config: &SiteConfig) -> Result<()> {
    let mut store = super::theme_store(config);
    let current = store
        .load()
        .with_context(|| format!("Failed to read {}", store.path().display()))?
        .unwrap_or(config.theme.default);

    let next = current.toggle();
    store
        .save(next)
        .with_context(|| format!("Failed to write {}", store.path().display()))?;

    tracing::info!(from = %current, to = %next, "theme toggled");
    println!("{next}");
    Ok(())
}
