use anyhow::{Context, Result};
use sheen_site::SiteConfig;

pub fn run(config: &SiteConfig) -> Result<()> {
    let toml = config
        .to_toml_string()
        .context("Failed to render config")?;
    print!("{toml}");
    Ok(())
}
