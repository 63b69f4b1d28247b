//! Site configuration file handling (sheen.toml)
//!
//! Every section is optional; anything missing falls back to the values
//! the live site ships with.

use crate::error::{Result, SiteError};
use crate::theme::ThemeMode;
use serde::{Deserialize, Serialize};
use sheen_scroll::ScrollConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level site configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub scroll: ScrollSettings,
    #[serde(default)]
    pub loading: LoadingConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Smooth scroll profiles
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScrollSettings {
    /// Viewports narrower than this use the mobile profile
    #[serde(default = "default_mobile_breakpoint")]
    pub mobile_breakpoint: f32,
    #[serde(default = "ScrollConfig::desktop")]
    pub desktop: ScrollConfig,
    #[serde(default = "ScrollConfig::mobile")]
    pub mobile: ScrollConfig,
}

fn default_mobile_breakpoint() -> f32 {
    768.0
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            mobile_breakpoint: default_mobile_breakpoint(),
            desktop: ScrollConfig::desktop(),
            mobile: ScrollConfig::mobile(),
        }
    }
}

impl ScrollSettings {
    /// Profile for a viewport width
    pub fn for_width(&self, width: f32) -> ScrollConfig {
        if width < self.mobile_breakpoint {
            self.mobile
        } else {
            self.desktop
        }
    }
}

/// Loading screen sequence
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoadingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Counter end value
    #[serde(default = "default_steps")]
    pub steps: u32,
    #[serde(default = "default_step_interval")]
    pub step_interval_ms: f64,
    /// Delay before the overlay starts leaving
    #[serde(default = "default_dismiss_after")]
    pub dismiss_after_ms: f64,
    #[serde(default = "default_exit_duration")]
    pub exit_duration_ms: f64,
}

fn default_true() -> bool {
    true
}

fn default_steps() -> u32 {
    100
}

fn default_step_interval() -> f64 {
    15.0
}

fn default_dismiss_after() -> f64 {
    800.0
}

fn default_exit_duration() -> f64 {
    1200.0
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            steps: default_steps(),
            step_interval_ms: default_step_interval(),
            dismiss_after_ms: default_dismiss_after(),
            exit_duration_ms: default_exit_duration(),
        }
    }
}

/// Contact form relay
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContactConfig {
    /// Form relay URL the submission is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Forwarded as `_to`
    #[serde(default)]
    pub recipient: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// How long the success message stays up
    #[serde(default = "default_success_reset")]
    pub success_reset_ms: f64,
    /// How long the failure message stays up
    #[serde(default = "default_failure_reset")]
    pub failure_reset_ms: f64,
}

fn default_endpoint() -> String {
    "https://formspree.io/f/mqaeoboa".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_success_reset() -> f64 {
    5000.0
}

fn default_failure_reset() -> f64 {
    3000.0
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            recipient: None,
            timeout_secs: default_timeout_secs(),
            success_reset_ms: default_success_reset(),
            failure_reset_ms: default_failure_reset(),
        }
    }
}

/// Theme preference
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    /// Used when nothing is stored yet
    #[serde(default)]
    pub default: ThemeMode,
    /// Where the preference is persisted
    #[serde(default)]
    pub store_path: Option<PathBuf>,
}

/// Viewport and page layout
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LayoutConfig {
    #[serde(default = "default_viewport_width")]
    pub viewport_width: f32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: f32,
    /// Router base path, stripped before matching
    #[serde(default = "default_base_path")]
    pub base_path: String,
    /// Scroll offset past which the navbar compacts
    #[serde(default = "default_navbar_threshold")]
    pub navbar_threshold: f32,
}

fn default_viewport_width() -> f32 {
    1440.0
}

fn default_viewport_height() -> f32 {
    900.0
}

fn default_base_path() -> String {
    "/".to_string()
}

fn default_navbar_threshold() -> f32 {
    50.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            base_path: default_base_path(),
            navbar_threshold: default_navbar_threshold(),
        }
    }
}

impl SiteConfig {
    /// Parse from TOML text and validate
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the runtime can't honour
    pub fn validate(&self) -> Result<()> {
        self.scroll.desktop.validate()?;
        self.scroll.mobile.validate()?;

        if self.loading.steps == 0 {
            return Err(SiteError::InvalidConfig(
                "loading.steps must be at least 1".to_string(),
            ));
        }
        if !(self.loading.step_interval_ms > 0.0) {
            return Err(SiteError::InvalidConfig(format!(
                "loading.step_interval_ms must be positive, got {}",
                self.loading.step_interval_ms
            )));
        }
        if !(self.layout.viewport_width > 0.0 && self.layout.viewport_height > 0.0) {
            return Err(SiteError::InvalidConfig(format!(
                "layout viewport must be positive, got {}x{}",
                self.layout.viewport_width, self.layout.viewport_height
            )));
        }
        if !self.layout.base_path.starts_with('/') {
            return Err(SiteError::InvalidConfig(format!(
                "layout.base_path must start with '/', got {:?}",
                self.layout.base_path
            )));
        }
        Ok(())
    }
}
