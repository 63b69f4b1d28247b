//! Site error types

use sheen_scroll::ScrollError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the site runtime
#[derive(Error, Debug)]
pub enum SiteError {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`crate::SiteConfig`]
    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// A config value is out of range
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Scroll(#[from] ScrollError),

    /// Scenario file is not valid JSON
    #[error("Invalid scenario: {0}")]
    Scenario(#[from] serde_json::Error),

    /// A scenario assertion did not hold
    #[error("Scenario step {step} failed: {message}")]
    AssertionFailed { step: usize, message: String },

    #[error(transparent)]
    Form(#[from] FormError),

    /// Operation needs a started context
    #[error("Site context is not running")]
    NotRunning,

    #[error("Site context already started")]
    AlreadyStarted,

    /// No such project, or the current page has no portfolio
    #[error("Project {0} is not on the current page")]
    ProjectUnavailable(usize),
}

/// Contact form submission rejected before it reached the relay
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Field `{0}` is required")]
    MissingField(&'static str),

    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),

    /// A submission is in flight or its result is still displayed
    #[error("Form is busy")]
    Busy,
}

/// Contact relay failures
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// The relay answered with a non-success status
    #[error("Relay rejected submission with status {0}")]
    Status(u16),

    #[error("Relay not configured: {0}")]
    Unconfigured(String),
}

/// Theme preference storage failures
#[derive(Error, Debug)]
pub enum ThemeStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid theme file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize theme: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Theme store unavailable")]
    Unavailable,
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;
