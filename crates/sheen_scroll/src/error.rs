//! Scroll error types

use crate::config::Orientation;
use thiserror::Error;

/// Errors raised when configuring the scroll driver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScrollError {
    /// Only vertical scrolling is implemented
    #[error("Unsupported scroll orientation: {0:?}")]
    UnsupportedOrientation(Orientation),

    /// A numeric setting is out of range
    #[error("Invalid scroll config: {0}")]
    InvalidConfig(String),
}

/// Result type for scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;
