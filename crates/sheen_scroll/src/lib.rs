//! Sheen Scrolling
//!
//! Virtualized smooth scrolling and viewport entry detection.
//!
//! - [`SmoothScroll`] intercepts wheel/touch input and eases a virtual
//!   scroll position toward the requested target once per frame, notifying
//!   subscribers synchronously after every position change.
//! - [`ViewportObserver`] watches registered regions and fires each one
//!   exactly once, the first time enough of it is visible.
//! - [`visible_fraction`] is the pure geometry both are built on.

pub mod config;
pub mod driver;
pub mod error;
pub mod observer;
pub mod visibility;

pub use config::{Orientation, ScrollConfig};
pub use driver::{ListenerId, ScrollState, SmoothScroll};
pub use error::{Result, ScrollError};
pub use observer::{ObservedTarget, TargetId, ViewportObserver};
pub use visibility::{visible_fraction, LayoutSnapshot};
