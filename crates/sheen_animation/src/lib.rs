//! Sheen Animation Primitives
//!
//! Easing curves, property interpolation, and frame scheduling.
//!
//! # Features
//!
//! - **Easing**: polynomial, cubic-bezier, exponential, back and elastic curves
//! - **Property Sets**: offset/opacity/scale/rotation bundles with clamping
//! - **Tweens**: time-based single value transitions that can be retargeted
//! - **Frame Scheduler**: per-frame callbacks plus interval and timeout timers
//! - **Presets**: the reveal recipes used by the site sections

pub mod easing;
pub mod presets;
pub mod properties;
pub mod scheduler;
pub mod tween;

pub use easing::Easing;
pub use presets::RevealPreset;
pub use properties::PropertySet;
pub use scheduler::{
    FrameScheduler, TickCallbackId, TimerControl, TimerId, MAX_CATCH_UP_PERIODS,
};
pub use tween::Tween;
