//! Sheen Motion
//!
//! Element-level animation built on the animation primitives and the
//! scroll observer:
//!
//! - [`RevealAnimator`] runs staggered [`AnimationGroup`]s started
//!   immediately, on mount, or on first viewport entry.
//! - [`TiltEffect`] rotates a card toward the pointer and settles it back
//!   on leave.
//!
//! Animators hold [`ElementRef`]s only. Dropping an [`ElementHandle`] is
//! all it takes to take an element out of every animation.

pub mod element;
pub mod reveal;
pub mod stagger;
pub mod tilt;

pub use element::{ElementHandle, ElementRef};
pub use reveal::{AnimationGroup, GroupId, RevealAnimator, RevealPhase, Trigger};
pub use stagger::StaggerConfig;
pub use tilt::{CardId, TiltBoard, TiltConfig, TiltEffect, TiltState};
