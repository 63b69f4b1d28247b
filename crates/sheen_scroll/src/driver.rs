//! Smooth scroll driver
//!
//! Wheel and touch input move a *target* position; once per animation frame
//! the *virtual* position is advanced toward it along the configured easing
//! curve as a function of elapsed time since the target last changed.
//! Because progress is computed from accumulated time rather than from a
//! per-frame factor, 30fps and 144fps hosts land on the same position at
//! the same timestamp.
//!
//! Subscribers are notified synchronously, in subscription order, right
//! after each position change. Consumers read the virtual position from the
//! notification instead of polling native scroll.
//!
//! # Lifecycle
//!
//! `start` begins intercepting input. `stop` drops every subscriber and
//! hands scrolling back to the host. It is idempotent, so owners can call it
//! from every exit path.

use crate::config::ScrollConfig;
use crate::error::Result;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a scroll subscriber
    pub struct ListenerId;
}

/// Scroll subscriber callback
pub type ScrollListener = Box<dyn FnMut(&ScrollState)>;

/// Snapshot of the driver's position, published to subscribers
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Eased position consumers should render with
    pub virtual_position: f32,
    /// Position the driver is heading toward
    pub target_position: f32,
    /// Virtual position change in pixels per second over the last frame
    pub velocity: f32,
    pub is_animating: bool,
}

#[derive(Clone, Copy, Debug)]
struct ScrollAnimation {
    from: f32,
    to: f32,
    elapsed_ms: f64,
    duration_ms: f64,
}

/// Eased virtual scroll driver
pub struct SmoothScroll {
    config: ScrollConfig,
    state: ScrollState,
    /// Unwrapped virtual position (differs from `state` only in infinite mode)
    animated: f32,
    /// Unwrapped target position
    target: f32,
    animation: Option<ScrollAnimation>,
    listeners: SlotMap<ListenerId, ScrollListener>,
    order: Vec<ListenerId>,
    running: bool,
    viewport_extent: f32,
    content_extent: f32,
    last_tick_ms: Option<f64>,
}

impl SmoothScroll {
    pub fn new() -> Self {
        Self {
            config: ScrollConfig::default(),
            state: ScrollState::default(),
            animated: 0.0,
            target: 0.0,
            animation: None,
            listeners: SlotMap::with_key(),
            order: Vec::new(),
            running: false,
            viewport_extent: 0.0,
            content_extent: 0.0,
            last_tick_ms: None,
        }
    }

    /// Begin intercepting scroll input with `config`
    pub fn start(&mut self, config: ScrollConfig) -> Result<()> {
        config.validate()?;
        if self.running {
            tracing::debug!("smooth scroll restarted with new config");
        }
        self.config = config;
        self.running = true;
        self.last_tick_ms = None;
        tracing::debug!(
            duration = config.duration_seconds,
            infinite = config.infinite,
            "smooth scroll started"
        );
        Ok(())
    }

    /// Stop intercepting, drop all subscribers, and settle where we are
    pub fn stop(&mut self) {
        if !self.running && self.listeners.is_empty() {
            return;
        }
        self.running = false;
        self.animation = None;
        self.target = self.animated;
        self.state.target_position = self.state.virtual_position;
        self.state.velocity = 0.0;
        self.state.is_animating = false;
        self.last_tick_ms = None;

        let dropped = self.listeners.len();
        self.listeners.clear();
        self.order.clear();
        tracing::debug!(dropped, "smooth scroll stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    /// Largest reachable position
    pub fn limit(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Update the scrollable extents (viewport and full content height)
    pub fn set_dimensions(&mut self, viewport_extent: f32, content_extent: f32) {
        self.viewport_extent = viewport_extent.max(0.0);
        self.content_extent = content_extent.max(0.0);

        if self.config.infinite {
            self.sync_state();
            return;
        }

        let limit = self.limit();
        if self.target > limit || self.animated > limit {
            self.target = self.target.min(limit);
            if let Some(animation) = self.animation.as_mut() {
                animation.to = animation.to.min(limit);
            }
            let before = self.state.virtual_position;
            self.animated = self.animated.min(limit);
            self.sync_state();
            if before != self.state.virtual_position {
                self.publish();
            }
        }
    }

    /// Wheel delta in pixels (positive scrolls down)
    pub fn on_wheel(&mut self, delta_y: f32) {
        if !self.running {
            return;
        }
        let delta = delta_y * self.config.wheel_multiplier;
        if delta == 0.0 {
            return;
        }
        let target = self.target + delta;
        if self.config.smooth_wheel {
            self.animate_to(target);
        } else {
            self.jump_to(target);
        }
    }

    /// Touch drag delta in pixels (positive scrolls down)
    pub fn on_touch(&mut self, delta_y: f32) {
        if !self.running {
            return;
        }
        let delta = delta_y * self.config.touch_multiplier;
        if delta == 0.0 {
            return;
        }
        let target = self.target + delta;
        if self.config.smooth_touch {
            self.animate_to(target);
        } else {
            self.jump_to(target);
        }
    }

    /// Programmatic scroll. Always immediate while the driver is stopped.
    pub fn scroll_to(&mut self, position: f32, immediate: bool) {
        if immediate || !self.running {
            self.jump_to(position);
        } else {
            self.animate_to(position);
        }
    }

    /// Advance the virtual position to the host timestamp `now_ms`.
    ///
    /// Returns the published state when the position changed this frame.
    pub fn tick(&mut self, now_ms: f64) -> Option<ScrollState> {
        if !self.running {
            return None;
        }

        let dt = self
            .last_tick_ms
            .map(|last| (now_ms - last).max(0.0))
            .unwrap_or(0.0);
        self.last_tick_ms = Some(now_ms);

        let easing = self.config.easing;
        let animation = self.animation.as_mut()?;
        animation.elapsed_ms += dt;

        let progress = if animation.duration_ms <= 0.0 {
            1.0
        } else {
            (animation.elapsed_ms / animation.duration_ms).min(1.0)
        };
        let done = progress >= 1.0;
        let next = if done {
            animation.to
        } else {
            animation.from + (animation.to - animation.from) * easing.apply(progress as f32)
        };

        let previous = self.animated;
        self.animated = next;
        self.state.velocity = if dt > 0.0 {
            ((next - previous) as f64 / (dt / 1000.0)) as f32
        } else {
            0.0
        };

        if done {
            self.animation = None;
            tracing::trace!(position = next, "smooth scroll settled");
        }

        self.sync_state();
        self.publish();
        Some(self.state)
    }

    /// Subscribe to position updates
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&ScrollState) + 'static,
    {
        let id = self.listeners.insert(Box::new(listener));
        self.order.push(id);
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.order.retain(|other| *other != id);
        self.listeners.remove(id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn bound(&self, position: f32) -> f32 {
        if self.config.infinite {
            position
        } else {
            position.clamp(0.0, self.limit())
        }
    }

    /// Fold an unwrapped position into `[0, limit)` in infinite mode
    fn normalize(&self, position: f32) -> f32 {
        let limit = self.limit();
        if self.config.infinite && limit > 0.0 {
            position.rem_euclid(limit)
        } else {
            position
        }
    }

    fn animate_to(&mut self, target: f32) {
        let target = self.bound(target);
        if self.animation.is_none() && target == self.animated {
            self.target = target;
            return;
        }

        self.target = target;
        self.animation = Some(ScrollAnimation {
            from: self.animated,
            to: target,
            elapsed_ms: 0.0,
            duration_ms: self.config.duration_ms(),
        });
        self.sync_state();
    }

    fn jump_to(&mut self, target: f32) {
        let target = self.bound(target);
        let before = self.state.virtual_position;

        self.animation = None;
        self.target = target;
        self.animated = target;
        self.state.velocity = 0.0;
        self.sync_state();

        if before != self.state.virtual_position {
            self.publish();
        }
    }

    fn sync_state(&mut self) {
        self.state.virtual_position = self.normalize(self.animated);
        self.state.target_position = self.normalize(self.target);
        self.state.is_animating = self.animation.is_some();
    }

    fn publish(&mut self) {
        let state = self.state;
        let order = self.order.clone();
        for id in order {
            if let Some(listener) = self.listeners.get_mut(id) {
                listener(&state);
            }
        }
    }
}

impl Default for SmoothScroll {
    fn default() -> Self {
        Self::new()
    }
}
