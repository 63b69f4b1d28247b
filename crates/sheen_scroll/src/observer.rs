//! One-shot viewport entry observer
//!
//! Regions register with a bounds provider and a visibility threshold. On
//! every scroll, resize or layout change the observer measures each
//! unfired region against the viewport. The first time a region's visible
//! fraction reaches its threshold, its callback runs once and the region is
//! dropped from tracking. Scrolling away and back never re-fires it.

use crate::visibility::{viewport_at, visible_fraction, LayoutSnapshot};
use sheen_core::{Rect, Size};
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Handle to a registered target
    pub struct TargetId;
}

/// Supplies a region's current bounds in document coordinates
pub type BoundsProvider = Box<dyn Fn() -> Rect>;

/// Runs once when the region first becomes visible enough
pub type EntryCallback = Box<dyn FnOnce(TargetId)>;

/// A region watched for its first visible entry
pub struct ObservedTarget {
    label: String,
    bounds: BoundsProvider,
    threshold_ratio: f32,
    on_enter: Option<EntryCallback>,
    fired: bool,
}

impl ObservedTarget {
    /// `threshold_ratio` is clamped into `(0, 1]`
    pub fn new<F>(label: impl Into<String>, bounds: F, threshold_ratio: f32) -> Self
    where
        F: Fn() -> Rect + 'static,
    {
        let threshold_ratio = if threshold_ratio.is_nan() {
            1.0
        } else {
            threshold_ratio.clamp(f32::MIN_POSITIVE, 1.0)
        };

        Self {
            label: label.into(),
            bounds: Box::new(bounds),
            threshold_ratio,
            on_enter: None,
            fired: false,
        }
    }

    /// Set the entry callback
    pub fn on_enter<F: FnOnce(TargetId) + 'static>(mut self, callback: F) -> Self {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn threshold_ratio(&self) -> f32 {
        self.threshold_ratio
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }

    /// Current bounds as reported by the provider
    pub fn bounds(&self) -> Rect {
        (self.bounds)()
    }
}

/// Watches targets against the viewport and fires each at most once
pub struct ViewportObserver {
    targets: SlotMap<TargetId, ObservedTarget>,
    viewport_size: Size,
    last_viewport: Option<Rect>,
    fired_total: usize,
}

impl ViewportObserver {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            targets: SlotMap::with_key(),
            viewport_size: Size::new(viewport_width, viewport_height),
            last_viewport: None,
            fired_total: 0,
        }
    }

    /// Start watching a region. Nothing fires until the next update.
    pub fn register(&mut self, target: ObservedTarget) -> TargetId {
        tracing::trace!(
            label = target.label(),
            threshold = target.threshold_ratio(),
            "observer: register"
        );
        self.targets.insert(target)
    }

    /// Stop watching a region before it fires. Its callback is dropped unrun.
    pub fn unregister(&mut self, id: TargetId) -> bool {
        match self.targets.remove(id) {
            Some(target) => {
                tracing::trace!(label = target.label(), "observer: unregister");
                true
            }
            None => false,
        }
    }

    pub fn is_tracking(&self, id: TargetId) -> bool {
        self.targets.contains_key(id)
    }

    /// Number of unfired targets
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Total number of targets fired over the observer's lifetime
    pub fn fired_total(&self) -> usize {
        self.fired_total
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Resize: re-measures against the last known scroll position
    pub fn set_viewport_size(&mut self, width: f32, height: f32) -> SmallVec<[TargetId; 4]> {
        self.viewport_size = Size::new(width, height);
        let scroll_y = self.last_viewport.map(|v| v.y()).unwrap_or(0.0);
        self.on_scroll(scroll_y)
    }

    /// Scroll update from the scroll driver
    pub fn on_scroll(&mut self, scroll_y: f32) -> SmallVec<[TargetId; 4]> {
        let viewport = viewport_at(scroll_y, self.viewport_size.width, self.viewport_size.height);
        self.update(viewport)
    }

    /// Layout changed without scrolling
    pub fn refresh(&mut self) -> SmallVec<[TargetId; 4]> {
        match self.last_viewport {
            Some(viewport) => self.update(viewport),
            None => self.on_scroll(0.0),
        }
    }

    /// Measure every unfired target against `viewport`, firing those that
    /// reached their threshold. Returns the ids fired by this call.
    pub fn update(&mut self, viewport: Rect) -> SmallVec<[TargetId; 4]> {
        self.last_viewport = Some(viewport);

        let due: SmallVec<[TargetId; 4]> = self
            .targets
            .iter()
            .filter(|(_, target)| {
                let snapshot = LayoutSnapshot::new(viewport, target.bounds());
                visible_fraction(&snapshot) >= target.threshold_ratio
            })
            .map(|(id, _)| id)
            .collect();

        for &id in &due {
            let Some(mut target) = self.targets.remove(id) else {
                continue;
            };
            target.fired = true;
            self.fired_total += 1;
            tracing::debug!(label = target.label(), "observer: target entered viewport");

            if let Some(callback) = target.on_enter.take() {
                callback(id);
            }
        }

        due
    }
}
