//! Pointer-driven 3D tilt
//!
//! While the pointer is over a card, the card rotates toward it and a
//! radial highlight follows the pointer. Rotation is damped by a divisor of
//! the pointer's offset from the card centre, and the pointer is clamped to
//! the card first, so the angle is bounded by the card's size no matter how
//! wild the input coordinates are. On leave everything settles back to zero
//! on an elastic curve.

use crate::element::ElementRef;
use sheen_animation::{Easing, PropertySet, Tween};
use sheen_core::{Point, Rect};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a card on a [`TiltBoard`]
    pub struct CardId;
}

/// Tilt tuning
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TiltConfig {
    /// Pixels of pointer offset per degree of rotation
    pub divisor: f32,
    /// Hard cap on either rotation (degrees)
    pub max_angle_degrees: f32,
    pub follow_ms: f64,
    pub follow_easing: Easing,
    pub glow_ms: f64,
    pub glow_easing: Easing,
    pub settle_ms: f64,
    pub settle_easing: Easing,
    /// Highlight fade-out after leave
    pub glow_fade_ms: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            divisor: 25.0,
            max_angle_degrees: 15.0,
            follow_ms: 500.0,
            follow_easing: Easing::POWER2_OUT,
            glow_ms: 100.0,
            glow_easing: Easing::EaseOutQuad,
            settle_ms: 800.0,
            settle_easing: Easing::elastic_settle(),
            glow_fade_ms: 500.0,
        }
    }
}

/// Sampled tilt values for one card
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TiltState {
    /// Degrees about the X axis (pointer below centre tilts positive)
    pub rotation_x: f32,
    /// Degrees about the Y axis (pointer left of centre tilts positive)
    pub rotation_y: f32,
    /// Highlight centre relative to the card's top-left corner
    pub glow_x: f32,
    pub glow_y: f32,
    pub highlight_opacity: f32,
}

impl TiltState {
    /// Rotation as element properties. Not clamped: the elastic settle
    /// swings past zero on purpose.
    pub fn to_properties(&self) -> PropertySet {
        PropertySet::default()
            .with_rotate_x(self.rotation_x)
            .with_rotate_y(self.rotation_y)
    }
}

/// Tilt effect for one card
pub struct TiltEffect {
    config: TiltConfig,
    rotation_x: Tween,
    rotation_y: Tween,
    glow_x: Tween,
    glow_y: Tween,
    highlight: Tween,
    hovered: bool,
    element: Option<ElementRef>,
}

impl TiltEffect {
    pub fn new(config: TiltConfig) -> Self {
        Self {
            config,
            rotation_x: Tween::fixed(0.0),
            rotation_y: Tween::fixed(0.0),
            glow_x: Tween::fixed(0.0),
            glow_y: Tween::fixed(0.0),
            highlight: Tween::fixed(0.0),
            hovered: false,
            element: None,
        }
    }

    /// Write rotation into `element` on every tick
    pub fn with_element(mut self, element: ElementRef) -> Self {
        self.element = Some(element);
        self
    }

    pub fn config(&self) -> &TiltConfig {
        &self.config
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Rotation the card is heading toward for `pointer` over `bounds`
    pub fn target_rotation(&self, bounds: Rect, pointer: Point) -> (f32, f32) {
        let pointer = clamp_to(bounds, pointer);
        let center = bounds.center();
        let max = self.config.max_angle_degrees.abs();
        let divisor = self.config.divisor.max(f32::EPSILON);

        let rotation_x = ((pointer.y - center.y) / divisor).clamp(-max, max);
        let rotation_y = ((center.x - pointer.x) / divisor).clamp(-max, max);
        (rotation_x, rotation_y)
    }

    /// Pointer moved while over the card. Empty bounds are ignored.
    pub fn pointer_move(&mut self, bounds: Rect, pointer: Point, now_ms: f64) {
        if bounds.is_empty() {
            return;
        }

        let (rotation_x, rotation_y) = self.target_rotation(bounds, pointer);
        let local = clamp_to(bounds, pointer);
        let c = self.config;

        self.rotation_x
            .retarget(now_ms, rotation_x, c.follow_ms, c.follow_easing);
        self.rotation_y
            .retarget(now_ms, rotation_y, c.follow_ms, c.follow_easing);
        self.glow_x
            .retarget(now_ms, local.x - bounds.x(), c.glow_ms, c.glow_easing);
        self.glow_y
            .retarget(now_ms, local.y - bounds.y(), c.glow_ms, c.glow_easing);
        if !self.hovered || self.highlight.target() != 1.0 {
            self.highlight.retarget(now_ms, 1.0, c.glow_ms, c.glow_easing);
        }

        if !self.hovered {
            tracing::trace!("tilt: pointer entered");
        }
        self.hovered = true;
    }

    /// Pointer left the card: settle back to rest
    pub fn pointer_leave(&mut self, now_ms: f64) {
        if !self.hovered {
            return;
        }
        let c = self.config;

        self.rotation_x
            .retarget(now_ms, 0.0, c.settle_ms, c.settle_easing);
        self.rotation_y
            .retarget(now_ms, 0.0, c.settle_ms, c.settle_easing);
        self.glow_x.retarget(now_ms, 0.0, c.settle_ms, c.settle_easing);
        self.glow_y.retarget(now_ms, 0.0, c.settle_ms, c.settle_easing);
        self.highlight
            .retarget(now_ms, 0.0, c.glow_fade_ms, Easing::EaseOutQuad);

        self.hovered = false;
        tracing::trace!("tilt: pointer left, settling");
    }

    /// Sample the current values, writing rotation to the attached element
    pub fn tick(&mut self, now_ms: f64) -> TiltState {
        let state = self.sample(now_ms);
        if let Some(element) = &self.element {
            if !element.apply(&state.to_properties()) {
                self.element = None;
            }
        }
        state
    }

    pub fn sample(&self, now_ms: f64) -> TiltState {
        TiltState {
            rotation_x: self.rotation_x.sample(now_ms),
            rotation_y: self.rotation_y.sample(now_ms),
            glow_x: self.glow_x.sample(now_ms),
            glow_y: self.glow_y.sample(now_ms),
            highlight_opacity: self.highlight.sample(now_ms).clamp(0.0, 1.0),
        }
    }

    /// Everything has reached its target
    pub fn is_settled(&self, now_ms: f64) -> bool {
        [
            &self.rotation_x,
            &self.rotation_y,
            &self.glow_x,
            &self.glow_y,
            &self.highlight,
        ]
        .iter()
        .all(|tween| tween.is_done(now_ms))
    }
}

impl Default for TiltEffect {
    fn default() -> Self {
        Self::new(TiltConfig::default())
    }
}

/// Supplies a card's current bounds in document coordinates
pub type CardBounds = Box<dyn Fn() -> Rect>;

struct TiltCard {
    bounds: CardBounds,
    effect: TiltEffect,
}

/// The tilt cards currently mounted, with pointer routing.
///
/// A move over a card is a move for that card; every hovered card the
/// pointer is no longer over gets a leave. Cards never share state.
#[derive(Default)]
pub struct TiltBoard {
    cards: SlotMap<CardId, TiltCard>,
}

impl TiltBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, bounds: F, effect: TiltEffect) -> CardId
    where
        F: Fn() -> Rect + 'static,
    {
        self.cards.insert(TiltCard {
            bounds: Box::new(bounds),
            effect,
        })
    }

    pub fn remove(&mut self, id: CardId) -> bool {
        self.cards.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    /// Route a pointer position (document coordinates). Returns the card
    /// under the pointer, if any.
    pub fn pointer_move(&mut self, pointer: Point, now_ms: f64) -> Option<CardId> {
        let mut hit = None;
        for (id, card) in self.cards.iter_mut() {
            let bounds = (card.bounds)();
            if hit.is_none() && !bounds.is_empty() && bounds.contains(pointer) {
                card.effect.pointer_move(bounds, pointer, now_ms);
                hit = Some(id);
            } else {
                card.effect.pointer_leave(now_ms);
            }
        }
        hit
    }

    /// Pointer left the window
    pub fn pointer_leave_all(&mut self, now_ms: f64) {
        for card in self.cards.values_mut() {
            card.effect.pointer_leave(now_ms);
        }
    }

    /// Advance every card
    pub fn tick(&mut self, now_ms: f64) {
        for card in self.cards.values_mut() {
            card.effect.tick(now_ms);
        }
    }

    pub fn state(&self, id: CardId, now_ms: f64) -> Option<TiltState> {
        self.cards.get(id).map(|card| card.effect.sample(now_ms))
    }

    pub fn hovered(&self) -> Option<CardId> {
        self.cards
            .iter()
            .find(|(_, card)| card.effect.is_hovered())
            .map(|(id, _)| id)
    }
}

fn clamp_to(bounds: Rect, pointer: Point) -> Point {
    Point::new(
        pointer.x.clamp(bounds.x(), bounds.right()),
        pointer.y.clamp(bounds.y(), bounds.bottom()),
    )
}
