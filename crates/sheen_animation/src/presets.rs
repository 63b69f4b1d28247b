//! Reveal presets
//!
//! The entry animations used across the site, packaged as an initial state,
//! a final state, and timing. Sections pick a preset and hand it to the
//! reveal animator together with their elements and a trigger.

use crate::easing::Easing;
use crate::properties::PropertySet;

/// Timing and property endpoints of a reveal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealPreset {
    pub initial: PropertySet,
    pub target: PropertySet,
    pub duration_ms: f32,
    pub stagger_ms: f32,
    pub easing: Easing,
}

impl RevealPreset {
    pub fn new(initial: PropertySet, target: PropertySet) -> Self {
        Self {
            initial,
            target,
            duration_ms: 800.0,
            stagger_ms: 0.0,
            easing: Easing::EaseOutCubic,
        }
    }

    pub fn with_duration(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_stagger(mut self, stagger_ms: f32) -> Self {
        self.stagger_ms = stagger_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Same timing, played from `target` back to `initial`
    pub fn reversed(mut self) -> Self {
        std::mem::swap(&mut self.initial, &mut self.target);
        self
    }

    // ========================================================================
    // Generic shapes
    // ========================================================================

    /// Rise from `distance` px below while fading in
    pub fn fade_up(distance: f32) -> Self {
        Self::new(
            PropertySet::translate(0.0, distance).with_opacity(0.0),
            PropertySet::translate(0.0, 0.0).with_opacity(1.0),
        )
    }

    /// Slide in from `distance` px to the left while fading in
    pub fn slide_in_left(distance: f32) -> Self {
        Self::new(
            PropertySet::translate(-distance, 0.0).with_opacity(0.0),
            PropertySet::translate(0.0, 0.0).with_opacity(1.0),
        )
        .with_duration(500.0)
    }

    /// Grow from `from_scale` while fading in
    pub fn pop_in(from_scale: f32) -> Self {
        Self::new(
            PropertySet::opacity(0.0).with_scale(from_scale),
            PropertySet::opacity(1.0).with_scale(1.0),
        )
        .with_duration(500.0)
    }

    // ========================================================================
    // Site sections
    // ========================================================================

    /// Hero headline lines, played on mount
    pub fn hero_title() -> Self {
        Self::fade_up(50.0)
            .with_duration(1000.0)
            .with_stagger(100.0)
            .with_easing(Easing::POWER3_OUT)
    }

    /// Service cards
    pub fn service_cards() -> Self {
        Self::fade_up(30.0)
            .with_duration(800.0)
            .with_stagger(50.0)
            .with_easing(Easing::POWER2_OUT)
    }

    /// Testimonial cards, with a slight back-out overshoot on scale
    pub fn review_cards() -> Self {
        Self::new(
            PropertySet::translate(0.0, 20.0)
                .with_opacity(0.0)
                .with_scale(0.9),
            PropertySet::translate(0.0, 0.0)
                .with_opacity(1.0)
                .with_scale(1.0),
        )
        .with_duration(600.0)
        .with_stagger(80.0)
        .with_easing(Easing::BackOut(1.2))
    }

    /// About section statistics
    pub fn about_stats() -> Self {
        Self::fade_up(20.0)
            .with_duration(800.0)
            .with_stagger(100.0)
            .with_easing(Easing::POWER2_OUT)
    }

    /// Portfolio project cards
    pub fn portfolio_cards() -> Self {
        Self::fade_up(60.0)
            .with_duration(1000.0)
            .with_stagger(100.0)
            .with_easing(Easing::POWER3_OUT)
    }

    /// Section headings that slide in from the left
    pub fn section_heading() -> Self {
        Self::slide_in_left(20.0)
    }

    /// Small eyebrow labels above headings
    pub fn eyebrow() -> Self {
        Self::pop_in(0.95)
    }

    /// Project detail backdrop
    pub fn modal_backdrop() -> Self {
        Self::new(PropertySet::opacity(0.0), PropertySet::opacity(1.0))
            .with_duration(300.0)
            .with_easing(Easing::EaseOutQuad)
    }

    /// Project detail panel. A spring with damping 30 and stiffness 300
    /// settles in about 450ms with no visible overshoot.
    pub fn modal_panel() -> Self {
        Self::new(
            PropertySet::translate(0.0, 40.0)
                .with_opacity(0.0)
                .with_scale(0.9),
            PropertySet::translate(0.0, 0.0)
                .with_opacity(1.0)
                .with_scale(1.0),
        )
        .with_duration(450.0)
        .with_easing(Easing::POWER2_OUT)
    }

    /// Loading screen wipe: translate_y is in percent of the viewport
    pub fn loading_exit() -> Self {
        Self::new(
            PropertySet::default().with_translate_y(0.0),
            PropertySet::default().with_translate_y(-100.0),
        )
        .with_duration(1200.0)
        .with_easing(Easing::CubicBezier(0.85, 0.0, 0.15, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reveal_presets_end_at_rest() {
        for preset in [
            RevealPreset::hero_title(),
            RevealPreset::service_cards(),
            RevealPreset::review_cards(),
            RevealPreset::about_stats(),
            RevealPreset::portfolio_cards(),
            RevealPreset::section_heading(),
            RevealPreset::eyebrow(),
            RevealPreset::modal_panel(),
        ] {
            assert_eq!(preset.target.resolved_opacity(), 1.0);
            assert_eq!(preset.target.resolved_translate(), (0.0, 0.0));
            assert_eq!(preset.target.resolved_scale(), 1.0);
            assert_eq!(preset.initial.resolved_opacity(), 0.0);
        }
    }

    #[test]
    fn test_reversed_swaps_endpoints() {
        let exit = RevealPreset::modal_panel().reversed();
        assert_eq!(exit.initial, RevealPreset::modal_panel().target);
        assert_eq!(exit.target.resolved_scale(), 0.9);
        assert_eq!(exit.duration_ms, 450.0);
    }

    #[test]
    fn test_review_cards_overshoot() {
        let preset = RevealPreset::review_cards();
        assert!(preset.easing.overshoots());
        assert_eq!(preset.stagger_ms, 80.0);
    }
}
