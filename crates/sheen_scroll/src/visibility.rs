//! Viewport visibility geometry
//!
//! Pure functions over a layout snapshot, so entry detection can be tested
//! without a browser or renderer.

use sheen_core::Rect;

/// Viewport and target bounds captured at one instant, in document space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSnapshot {
    pub viewport: Rect,
    pub target: Rect,
}

impl LayoutSnapshot {
    pub fn new(viewport: Rect, target: Rect) -> Self {
        Self { viewport, target }
    }
}

/// Fraction (0.0 to 1.0) of the target's area inside the viewport.
///
/// A zero-area target is never visible.
pub fn visible_fraction(snapshot: &LayoutSnapshot) -> f32 {
    let target_area = snapshot.target.area();
    if snapshot.target.is_empty() || target_area <= 0.0 {
        return 0.0;
    }

    match snapshot.viewport.intersection(&snapshot.target) {
        Some(overlap) => (overlap.area() / target_area).clamp(0.0, 1.0),
        None => 0.0,
    }
}

/// The viewport rectangle for a vertical scroll position
pub fn viewport_at(scroll_y: f32, width: f32, height: f32) -> Rect {
    Rect::new(0.0, scroll_y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(scroll_y: f32) -> Rect {
        viewport_at(scroll_y, 1000.0, 800.0)
    }

    #[test]
    fn test_fully_visible() {
        let target = Rect::new(0.0, 100.0, 500.0, 200.0);
        assert_eq!(visible_fraction(&LayoutSnapshot::new(viewport(0.0), target)), 1.0);
    }

    #[test]
    fn test_partially_visible() {
        // 200px tall target, top 120px below the fold
        let target = Rect::new(0.0, 880.0, 1000.0, 200.0);
        let fraction = visible_fraction(&LayoutSnapshot::new(viewport(200.0), target));
        assert!((fraction - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_view() {
        let target = Rect::new(0.0, 2000.0, 1000.0, 200.0);
        assert_eq!(visible_fraction(&LayoutSnapshot::new(viewport(0.0), target)), 0.0);
    }

    #[test]
    fn test_zero_area_never_visible() {
        let collapsed = Rect::new(0.0, 100.0, 1000.0, 0.0);
        assert_eq!(visible_fraction(&LayoutSnapshot::new(viewport(0.0), collapsed)), 0.0);
    }

    #[test]
    fn test_tall_target_caps_below_one() {
        let tall = Rect::new(0.0, 0.0, 1000.0, 1600.0);
        let fraction = visible_fraction(&LayoutSnapshot::new(viewport(0.0), tall));
        assert!((fraction - 0.5).abs() < 1e-6);
    }
}
