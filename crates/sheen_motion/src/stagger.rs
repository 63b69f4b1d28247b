//! Stagger offsets for element groups
//!
//! Elements start in document order: element `i` starts `i × delay_ms`
//! after the group's trigger.

/// Per-element start offsets within a group
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StaggerConfig {
    /// Delay between consecutive elements (ms)
    pub delay_ms: f32,
}

impl StaggerConfig {
    pub fn new(delay_ms: f32) -> Self {
        Self {
            delay_ms: delay_ms.max(0.0),
        }
    }

    /// Every element starts together
    pub fn none() -> Self {
        Self::new(0.0)
    }

    /// Start offset of element `index`
    pub fn delay_for_index(&self, index: usize) -> f32 {
        self.delay_ms * index as f32
    }

    /// Offset of the last of `total` elements to start
    pub fn total_delay(&self, total: usize) -> f32 {
        self.delay_for_index(total.saturating_sub(1))
    }
}

impl From<f32> for StaggerConfig {
    fn from(delay_ms: f32) -> Self {
        Self::new(delay_ms)
    }
}
