//! Scroll driver configuration

use crate::error::{Result, ScrollError};
use serde::{Deserialize, Serialize};
use sheen_animation::Easing;

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Vertical scrolling (the only supported axis)
    #[default]
    Vertical,
    Horizontal,
}

/// Configuration for the smooth scroll driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Time for the virtual position to reach a new target, in seconds
    pub duration_seconds: f32,
    /// Progress curve applied over `duration_seconds`
    pub easing: Easing,
    pub orientation: Orientation,
    /// Ease wheel input (otherwise wheel deltas jump immediately)
    pub smooth_wheel: bool,
    /// Ease touch input (otherwise touch deltas jump immediately)
    pub smooth_touch: bool,
    pub wheel_multiplier: f32,
    pub touch_multiplier: f32,
    /// Wrap around at the ends instead of clamping
    pub infinite: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self::desktop()
    }
}

impl ScrollConfig {
    /// Desktop profile
    pub fn desktop() -> Self {
        Self {
            duration_seconds: 1.2,
            easing: Easing::ExpoOut,
            orientation: Orientation::Vertical,
            smooth_wheel: true,
            smooth_touch: false,
            wheel_multiplier: 1.0,
            touch_multiplier: 1.5,
            infinite: false,
        }
    }

    /// Touch-device profile: a shorter duration feels less laggy under a finger
    pub fn mobile() -> Self {
        Self {
            duration_seconds: 1.0,
            ..Self::desktop()
        }
    }

    /// Pick the profile for a viewport width
    pub fn for_viewport_width(width: f32, mobile_breakpoint: f32) -> Self {
        if width < mobile_breakpoint {
            Self::mobile()
        } else {
            Self::desktop()
        }
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_seconds as f64 * 1000.0
    }

    /// Reject settings the driver can't honour
    pub fn validate(&self) -> Result<()> {
        if self.orientation != Orientation::Vertical {
            return Err(ScrollError::UnsupportedOrientation(self.orientation));
        }
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(ScrollError::InvalidConfig(format!(
                "duration_seconds must be positive, got {}",
                self.duration_seconds
            )));
        }
        for (name, value) in [
            ("wheel_multiplier", self.wheel_multiplier),
            ("touch_multiplier", self.touch_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScrollError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_differ_only_in_duration() {
        let desktop = ScrollConfig::desktop();
        let mobile = ScrollConfig::mobile();

        assert_eq!(desktop.duration_seconds, 1.2);
        assert_eq!(mobile.duration_seconds, 1.0);
        assert_eq!(
            ScrollConfig {
                duration_seconds: 1.2,
                ..mobile
            },
            desktop
        );
    }

    #[test]
    fn test_for_viewport_width() {
        assert_eq!(ScrollConfig::for_viewport_width(375.0, 768.0), ScrollConfig::mobile());
        assert_eq!(ScrollConfig::for_viewport_width(768.0, 768.0), ScrollConfig::desktop());
    }

    #[test]
    fn test_validate_rejects_horizontal() {
        let config = ScrollConfig {
            orientation: Orientation::Horizontal,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ScrollError::UnsupportedOrientation(Orientation::Horizontal))
        );
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let zero_duration = ScrollConfig {
            duration_seconds: 0.0,
            ..Default::default()
        };
        assert!(zero_duration.validate().is_err());

        let negative_wheel = ScrollConfig {
            wheel_multiplier: -1.0,
            ..Default::default()
        };
        assert!(negative_wheel.validate().is_err());
        assert!(ScrollConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ScrollConfig = toml::from_str("duration_seconds = 0.8\ninfinite = true").unwrap();
        assert_eq!(config.duration_seconds, 0.8);
        assert!(config.infinite);
        assert_eq!(config.easing, Easing::ExpoOut);
        assert_eq!(config.touch_multiplier, 1.5);
    }
}
