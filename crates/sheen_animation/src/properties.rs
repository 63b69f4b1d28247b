//! Animatable visual properties
//!
//! A [`PropertySet`] is a sparse bundle of the properties a reveal or tilt
//! can drive. Unset properties are left untouched when applied to an
//! element.

/// Properties that can be animated on an element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropertySet {
    /// Horizontal offset in pixels
    pub translate_x: Option<f32>,
    /// Vertical offset in pixels
    pub translate_y: Option<f32>,
    /// Opacity (0.0 to 1.0)
    pub opacity: Option<f32>,
    /// Uniform scale factor
    pub scale: Option<f32>,
    /// Rotation about the X axis in degrees (3D tilt)
    pub rotate_x: Option<f32>,
    /// Rotation about the Y axis in degrees (3D turn)
    pub rotate_y: Option<f32>,
}

impl PropertySet {
    /// Fully visible, untransformed resting state
    pub const REST: PropertySet = PropertySet {
        translate_x: Some(0.0),
        translate_y: Some(0.0),
        opacity: Some(1.0),
        scale: Some(1.0),
        rotate_x: Some(0.0),
        rotate_y: Some(0.0),
    };

    /// Create properties with only opacity set
    pub fn opacity(value: f32) -> Self {
        Self {
            opacity: Some(value),
            ..Default::default()
        }
    }

    /// Create properties with translation
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            translate_x: Some(x),
            translate_y: Some(y),
            ..Default::default()
        }
    }

    /// Builder: set opacity
    pub fn with_opacity(mut self, value: f32) -> Self {
        self.opacity = Some(value);
        self
    }

    /// Builder: set uniform scale
    pub fn with_scale(mut self, value: f32) -> Self {
        self.scale = Some(value);
        self
    }

    /// Builder: set translation
    pub fn with_translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = Some(x);
        self.translate_y = Some(y);
        self
    }

    /// Builder: set vertical offset only
    pub fn with_translate_y(mut self, y: f32) -> Self {
        self.translate_y = Some(y);
        self
    }

    /// Builder: set X rotation (3D tilt)
    pub fn with_rotate_x(mut self, degrees: f32) -> Self {
        self.rotate_x = Some(degrees);
        self
    }

    /// Builder: set Y rotation (3D turn)
    pub fn with_rotate_y(mut self, degrees: f32) -> Self {
        self.rotate_y = Some(degrees);
        self
    }

    /// Interpolate between two property sets
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            translate_x: lerp_opt(self.translate_x, other.translate_x, t),
            translate_y: lerp_opt(self.translate_y, other.translate_y, t),
            opacity: lerp_opt(self.opacity, other.opacity, t),
            scale: lerp_opt(self.scale, other.scale, t),
            rotate_x: lerp_opt(self.rotate_x, other.rotate_x, t),
            rotate_y: lerp_opt(self.rotate_y, other.rotate_y, t),
        }
    }

    /// Clamp opacity to `[0, 1]` and scale to `[0, ∞)`.
    ///
    /// Offsets and rotations have no natural bound and pass through.
    pub fn clamped(mut self) -> Self {
        self.opacity = self.opacity.map(|o| o.clamp(0.0, 1.0));
        self.scale = self.scale.map(|s| s.max(0.0));
        self
    }

    /// Overlay the set properties of `other` onto `self`
    pub fn merge(&mut self, other: &PropertySet) {
        if other.translate_x.is_some() {
            self.translate_x = other.translate_x;
        }
        if other.translate_y.is_some() {
            self.translate_y = other.translate_y;
        }
        if other.opacity.is_some() {
            self.opacity = other.opacity;
        }
        if other.scale.is_some() {
            self.scale = other.scale;
        }
        if other.rotate_x.is_some() {
            self.rotate_x = other.rotate_x;
        }
        if other.rotate_y.is_some() {
            self.rotate_y = other.rotate_y;
        }
    }

    /// Get the resolved opacity (defaults to 1.0 if not set)
    pub fn resolved_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    /// Get the resolved scale (defaults to 1.0 if not set)
    pub fn resolved_scale(&self) -> f32 {
        self.scale.unwrap_or(1.0)
    }

    /// Get the resolved translation (defaults to 0.0 if not set)
    pub fn resolved_translate(&self) -> (f32, f32) {
        (
            self.translate_x.unwrap_or(0.0),
            self.translate_y.unwrap_or(0.0),
        )
    }

    /// Get the resolved 3D rotation in degrees (defaults to 0.0)
    pub fn resolved_rotation(&self) -> (f32, f32) {
        (self.rotate_x.unwrap_or(0.0), self.rotate_y.unwrap_or(0.0))
    }
}

/// Helper to interpolate optional values
fn lerp_opt(a: Option<f32>, b: Option<f32>, t: f32) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        (Some(a), None) => Some(a),
        (None, Some(b)) => Some(b),
        (None, None) => None,
    }
}
