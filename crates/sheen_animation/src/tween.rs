//! Single value tweens
//!
//! A tween is a pure function of the clock: sampling it at a timestamp
//! never mutates it, so callers can sample as often as they like and the
//! result is independent of frame rate.

use crate::easing::Easing;

/// A time-based transition of one value
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    start_ms: f64,
    duration_ms: f64,
    easing: Easing,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: f64, duration_ms: f64, easing: Easing) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(0.0),
            easing,
        }
    }

    /// A tween that is already settled at `value`
    pub fn fixed(value: f32) -> Self {
        Self::new(value, value, 0.0, 0.0, Easing::Linear)
    }

    pub fn from(&self) -> f32 {
        self.from
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Linear progress (0.0 to 1.0) at `now_ms`
    pub fn progress(&self, now_ms: f64) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        let elapsed = (now_ms - self.start_ms).max(0.0);
        (elapsed / self.duration_ms).min(1.0) as f32
    }

    pub fn is_done(&self, now_ms: f64) -> bool {
        self.progress(now_ms) >= 1.0
    }

    /// Eased value at `now_ms`. Lands exactly on the target once done.
    pub fn sample(&self, now_ms: f64) -> f32 {
        let t = self.progress(now_ms);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    /// Start a new transition from wherever this one currently is
    pub fn retarget(&mut self, now_ms: f64, to: f32, duration_ms: f64, easing: Easing) {
        let current = self.sample(now_ms);
        *self = Self::new(current, to, now_ms, duration_ms, easing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_is_clock_driven() {
        let tween = Tween::new(0.0, 100.0, 1000.0, 500.0, Easing::Linear);

        assert_eq!(tween.sample(900.0), 0.0);
        assert_eq!(tween.sample(1250.0), 50.0);
        assert_eq!(tween.sample(1500.0), 100.0);
        assert_eq!(tween.sample(9000.0), 100.0);
        assert!(tween.is_done(1500.0));
        assert!(!tween.is_done(1499.0));
    }

    #[test]
    fn test_retarget_starts_from_current_value() {
        let mut tween = Tween::new(0.0, 10.0, 0.0, 100.0, Easing::Linear);
        tween.retarget(50.0, 0.0, 100.0, Easing::Linear);

        assert_eq!(tween.from(), 5.0);
        assert_eq!(tween.target(), 0.0);
        assert_eq!(tween.sample(100.0), 2.5);
    }

    #[test]
    fn test_zero_duration_is_done() {
        let tween = Tween::fixed(3.0);
        assert!(tween.is_done(0.0));
        assert_eq!(tween.sample(0.0), 3.0);
    }
}
