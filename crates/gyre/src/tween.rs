//! Time-based interpolation between two scalar values.
//!
//! Time is an explicit `Duration` since an arbitrary epoch chosen by the
//! host, which keeps every tween deterministic under test.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, SerializeDisplay, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
pub enum Curve {
    #[default]
    Linear,
    EaseOut,
}

impl Curve {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub duration: Duration,
    pub curve: Curve,
    /// Number of `from -> to` cycles; repeats do not reverse.
    pub repeats: u32,
}

impl Motion {
    pub const INSTANT: Self = Self {
        duration: Duration::ZERO,
        curve: Curve::Linear,
        repeats: 1,
    };

    pub fn linear(duration: Duration) -> Self {
        Self {
            duration,
            curve: Curve::Linear,
            repeats: 1,
        }
    }

    pub fn ease_out(duration: Duration) -> Self {
        Self {
            duration,
            curve: Curve::EaseOut,
            repeats: 1,
        }
    }

    pub fn repeated(mut self, repeats: u32) -> Self {
        self.repeats = repeats.max(1);
        self
    }

    pub fn total(&self) -> Duration {
        self.duration.saturating_mul(self.repeats.max(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f64,
    to: f64,
    start: Duration,
    motion: Motion,
}

impl Tween {
    pub fn new(from: f64, to: f64, start: Duration, motion: Motion) -> Self {
        Self {
            from,
            to,
            start,
            motion,
        }
    }

    pub fn at_rest(value: f64) -> Self {
        Self::new(value, value, Duration::ZERO, Motion::INSTANT)
    }

    pub fn from(&self) -> f64 {
        self.from
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now.saturating_sub(self.start) >= self.motion.total()
    }

    /// Eased progress through the current cycle; 1 once finished.
    fn progress(&self, now: Duration) -> f64 {
        if self.is_finished(now) || self.motion.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let cycle = self.motion.duration.as_secs_f64();
        self.motion.curve.apply((elapsed % cycle) / cycle)
    }

    pub fn value_at(&self, now: Duration) -> f64 {
        self.from + (self.to - self.from) * self.progress(now)
    }

    /// Starts a new interpolation towards `to` from wherever the tween is at
    /// `now`, so an in-flight animation never jumps.
    pub fn retarget(&mut self, to: f64, now: Duration, motion: Motion) {
        let current = self.value_at(now);
        *self = Self::new(current, to, now, motion);
    }

    /// Stops at the current value.
    pub fn freeze(&mut self, now: Duration) {
        *self = Self::at_rest(self.value_at(now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::assert_close;

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    #[test]
    fn test_linear_midpoint_and_rest() {
        let t = Tween::new(0.0, 360.0, secs(1.0), Motion::linear(secs(120.0)));
        assert_close(t.value_at(secs(0.0)), 0.0);
        assert_close(t.value_at(secs(61.0)), 180.0);
        assert!(!t.is_finished(secs(120.9)));
        assert!(t.is_finished(secs(121.0)));
        assert_close(t.value_at(secs(500.0)), 360.0);
    }

    #[test]
    fn test_repeats_restart_each_cycle() {
        let t = Tween::new(0.0, 360.0, Duration::ZERO, Motion::linear(secs(10.0)).repeated(12));
        assert_close(t.value_at(secs(5.0)), 180.0);
        assert_close(t.value_at(secs(12.5)), 90.0);
        assert_close(t.value_at(secs(117.5)), 270.0);
        assert!(!t.is_finished(secs(119.0)));
        assert_close(t.value_at(secs(120.0)), 360.0);
        assert_eq!(Motion::linear(secs(10.0)).repeated(12).total(), secs(120.0));
    }

    #[test]
    fn test_retarget_continues_from_current_value() {
        let mut t = Tween::new(10.0, 370.0, Duration::ZERO, Motion::linear(secs(10.0)));
        let now = secs(5.0);
        let before = t.value_at(now);
        assert_close(before, 190.0);

        t.retarget(400.0, now, Motion::linear(secs(10.0)));

        assert_close(t.from(), 190.0);
        assert_close(t.value_at(now), before);
        assert_close(t.value_at(secs(10.0)), 295.0);
        assert_close(t.value_at(secs(15.0)), 400.0);
    }

    #[test]
    fn test_ease_out_front_loads() {
        let t = Tween::new(0.0, 1.0, Duration::ZERO, Motion::ease_out(secs(1.0)));
        assert!(t.value_at(secs(0.5)) > 0.5);
        assert_close(t.value_at(secs(1.0)), 1.0);
    }

    #[test]
    fn test_instant_motion_snaps() {
        let mut t = Tween::at_rest(3.0);
        t.retarget(7.0, secs(2.0), Motion::INSTANT);
        assert_close(t.value_at(secs(2.0)), 7.0);
        assert!(t.is_finished(secs(2.0)));
    }

    #[test]
    fn test_curve_deserialization() {
        let cases = vec![
            ("\"linear\"", Curve::Linear),
            ("\"ease-out\"", Curve::EaseOut),
            ("\"EASE-OUT\"", Curve::EaseOut),
        ];

        for (json, expected) in cases {
            let deserialized: Curve = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
