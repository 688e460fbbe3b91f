//! Compass heading samples and their continuous (unwrapped) form.
//!
//! Feeds report bearings in `[0, 360)` or already unwrapped; either way the
//! [`HeadingUnwrapper`] adds the minimal signed delta between consecutive
//! samples so a dial never spins the long way round at the 0/360 seam.

use crate::angle::Degrees;
use crate::direction::CompassPoint;
use derive_more::{Display, From, Into};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Default, Display, From, Into)]
pub struct HeadingSample(f64);

impl HeadingSample {
    pub fn new(degrees: f64) -> Self {
        Self(degrees)
    }

    pub fn degrees(self) -> Degrees {
        Degrees::new(self.0)
    }

    pub fn is_valid(self) -> bool {
        self.0.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingUnwrapper {
    unwrapped: Option<Degrees>,
    last_raw: Degrees,
}

impl HeadingUnwrapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a sample into the accumulator and returns the new unwrapped value.
    /// The first sample is reached from 0° by the short way round.
    /// Non-finite samples are dropped.
    pub fn push(&mut self, sample: HeadingSample) -> Degrees {
        if !sample.is_valid() {
            return self.current();
        }

        let raw = sample.degrees();
        let next = match self.unwrapped {
            None => Degrees::ZERO + Degrees::ZERO.shortest_delta_to(raw),
            Some(prev) => prev + self.last_raw.shortest_delta_to(raw),
        };
        self.unwrapped = Some(next);
        self.last_raw = raw;
        next
    }

    /// 0° until the first sample arrives.
    pub fn current(&self) -> Degrees {
        self.unwrapped.unwrap_or_default()
    }

    pub fn has_sample(&self) -> bool {
        self.unwrapped.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum::Display)]
pub enum FeedStatus {
    #[default]
    Waiting,
    Live,
    Stale,
}

/// Immutable per-frame view of the heading, shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeadingSnapshot {
    pub unwrapped: Degrees,
    pub status: FeedStatus,
}

impl HeadingSnapshot {
    pub fn wrapped(&self) -> Degrees {
        self.unwrapped.normalized()
    }

    /// Rotation for layers that stay geographically oriented.
    pub fn dial_rotation(&self) -> Degrees {
        -self.unwrapped
    }

    pub fn direction(&self) -> CompassPoint {
        CompassPoint::from_heading(self.unwrapped)
    }

    /// Title readout, e.g. `"123º SE"`.
    pub fn readout(&self) -> String {
        let shown = self.wrapped().value().round() % 360.0;
        format!("{shown:.0}º {}", self.direction()).to_uppercase()
    }
}

/// Heading feed bookkeeping: last sample time, staleness and the unwrapped
/// value. A stale or lost feed freezes the heading where it was.
#[derive(Debug, Clone, Default)]
pub struct HeadingState {
    unwrapper: HeadingUnwrapper,
    last_update: Option<Duration>,
    status: FeedStatus,
}

impl HeadingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: HeadingSample, now: Duration) -> Degrees {
        if !sample.is_valid() {
            log::debug!("dropping invalid heading sample {sample}");
            return self.unwrapper.current();
        }
        if self.status != FeedStatus::Live {
            log::info!("heading feed live");
        }
        self.status = FeedStatus::Live;
        self.last_update = Some(now);
        self.unwrapper.push(sample)
    }

    pub fn mark_lost(&mut self) {
        if self.status != FeedStatus::Stale {
            log::info!(
                "heading feed lost, holding {}",
                self.unwrapper.current().normalized()
            );
        }
        self.status = FeedStatus::Stale;
    }

    /// Marks the feed stale when no sample arrived within `stale_after`.
    /// Returns true when the status changed.
    pub fn check_stale(&mut self, now: Duration, stale_after: Duration) -> bool {
        match (self.status, self.last_update) {
            (FeedStatus::Live, Some(last)) if now.saturating_sub(last) > stale_after => {
                self.mark_lost();
                true
            }
            _ => false,
        }
    }

    pub fn status(&self) -> FeedStatus {
        self.status
    }

    pub fn snapshot(&self) -> HeadingSnapshot {
        HeadingSnapshot {
            unwrapped: self.unwrapper.current(),
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::assert_close;

    fn unwrap_all(samples: &[f64]) -> Vec<f64> {
        let mut u = HeadingUnwrapper::new();
        samples
            .iter()
            .map(|&s| u.push(HeadingSample::new(s)).value())
            .collect()
    }

    #[test]
    fn test_wrap_is_continuous() {
        let out = unwrap_all(&[0.0, 10.0, 359.0, 5.0]);
        assert_eq!(out, vec![0.0, 10.0, -1.0, 5.0]);

        let dial: Vec<f64> = out.iter().map(|h| -h).collect();
        let steps = [10.0, 11.0, 6.0];
        for (pair, step) in dial.windows(2).zip(steps) {
            assert_close((pair[1] - pair[0]).abs(), step);
        }
    }

    #[test]
    fn test_keeps_turning_past_full_circle() {
        let out = unwrap_all(&[350.0, 10.0, 40.0, 100.0, 170.0, 250.0, 330.0, 20.0]);
        assert_eq!(out.last().copied(), Some(380.0));
    }

    #[test]
    fn test_accepts_already_unwrapped_feed() {
        let out = unwrap_all(&[350.0, 370.0, 390.0, -20.0]);
        assert_eq!(out, vec![-10.0, 10.0, 30.0, -20.0]);
    }

    #[test]
    fn test_first_sample_takes_short_way_from_north() {
        let mut state = HeadingState::new();
        state.push(HeadingSample::new(350.0), Duration::from_secs(1));

        let snap = state.snapshot();
        assert!(snap.unwrapped.value().abs() <= 10.0);
        assert_eq!(snap.unwrapped, Degrees::new(-10.0));
        assert_eq!(snap.readout(), "350º N");

        assert_eq!(unwrap_all(&[190.0]), vec![-170.0]);
        assert_eq!(unwrap_all(&[170.0]), vec![170.0]);
    }

    #[test]
    fn test_invalid_samples_are_dropped() {
        let out = unwrap_all(&[30.0, f64::NAN, f64::INFINITY, 40.0]);
        assert_eq!(out, vec![30.0, 30.0, 30.0, 40.0]);
    }

    #[test]
    fn test_defaults_to_north_without_samples() {
        let state = HeadingState::new();
        let snap = state.snapshot();
        assert_eq!(snap.unwrapped, Degrees::ZERO);
        assert_eq!(snap.status, FeedStatus::Waiting);
        assert_eq!(snap.readout(), "0º N");
    }

    #[test]
    fn test_stale_feed_freezes_last_value() {
        let mut state = HeadingState::new();
        state.push(HeadingSample::new(123.0), Duration::from_secs(1));
        assert_eq!(state.status(), FeedStatus::Live);

        assert!(!state.check_stale(Duration::from_secs(2), Duration::from_secs(3)));
        assert!(state.check_stale(Duration::from_secs(5), Duration::from_secs(3)));
        assert!(!state.check_stale(Duration::from_secs(9), Duration::from_secs(3)));

        let snap = state.snapshot();
        assert_eq!(snap.status, FeedStatus::Stale);
        assert_eq!(snap.unwrapped, Degrees::new(123.0));

        state.push(HeadingSample::new(124.0), Duration::from_secs(10));
        assert_eq!(state.status(), FeedStatus::Live);
    }

    #[test]
    fn test_readout_uses_wrapped_heading() {
        let snap = |deg| HeadingSnapshot {
            unwrapped: Degrees::new(deg),
            status: FeedStatus::Live,
        };

        assert_eq!(snap(123.4).readout(), "123º SE");
        assert_eq!(snap(-90.0).readout(), "270º W");
        assert_eq!(snap(359.7).readout(), "0º N");
        assert_eq!(snap(405.0).readout(), "45º NE");
    }
}
