use crate::config::ClockConfig;
use gyre::angle::Degrees;
use gyre::icon::IconName;
use gyre::rotation::{ClockMotion, LayerId, RotationComposer};
use gyre::tween::Motion;
use std::time::Duration;

/// Decorative clock face: numerals, icons and two sweeping hands.
#[derive(Debug, Clone)]
pub struct ClockState {
    pub numerals: Vec<u32>,
    pub icons: Vec<IconName>,
    composer: RotationComposer,
    motion: ClockMotion,
}

impl ClockState {
    pub fn from_config(cfg: &ClockConfig, now: Duration) -> Self {
        let mut state = Self {
            numerals: cfg.numerals.clone(),
            icons: cfg.icons.clone(),
            composer: RotationComposer::new(),
            motion: Self::motion_for(cfg),
        };
        state.mount(now);
        state
    }

    pub fn motion_for(cfg: &ClockConfig) -> ClockMotion {
        ClockMotion {
            hour: Motion::linear(cfg.hour_sweep()),
            minute: Motion::linear(cfg.minute_cycle()).repeated(cfg.minute_repeats),
        }
    }

    /// Restarts the sweep from 12 o'clock.
    pub fn mount(&mut self, now: Duration) {
        self.composer.mount_clock(now, &self.motion);
    }

    /// Replaces the face; the sweep only restarts when its timing changed.
    pub fn reconfigure(&mut self, cfg: &ClockConfig, now: Duration) {
        self.numerals = cfg.numerals.clone();
        self.icons = cfg.icons.clone();
        let motion = Self::motion_for(cfg);
        if motion != self.motion {
            self.motion = motion;
            self.mount(now);
        }
    }

    pub fn minute_labels(&self) -> Vec<String> {
        self.numerals
            .iter()
            .map(|n| (n * 5).to_string())
            .collect()
    }

    pub fn hour_angle(&self, now: Duration) -> Degrees {
        self.composer.angle(LayerId::HourHand, now)
    }

    pub fn minute_angle(&self, now: Duration) -> Degrees {
        self.composer.angle(LayerId::MinuteHand, now)
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.composer.is_animating(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_default_sweep() {
        let clock = ClockState::from_config(&ClockConfig::default(), secs(0));
        assert_eq!(clock.hour_angle(secs(0)), Degrees::ZERO);
        assert!((clock.hour_angle(secs(60)).value() - 180.0).abs() < 1e-9);
        assert!((clock.minute_angle(secs(5)).value() - 180.0).abs() < 1e-9);
        assert!(clock.is_animating(secs(119)));
        assert!(!clock.is_animating(secs(121)));
        assert_eq!(clock.hour_angle(secs(500)), Degrees::FULL_TURN);
    }

    #[test]
    fn test_minute_hand_repeats() {
        let clock = ClockState::from_config(&ClockConfig::default(), secs(0));
        // Each cycle restarts from 0 rather than reversing.
        assert!((clock.minute_angle(secs(12)).value() - 72.0).abs() < 1e-9);
        assert!((clock.minute_angle(secs(115)).value() - 180.0).abs() < 1e-9);
        assert_eq!(clock.minute_angle(secs(200)), Degrees::FULL_TURN);
    }

    #[test]
    fn test_reconfigure_keeps_running_sweep() {
        let cfg = ClockConfig::default();
        let mut clock = ClockState::from_config(&cfg, secs(0));

        let mut relabelled = cfg.clone();
        relabelled.numerals = vec![12, 3, 6, 9];
        clock.reconfigure(&relabelled, secs(30));
        assert_eq!(clock.numerals, vec![12, 3, 6, 9]);
        assert!((clock.hour_angle(secs(60)).value() - 180.0).abs() < 1e-9);

        let mut faster = relabelled.clone();
        faster.hour_sweep_secs = 10.0;
        clock.reconfigure(&faster, secs(30));
        assert_eq!(clock.hour_angle(secs(30)), Degrees::ZERO);
        assert!((clock.hour_angle(secs(35)).value() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_unbounded_timings_hold_the_hands() {
        let cfg = ClockConfig {
            hour_sweep_secs: f64::INFINITY,
            minute_cycle_secs: f64::NAN,
            ..ClockConfig::default()
        };
        let clock = ClockState::from_config(&cfg, secs(0));
        assert!(clock.hour_angle(secs(3600)).value().abs() < 1e-9);
        assert!(clock.is_animating(secs(3600)));
        assert_eq!(clock.minute_angle(secs(1)), Degrees::FULL_TURN);
    }

    #[test]
    fn test_minute_labels() {
        let clock = ClockState::from_config(&ClockConfig::default(), secs(0));
        let labels = clock.minute_labels();
        assert_eq!(labels[0], "60");
        assert_eq!(labels[1], "5");
        assert_eq!(labels[2], "10");
        assert_eq!(labels[11], "55");
    }
}
