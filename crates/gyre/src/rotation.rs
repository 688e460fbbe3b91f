//! Rotation layers driven by tweens, and the transform chains of the two
//! faces: clock hands sweeping a full turn, compass layers counter-rotating
//! against the heading.

use crate::angle::Degrees;
use crate::heading::HeadingSnapshot;
use crate::tween::{Motion, Tween};
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumCount, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, StrumDisplay)]
pub enum LayerId {
    HourHand,
    MinuteHand,
    /// Ticks, cardinal labels and waypoint markers.
    Dial,
    /// Heading arrow; screen-fixed frame, points along the heading.
    Needle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatingLayer {
    tween: Tween,
}

impl Default for RotatingLayer {
    fn default() -> Self {
        Self {
            tween: Tween::at_rest(0.0),
        }
    }
}

impl RotatingLayer {
    pub fn angle_at(&self, now: Duration) -> Degrees {
        Degrees::new(self.tween.value_at(now))
    }

    pub fn target(&self) -> Degrees {
        Degrees::new(self.tween.target())
    }

    pub fn set_target(&mut self, target: Degrees, now: Duration, motion: Motion) {
        self.tween.retarget(target.value(), now, motion);
    }

    pub fn jump_to(&mut self, angle: Degrees) {
        self.tween = Tween::at_rest(angle.value());
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        !self.tween.is_finished(now)
    }
}

/// Durations of the decorative clock sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockMotion {
    pub hour: Motion,
    pub minute: Motion,
}

impl Default for ClockMotion {
    fn default() -> Self {
        Self {
            hour: Motion::linear(Duration::from_secs(120)),
            minute: Motion::linear(Duration::from_secs(10)).repeated(12),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RotationComposer {
    layers: [RotatingLayer; LayerId::COUNT],
}

impl RotationComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, id: LayerId) -> &RotatingLayer {
        &self.layers[id as usize]
    }

    pub fn layer_mut(&mut self, id: LayerId) -> &mut RotatingLayer {
        &mut self.layers[id as usize]
    }

    pub fn angle(&self, id: LayerId, now: Duration) -> Degrees {
        self.layer(id).angle_at(now)
    }

    pub fn set_target(&mut self, id: LayerId, target: Degrees, now: Duration, motion: Motion) {
        self.layer_mut(id).set_target(target, now, motion);
    }

    /// Both hands start at 0 and sweep one full turn.
    pub fn mount_clock(&mut self, now: Duration, motion: &ClockMotion) {
        for (id, m) in [(LayerId::HourHand, motion.hour), (LayerId::MinuteHand, motion.minute)] {
            let layer = self.layer_mut(id);
            layer.jump_to(Degrees::ZERO);
            layer.set_target(Degrees::FULL_TURN, now, m);
        }
    }

    /// Dial counter-rotates against the heading, the needle follows it.
    pub fn follow_heading(&mut self, heading: HeadingSnapshot, now: Duration, motion: Motion) {
        self.set_target(LayerId::Dial, heading.dial_rotation(), now, motion);
        self.set_target(LayerId::Needle, heading.unwrapped, now, motion);
    }

    /// Holds every layer where it currently is.
    pub fn freeze(&mut self, now: Duration) {
        for layer in &mut self.layers {
            layer.tween.freeze(now);
        }
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        LayerId::iter().any(|id| self.layer(id).is_animating(now))
    }
}

/// Transform chain of a waypoint: its bearing, then the dial's heading
/// counter-rotation, then the icon's own counter-rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointTransform {
    pub bearing: Degrees,
    pub dial: Degrees,
    /// Bearing offset plus dial rotation; where the marker sits on screen.
    pub marker: Degrees,
    /// Cancels `marker` so the icon glyph stays upright.
    pub icon: Degrees,
}

impl WaypointTransform {
    pub fn compose(bearing: Degrees, dial: Degrees) -> Self {
        let marker = bearing + dial;
        Self {
            bearing,
            dial,
            marker,
            icon: -marker,
        }
    }

    pub fn for_heading(bearing: Degrees, heading: &HeadingSnapshot) -> Self {
        Self::compose(bearing, heading.dial_rotation())
    }

    /// Screen orientation of the icon after all three stages.
    pub fn net_icon(&self) -> Degrees {
        self.marker + self.icon
    }
}
