use derive_more::{Display, From, Into};
use std::f64::consts::TAU;

/// Rotation in degrees. Not wrapped: 370° and 10° are different values.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, From, Into)]
#[display("{_0}°")]
pub struct Degrees(f64);

crate::impl_angle_newtype!(Degrees);

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, From, Into)]
#[display("{_0} rad")]
pub struct Radians(f64);

crate::impl_angle_newtype!(Radians);

impl Degrees {
    pub const FULL_TURN: Self = Self(360.0);

    pub fn to_radians(self) -> Radians {
        Radians(self.0.to_radians())
    }

    /// Wraps into `[0, 360)`.
    pub fn normalized(self) -> Self {
        Self(wrap(self.0, 360.0))
    }

    /// Signed shortest rotation that takes `self` onto `other`, in `(-180, 180]`.
    pub fn shortest_delta_to(self, other: Self) -> Self {
        let d = wrap(other.0 - self.0, 360.0);
        Self(if d > 180.0 { d - 360.0 } else { d })
    }

    /// True when both angles point the same way once wrapped.
    pub fn coincides_with(self, other: Self, epsilon: f64) -> bool {
        self.shortest_delta_to(other).0.abs() <= epsilon
    }
}

impl Radians {
    pub fn to_degrees(self) -> Degrees {
        Degrees(self.0.to_degrees())
    }

    pub fn normalized(self) -> Self {
        Self(wrap(self.0, TAU))
    }

    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }
}

impl From<Degrees> for Radians {
    fn from(d: Degrees) -> Self {
        d.to_radians()
    }
}

impl From<Radians> for Degrees {
    fn from(r: Radians) -> Self {
        r.to_degrees()
    }
}

fn wrap(value: f64, period: f64) -> f64 {
    let v = value.rem_euclid(period);
    // rem_euclid of a tiny negative value rounds up to `period`
    if v >= period { 0.0 } else { v }
}

#[cfg(test)]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    const EPSILON: f64 = 1e-9;
    assert!(
        (actual - expected).abs() < EPSILON,
        "expected {expected}, got {actual}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_wraps_into_turn() {
        let cases = [
            (0.0, 0.0),
            (360.0, 0.0),
            (370.0, 10.0),
            (-10.0, 350.0),
            (-720.0, 0.0),
            (-1e-20, 0.0),
        ];

        for (input, expected) in cases {
            assert_close(Degrees::new(input).normalized().value(), expected);
        }
    }

    #[test]
    fn test_shortest_delta_crosses_seam() {
        let cases = [
            (359.0, 5.0, 6.0),
            (5.0, 359.0, -6.0),
            (10.0, 359.0, -11.0),
            (0.0, 180.0, 180.0),
            (0.0, 181.0, -179.0),
            (350.0, 370.0, 20.0),
        ];

        for (from, to, expected) in cases {
            let delta = Degrees::new(from).shortest_delta_to(Degrees::new(to));
            assert_close(delta.value(), expected);
        }
    }

    #[test]
    fn test_full_turn_coincides_with_zero() {
        assert!(Degrees::FULL_TURN.coincides_with(Degrees::ZERO, 1e-9));
        assert!(!Degrees::new(90.0).coincides_with(Degrees::ZERO, 1e-9));
    }

    #[test]
    fn test_unit_conversion() {
        assert_close(Degrees::new(180.0).to_radians().value(), std::f64::consts::PI);
        assert_close(Radians::new(TAU).to_degrees().value(), 360.0);
        assert_eq!(Degrees::new(90.0).to_string(), "90°");
    }
}
