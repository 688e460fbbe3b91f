use crate::angle::Degrees;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumCount, EnumIter, EnumString, IntoEnumIterator};

/// The eight principal compass points, clockwise from north.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    EnumCount,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum CompassPoint {
    #[strum(to_string = "N", serialize = "North")]
    North,
    #[strum(to_string = "NE", serialize = "NorthEast")]
    NorthEast,
    #[strum(to_string = "E", serialize = "East")]
    East,
    #[strum(to_string = "SE", serialize = "SouthEast")]
    SouthEast,
    #[strum(to_string = "S", serialize = "South")]
    South,
    #[strum(to_string = "SW", serialize = "SouthWest")]
    SouthWest,
    #[strum(to_string = "W", serialize = "West")]
    West,
    #[strum(to_string = "NW", serialize = "NorthWest")]
    NorthWest,
}

impl CompassPoint {
    pub const SECTOR: f64 = 360.0 / Self::COUNT as f64;

    /// Nearest point; each owns a 45° sector centered on its bearing.
    pub fn from_heading(heading: Degrees) -> Self {
        let sector = (heading.normalized().value() / Self::SECTOR).round() as usize;
        Self::from_index(sector)
    }

    pub fn from_index(idx: usize) -> Self {
        Self::iter().nth(idx % Self::COUNT).unwrap_or(Self::North)
    }

    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn bearing(&self) -> Degrees {
        Degrees::new(self.as_index() as f64 * Self::SECTOR)
    }

    pub fn is_cardinal(&self) -> bool {
        self.as_index() % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_heading_sectors() {
        let cases = [
            (0.0, CompassPoint::North),
            (22.4, CompassPoint::North),
            (22.6, CompassPoint::NorthEast),
            (90.0, CompassPoint::East),
            (135.0, CompassPoint::SouthEast),
            (200.0, CompassPoint::South),
            (337.6, CompassPoint::North),
            (-90.0, CompassPoint::West),
            (725.0, CompassPoint::North),
        ];

        for (heading, expected) in cases {
            assert_eq!(CompassPoint::from_heading(Degrees::new(heading)), expected, "{heading}");
        }
    }

    #[test]
    fn test_display_is_abbreviated() {
        assert_eq!(CompassPoint::SouthEast.to_string(), "SE");
        assert_eq!(CompassPoint::North.to_string(), "N");
    }

    #[test]
    fn test_direction_deserialization() {
        let cases = vec![
            ("\"north\"", CompassPoint::North),
            ("\"N\"", CompassPoint::North),
            ("\"nw\"", CompassPoint::NorthWest),
            ("\"NorthWest\"", CompassPoint::NorthWest),
            ("\"se\"", CompassPoint::SouthEast),
        ];

        for (json, expected) in cases {
            let deserialized: CompassPoint = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_cardinals() {
        let cardinals: Vec<_> = CompassPoint::iter().filter(|p| p.is_cardinal()).collect();
        assert_eq!(
            cardinals,
            vec![
                CompassPoint::North,
                CompassPoint::East,
                CompassPoint::South,
                CompassPoint::West
            ]
        );
        assert_eq!(CompassPoint::West.bearing(), Degrees::new(270.0));
    }
}
