//! Text laid out along a circular arc.
//!
//! Glyph widths are only known once a renderer has measured them, so a
//! label converges over two passes: the first pass lays everything out at
//! angle 0 while the host measures, the second consumes the measured
//! [`WidthMap`] and produces final angles. Layout itself is a pure function
//! of `(text, radius, widths)`.

use crate::angle::Radians;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::BTreeMap;
use std::f64::consts::TAU;
use strum::{Display as StrumDisplay, EnumString};

/// Measured rendered width per glyph index. Absent entries are unmeasured.
pub type WidthMap = BTreeMap<usize, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcGlyph {
    pub index: usize,
    pub ch: char,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, SerializeDisplay, DeserializeFromStr, EnumString, StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum GlyphOrientation {
    /// Each glyph is counter-rotated by its on-screen position, so it reads
    /// level whatever the block rotation.
    #[default]
    Upright,
    /// Glyphs follow the arc, baseline tangent to the circle.
    Tangential,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub index: usize,
    pub ch: char,
    pub angle: Radians,
    /// Cancels `angle + block_rotation`.
    pub counter_rotation: Radians,
    pub measured: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcTextLayout {
    pub glyphs: Vec<PlacedGlyph>,
    /// Applied to the whole block so the text is centered on 12 o'clock.
    pub block_rotation: Radians,
}

impl ArcTextLayout {
    /// Cumulative angle reached by the last glyph.
    pub fn sweep(&self) -> Radians {
        self.glyphs.last().map(|g| g.angle).unwrap_or_default()
    }

    /// Text longer than the circumference wraps onto itself.
    pub fn overflows(&self) -> bool {
        self.sweep().value() > TAU
    }

    pub fn is_settled(&self) -> bool {
        self.glyphs.iter().all(|g| g.measured)
    }

    /// Where `glyph` sits on the circle once the block is centered.
    pub fn position(&self, glyph: &PlacedGlyph) -> Radians {
        glyph.angle + self.block_rotation
    }
}

/// Something that can report the rendered advance of a single glyph.
pub trait GlyphMeasure {
    fn advance(&self, ch: char) -> Option<f64>;
}

pub fn glyphs(text: &str) -> Vec<ArcGlyph> {
    text.chars()
        .enumerate()
        .map(|(index, ch)| ArcGlyph { index, ch })
        .collect()
}

/// Share of the full turn covered by `width` on a circle of `radius`.
pub fn angular_width(width: f64, radius: f64) -> Radians {
    let circumference = radius * TAU;
    if circumference <= 0.0 {
        return Radians::ZERO;
    }
    Radians::new(width / circumference * TAU)
}

/// Placement angle of glyph `index`: everything measured before it plus its
/// own full width. Unmeasured glyphs sit at 0.
pub fn angle_at(index: usize, widths: &WidthMap, radius: f64) -> Radians {
    let Some(&own) = widths.get(&index) else {
        return Radians::ZERO;
    };
    let before: f64 = widths.range(..index).map(|(_, w)| w).sum();
    angular_width(before, radius) + angular_width(own, radius)
}

pub fn layout(text: &str, radius: f64, widths: &WidthMap) -> ArcTextLayout {
    let mut glyphs: Vec<_> = glyphs(text)
        .into_iter()
        .map(|g| PlacedGlyph {
            index: g.index,
            ch: g.ch,
            angle: angle_at(g.index, widths, radius),
            counter_rotation: Radians::ZERO,
            measured: widths.contains_key(&g.index),
        })
        .collect();

    let block_rotation = -glyphs.last().map(|g| g.angle).unwrap_or_default() / 2.0;
    for g in &mut glyphs {
        g.counter_rotation = -(g.angle + block_rotation);
    }

    ArcTextLayout {
        glyphs,
        block_rotation,
    }
}

/// A label bound to a circle, holding the latest width snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcLabel {
    text: String,
    radius: f64,
    kerning: f64,
    orientation: GlyphOrientation,
    widths: WidthMap,
}

impl ArcLabel {
    pub fn new(text: impl Into<String>, radius: f64, kerning: f64) -> Self {
        Self {
            text: text.into(),
            radius,
            kerning,
            orientation: GlyphOrientation::default(),
            widths: WidthMap::new(),
        }
    }

    pub fn with_orientation(mut self, orientation: GlyphOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn kerning(&self) -> f64 {
        self.kerning
    }

    pub fn orientation(&self) -> GlyphOrientation {
        self.orientation
    }

    pub fn widths(&self) -> &WidthMap {
        &self.widths
    }

    /// Replacing the text drops every measurement.
    pub fn set_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text == self.text {
            return false;
        }
        self.text = text;
        self.widths.clear();
        true
    }

    /// Widths only depend on glyph and font, so they survive a radius change.
    pub fn set_radius(&mut self, radius: f64) -> bool {
        let changed = self.radius != radius;
        self.radius = radius;
        changed
    }

    /// Kerning is part of every measured width.
    pub fn set_kerning(&mut self, kerning: f64) -> bool {
        if self.kerning == kerning {
            return false;
        }
        self.kerning = kerning;
        self.widths.clear();
        true
    }

    /// Drops every measurement, e.g. after the font changed.
    pub fn invalidate(&mut self) {
        self.widths.clear();
    }

    pub fn set_orientation(&mut self, orientation: GlyphOrientation) {
        self.orientation = orientation;
    }

    pub fn layout(&self) -> ArcTextLayout {
        layout(&self.text, self.radius, &self.widths)
    }

    pub fn missing(&self) -> Vec<usize> {
        (0..self.text.chars().count())
            .filter(|i| !self.widths.contains_key(i))
            .collect()
    }

    pub fn is_settled(&self) -> bool {
        self.missing().is_empty()
    }

    /// Measures every glyph not yet in the snapshot. Glyphs the measurer
    /// cannot size are left out of the report.
    pub fn measure_with(&self, measure: &impl GlyphMeasure) -> WidthMap {
        glyphs(&self.text)
            .into_iter()
            .filter(|g| !self.widths.contains_key(&g.index))
            .filter_map(|g| measure.advance(g.ch).map(|w| (g.index, w + self.kerning)))
            .collect()
    }

    /// Merges a (possibly partial) report. Returns true when the layout
    /// changed and another pass is needed.
    pub fn absorb(&mut self, report: WidthMap) -> bool {
        let len = self.text.chars().count();
        let mut changed = false;

        for (index, width) in report {
            if index >= len || !width.is_finite() {
                continue;
            }
            if self.widths.insert(index, width) != Some(width) {
                changed = true;
            }
        }

        if changed {
            let layout = self.layout();
            if layout.overflows() {
                log::warn!(
                    "arc label '{}' sweeps {:.2} rad, more than a full turn",
                    self.text,
                    layout.sweep().value()
                );
            }
        }

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::assert_close;

    struct Monospace(f64);

    impl GlyphMeasure for Monospace {
        fn advance(&self, _ch: char) -> Option<f64> {
            Some(self.0)
        }
    }

    /// Measures everything except spaces.
    struct NoSpaces;

    impl GlyphMeasure for NoSpaces {
        fn advance(&self, ch: char) -> Option<f64> {
            (ch != ' ').then_some(8.0)
        }
    }

    fn widths(values: &[f64]) -> WidthMap {
        values.iter().copied().enumerate().collect()
    }

    #[test]
    fn test_three_glyphs_on_sixty_unit_circle() {
        let radius = 60.0 / TAU;
        let w = widths(&[10.0, 10.0, 10.0]);

        let per_glyph = angular_width(10.0, radius).value();
        assert_close(per_glyph, TAU / 6.0);
        assert!((per_glyph - 1.047).abs() < 1e-3);

        assert_close(angle_at(0, &w, radius).value(), TAU / 6.0);
        assert_close(angle_at(1, &w, radius).value(), TAU / 3.0);
        assert_close(angle_at(2, &w, radius).value(), std::f64::consts::PI);

        let laid = layout("abc", radius, &w);
        assert_close(laid.block_rotation.value(), -std::f64::consts::FRAC_PI_2);
    }

    #[test]
    fn test_sweep_matches_total_width() {
        let radius = 135.0;
        let values = [7.5, 12.0, 3.25, 9.0, 11.0, 4.0];
        let laid = layout("ABCDEF", radius, &widths(&values));
        let total: f64 = values.iter().sum();

        assert_close(laid.sweep().value(), TAU * total / (TAU * radius));
        assert!(!laid.overflows());
    }

    #[test]
    fn test_counter_rotation_cancels_placement() {
        let laid = layout("NESW", 40.0, &widths(&[9.0, 9.0, 9.0, 9.0]));
        assert!(laid.block_rotation != Radians::ZERO);
        for g in &laid.glyphs {
            assert_close((laid.position(g) + g.counter_rotation).value(), 0.0);
        }
    }

    #[test]
    fn test_upright_glyphs_stay_level_on_long_label() {
        let mut label = ArcLabel::new(
            "Latitude 35.08587 E • Longitude 21.43673 W • Elevation 64M • Incline 12 •",
            135.0,
            3.0,
        );
        label.absorb(label.measure_with(&Monospace(7.2)));
        let laid = label.layout();

        assert!(laid.block_rotation.value().abs() > 2.0);
        let g = &laid.glyphs[10];
        let turn = g.angle + laid.block_rotation + g.counter_rotation;
        assert_close(turn.value(), 0.0);
        for g in &laid.glyphs {
            assert_close((laid.position(g) + g.counter_rotation).value(), 0.0);
        }
    }

    #[test]
    fn test_empty_text_is_valid() {
        let laid = layout("", 100.0, &WidthMap::new());
        assert!(laid.glyphs.is_empty());
        assert_eq!(laid.block_rotation, Radians::ZERO);
        assert!(laid.is_settled());
    }

    #[test]
    fn test_unmeasured_glyphs_stack_at_zero() {
        let laid = layout("hello", 50.0, &WidthMap::new());
        assert_eq!(laid.glyphs.len(), 5);
        assert!(laid.glyphs.iter().all(|g| g.angle == Radians::ZERO));
        assert!(!laid.is_settled());
    }

    #[test]
    fn test_converges_in_two_passes_and_stays_put() {
        let mut label = ArcLabel::new("LATITUDE 35.08587 E •", 135.0, 3.0);
        let measure = Monospace(7.2);

        // pass 1: nothing measured yet
        let first = label.layout();
        assert!(first.glyphs.iter().all(|g| g.angle == Radians::ZERO));
        assert!(label.absorb(label.measure_with(&measure)));

        // pass 2: final angles
        let second = label.layout();
        assert!(second.is_settled());
        assert!(label.is_settled());
        assert!(label.measure_with(&measure).is_empty());
        assert!(!label.absorb(label.measure_with(&measure)));

        // pass 3: identical
        assert_eq!(label.layout(), second);

        let last = second.glyphs.len() as f64;
        assert_close(
            second.sweep().value(),
            angular_width(last * (7.2 + 3.0), 135.0).value(),
        );
    }

    #[test]
    fn test_partial_report_is_tolerated() {
        let mut label = ArcLabel::new("A B", 20.0, 0.0);

        assert!(label.absorb(label.measure_with(&NoSpaces)));
        assert_eq!(label.missing(), vec![1]);

        let laid = label.layout();
        assert!(laid.glyphs[0].measured);
        assert!(!laid.glyphs[1].measured);
        assert_eq!(laid.glyphs[1].angle, Radians::ZERO);
        // glyph 2 ignores the unmeasured gap before it
        assert_close(laid.glyphs[2].angle.value(), angular_width(16.0, 20.0).value());
    }

    #[test]
    fn test_absorb_ignores_out_of_range_and_repeats() {
        let mut label = ArcLabel::new("ab", 10.0, 0.0);
        let mut report = widths(&[4.0, 4.0]);
        report.insert(9, 100.0);
        report.insert(1, f64::NAN);

        assert!(label.absorb(report));
        assert_eq!(label.widths().len(), 1);
        assert!(!label.absorb(widths(&[4.0])));
    }

    #[test]
    fn test_text_change_resets_but_radius_does_not() {
        let mut label = ArcLabel::new("ab", 10.0, 1.0);
        label.absorb(label.measure_with(&Monospace(5.0)));
        assert!(label.is_settled());

        assert!(label.set_radius(20.0));
        assert!(label.is_settled());

        assert!(!label.set_text("ab"));
        assert!(label.set_text("abc"));
        assert_eq!(label.missing(), vec![0, 1, 2]);
    }

    #[test]
    fn test_orientation_deserialization() {
        let cases = vec![
            ("\"upright\"", GlyphOrientation::Upright),
            ("\"Tangential\"", GlyphOrientation::Tangential),
            ("\"TANGENTIAL\"", GlyphOrientation::Tangential),
        ];

        for (json, expected) in cases {
            let deserialized: GlyphOrientation = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
