use super::{ButtonKind, PRESS_SCALE, SHOWN_TILT, SHOWN_WAYPOINT_SCALE, buttons};
use crate::config::{CompassConfig, HeadingConfig, HeadingSourceKind};
use gyre::angle::Degrees;
use gyre::arc_text::ArcLabel;
use gyre::geometry::{Point, Size};
use gyre::gesture::{DragEvent, Flashlight, Sheet, SheetPosition};
use gyre::heading::{FeedStatus, HeadingSample, HeadingSnapshot, HeadingState};
use gyre::icon::IconName;
use gyre::rotation::{LayerId, RotationComposer};
use gyre::tween::{Motion, Tween};
use palette::Srgba;
use std::time::Duration;

const SHEET_MOTION: Duration = Duration::from_millis(500);
const PRESS_HOLD: Duration = Duration::from_millis(200);
const PRESS_RELEASE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub title: String,
    pub icon: IconName,
    pub color: Srgba<f64>,
    pub bearing: Degrees,
    pub latitude: String,
    pub longitude: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfoRow {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragTarget {
    Sheet,
    Flashlight,
}

/// Everything the compass face draws from, updated by messages on the UI
/// thread and read once per frame.
#[derive(Debug, Clone)]
pub struct CompassState {
    pub heading: HeadingState,
    pub composer: RotationComposer,
    pub label: ArcLabel,
    /// Diameter of the ring the label glyphs are drawn on.
    pub label_frame: f64,
    pub font_size: f64,
    pub flashlight: Flashlight,
    pub sheet: Sheet,
    pub waypoints: Vec<Waypoint>,
    pub info: Vec<InfoRow>,
    pub city: String,
    pub canvas: Size,
    /// 0 with the sheet hidden, 1 with it shown.
    presentation: Tween,
    /// Resting top edge of the sheet, animated between snap positions.
    sheet_top: Tween,
    press: Tween,
    release_at: Option<Duration>,
    drag_target: Option<DragTarget>,
    smoothing: Motion,
    stale_after: Option<Duration>,
}

impl CompassState {
    pub fn from_config(cfg: &CompassConfig, heading: &HeadingConfig) -> Self {
        let sheet = Sheet::default();
        let mut state = Self {
            heading: HeadingState::new(),
            composer: RotationComposer::new(),
            label: ArcLabel::new(cfg.label.clone(), cfg.label_radius, cfg.kerning)
                .with_orientation(cfg.orientation),
            label_frame: cfg.label_frame,
            font_size: cfg.font_size,
            flashlight: Flashlight::default(),
            sheet,
            waypoints: Vec::new(),
            info: Vec::new(),
            city: String::new(),
            canvas: Size::new(393.0, 852.0),
            presentation: Tween::at_rest(0.0),
            sheet_top: Tween::at_rest(sheet.position().resting_offset()),
            press: Tween::at_rest(1.0),
            release_at: None,
            drag_target: None,
            smoothing: Motion::INSTANT,
            stale_after: None,
        };
        state.reconfigure(cfg, heading);
        state
    }

    /// Applies new settings, keeping the heading, gestures and any measured
    /// label widths that are still valid.
    pub fn reconfigure(&mut self, cfg: &CompassConfig, heading: &HeadingConfig) {
        self.label.set_text(cfg.label.clone());
        self.label.set_radius(cfg.label_radius);
        self.label.set_kerning(cfg.kerning);
        self.label.set_orientation(cfg.orientation);
        if cfg.font_size != self.font_size {
            self.label.invalidate();
        }
        self.label_frame = cfg.label_frame;
        self.font_size = cfg.font_size;
        self.city = cfg.city.clone();
        self.waypoints = cfg
            .waypoints
            .iter()
            .map(|w| {
                let (r, g, b) = w.color.0.into_format::<f64>().into_components();
                Waypoint {
                    title: w.title.clone(),
                    icon: w.icon.clone(),
                    color: Srgba::new(r, g, b, 1.0),
                    bearing: Degrees::new(w.bearing),
                    latitude: w.latitude.clone(),
                    longitude: w.longitude.clone(),
                }
            })
            .collect();
        self.info = cfg
            .info
            .iter()
            .map(|row| InfoRow {
                title: row.title.clone(),
                text: row.text.clone(),
            })
            .collect();

        self.smoothing = Motion::ease_out(heading.smoothing());
        // A fixed heading never refreshes, so it can never go stale.
        self.stale_after = match heading.source {
            HeadingSourceKind::Fixed => None,
            HeadingSourceKind::Socket | HeadingSourceKind::Simulated => {
                Some(heading.stale_after())
            }
        };
    }

    pub fn snapshot(&self) -> HeadingSnapshot {
        self.heading.snapshot()
    }

    pub fn apply_heading(&mut self, sample: HeadingSample, now: Duration) {
        self.heading.push(sample, now);
        self.composer
            .follow_heading(self.heading.snapshot(), now, self.smoothing);
    }

    /// The composer finishes its last move and then holds.
    pub fn heading_lost(&mut self) {
        self.heading.mark_lost();
    }

    pub fn toggle_sheet(&mut self, now: Duration) {
        self.sheet.toggle();
        self.drag_target = None;
        self.settle_sheet(self.sheet_top.value_at(now), now);
        self.press
            .retarget(PRESS_SCALE, now, Motion::ease_out(PRESS_HOLD));
        self.release_at = Some(now + PRESS_HOLD);
    }

    fn settle_sheet(&mut self, from: f64, now: Duration) {
        let motion = Motion::ease_out(SHEET_MOTION);
        let to = self.sheet.position().resting_offset();
        self.sheet_top = Tween::new(from, to, now, motion);
        let shown = if self.sheet.is_shown() { 1.0 } else { 0.0 };
        self.presentation.retarget(shown, now, motion);
    }

    /// Routes a pointer drag either to the sheet (when it starts on a shown
    /// sheet) or to the flashlight. Returns true when a redraw is needed.
    pub fn pointer(&mut self, event: DragEvent, now: Duration) -> bool {
        if let DragEvent::Begin(p) = event {
            let on_sheet = self.sheet.is_shown() && p.y >= self.sheet_top_at(now);
            self.drag_target = Some(if on_sheet {
                DragTarget::Sheet
            } else {
                DragTarget::Flashlight
            });
        }

        let redraw = match self.drag_target {
            Some(DragTarget::Sheet) => {
                let live = self.sheet.offset_y();
                if let Some(position) = self.sheet.handle(event) {
                    log::debug!("sheet settled at {position}");
                    self.settle_sheet(live, now);
                } else if matches!(event, DragEvent::Cancel) {
                    self.settle_sheet(live, now);
                }
                true
            }
            Some(DragTarget::Flashlight) => self.flashlight.handle(event),
            None => false,
        };

        if matches!(event, DragEvent::End | DragEvent::Cancel) {
            self.drag_target = None;
        }
        redraw
    }

    /// Handles a click; only the list button reacts, and only while the sheet
    /// does not cover it.
    pub fn tap(&mut self, point: Point, now: Duration) -> bool {
        if self.sheet.is_shown() && point.y >= self.sheet_top_at(now) {
            return false;
        }
        let hit = buttons(self.canvas)
            .into_iter()
            .find(|b| b.rect.contains(point))
            .map(|b| b.kind);
        match hit {
            Some(ButtonKind::List) => {
                self.toggle_sheet(now);
                true
            }
            Some(kind) => {
                log::debug!("{kind:?} button has no action");
                false
            }
            None => false,
        }
    }

    /// Per-frame housekeeping. Returns true when the face must be redrawn.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = false;
        if let Some(stale_after) = self.stale_after {
            changed |= self.heading.check_stale(now, stale_after);
        }
        if let Some(at) = self.release_at
            && now >= at
        {
            self.press.retarget(1.0, now, Motion::ease_out(PRESS_RELEASE));
            self.release_at = None;
            changed = true;
        }
        changed || self.is_animating(now)
    }

    pub fn is_animating(&self, now: Duration) -> bool {
        self.composer.is_animating(now)
            || !self.presentation.is_finished(now)
            || !self.sheet_top.is_finished(now)
            || !self.press.is_finished(now)
            || self.release_at.is_some()
    }

    pub fn is_stale(&self) -> bool {
        self.heading.status() == FeedStatus::Stale
    }

    pub fn dial_angle(&self, now: Duration) -> Degrees {
        self.composer.angle(LayerId::Dial, now)
    }

    pub fn needle_angle(&self, now: Duration) -> Degrees {
        self.composer.angle(LayerId::Needle, now)
    }

    pub fn presentation(&self, now: Duration) -> f64 {
        self.presentation.value_at(now)
    }

    /// Top edge of the sheet on screen, following the finger while dragged.
    pub fn sheet_top_at(&self, now: Duration) -> f64 {
        if self.sheet.is_dragging() {
            self.sheet.offset_y()
        } else {
            self.sheet_top.value_at(now)
        }
    }

    pub fn sheet_position(&self) -> SheetPosition {
        self.sheet.position()
    }

    pub fn press_scale(&self, now: Duration) -> f64 {
        self.press.value_at(now)
    }

    /// Vertical squash approximating the dial tilting away from the viewer.
    pub fn dial_squash(&self, now: Duration) -> f64 {
        let tilt = Degrees::new(SHOWN_TILT) * self.presentation(now);
        tilt.to_radians().value().cos()
    }

    pub fn waypoint_scale(&self, now: Duration) -> f64 {
        1.0 - (1.0 - SHOWN_WAYPOINT_SCALE) * self.presentation(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyre::gesture::SHEET_PARTIAL_OFFSET;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn state() -> CompassState {
        CompassState::from_config(&CompassConfig::default(), &HeadingConfig::default())
    }

    fn list_button(state: &CompassState) -> Point {
        buttons(state.canvas)[0].rect.mid()
    }

    #[test]
    fn test_from_config() {
        let s = state();
        assert_eq!(s.waypoints.len(), 3);
        assert_eq!(s.waypoints[1].title, "Home");
        assert!((s.waypoints[0].color.blue - 1.0).abs() < 1e-9);
        assert_eq!(s.label.radius(), 135.0);
        assert_eq!(s.info.len(), 4);
        assert_eq!(s.snapshot().readout(), "0º N");
        assert!(!s.sheet.is_shown());
    }

    #[test]
    fn test_dial_follows_heading_continuously() {
        let mut s = state();
        let mut dial = Vec::new();
        for (i, deg) in [0.0, 10.0, 359.0, 5.0].into_iter().enumerate() {
            let now = ms(i as u64 * 1000);
            s.apply_heading(HeadingSample::new(deg), now);
            dial.push(s.dial_angle(now + ms(1000)).value());
        }
        let expected = [0.0, -10.0, 1.0, -5.0];
        for (got, want) in dial.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{got} != {want}");
        }
        assert!((s.needle_angle(ms(5000)).value() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_heading_near_north_barely_turns() {
        let mut s = state();
        s.apply_heading(HeadingSample::new(350.0), ms(0));
        for t in [0, 50, 125, 250, 1000] {
            assert!(s.dial_angle(ms(t)).value().abs() <= 10.0 + 1e-9);
        }
        assert!((s.dial_angle(ms(1000)).value() - 10.0).abs() < 1e-9);
        assert_eq!(s.snapshot().readout(), "350º N");
    }

    #[test]
    fn test_stale_feed_freezes_heading() {
        let mut s = state();
        s.apply_heading(HeadingSample::new(90.0), ms(0));
        assert!(!s.tick(ms(1000)));
        assert!(!s.is_stale());

        assert!(s.tick(ms(6000)));
        assert!(s.is_stale());
        assert!((s.dial_angle(ms(7000)).value() + 90.0).abs() < 1e-9);
        assert_eq!(s.snapshot().readout(), "90º E");
    }

    #[test]
    fn test_fixed_source_never_goes_stale() {
        let heading = HeadingConfig {
            source: HeadingSourceKind::Fixed,
            ..HeadingConfig::default()
        };
        let mut s = CompassState::from_config(&CompassConfig::default(), &heading);
        s.apply_heading(HeadingSample::new(45.0), ms(0));
        s.tick(ms(60_000));
        assert!(!s.is_stale());
    }

    #[test]
    fn test_list_button_toggles_sheet_with_pulse() {
        let mut s = state();
        let at = list_button(&s);
        assert!(s.tap(at, ms(0)));
        assert!(s.sheet.is_shown());
        assert!(s.press_scale(ms(100)) > 1.0);
        assert!((s.press_scale(ms(200)) - PRESS_SCALE).abs() < 1e-9);

        assert!(s.tick(ms(250)));
        assert!((s.press_scale(ms(600)) - 1.0).abs() < 1e-9);
        assert!((s.sheet_top_at(ms(600)) - SHEET_PARTIAL_OFFSET).abs() < 1e-9);
        assert!((s.presentation(ms(600)) - 1.0).abs() < 1e-9);

        s.toggle_sheet(ms(1000));
        assert!(!s.sheet.is_shown());
        assert!(s.tap(at, ms(2000)));
        assert!(s.sheet.is_shown());
    }

    #[test]
    fn test_shown_sheet_covers_button_row() {
        let mut s = state();
        let at = list_button(&s);
        assert!(s.tap(at, ms(0)));
        assert!(at.y >= s.sheet_top_at(ms(1000)));

        assert!(!s.tap(at, ms(1000)));
        assert!(s.sheet.is_shown());
        assert_eq!(s.sheet_position(), SheetPosition::Partial);

        // As it starts sliding up the sheet is still below the row.
        s.toggle_sheet(ms(2000));
        s.toggle_sheet(ms(3000));
        assert!(at.y < s.sheet_top_at(ms(3000)));
        assert!(s.tap(at, ms(3000)));
        assert!(!s.sheet.is_shown());
    }

    #[test]
    fn test_taps_outside_list_button_do_nothing() {
        let mut s = state();
        assert!(!s.tap(Point::new(5.0, 5.0), ms(0)));
        assert!(!s.tap(buttons(s.canvas)[1].rect.mid(), ms(0)));
        assert!(!s.sheet.is_shown());
    }

    #[test]
    fn test_drag_on_hidden_sheet_moves_flashlight() {
        let mut s = state();
        assert!(s.pointer(DragEvent::Begin(Point::new(100.0, 600.0)), ms(0)));
        assert!(s.pointer(DragEvent::Update(Point::new(120.0, 610.0)), ms(10)));
        assert_eq!(s.flashlight.spot(), Some(Point::new(120.0, 610.0)));
        assert!(s.pointer(DragEvent::End, ms(20)));
        assert_eq!(s.flashlight.spot(), None);
        assert_eq!(s.sheet_position(), SheetPosition::Hidden);
    }

    #[test]
    fn test_drag_on_shown_sheet_settles_it() {
        let mut s = state();
        s.toggle_sheet(ms(0));
        let now = ms(1000);

        // Above the sheet: flashlight.
        s.pointer(DragEvent::Begin(Point::new(100.0, 200.0)), now);
        assert!(s.flashlight.is_active());
        s.pointer(DragEvent::Cancel, now);
        assert!(!s.flashlight.is_active());

        // On the sheet: an upward drag expands it.
        s.pointer(DragEvent::Begin(Point::new(100.0, 400.0)), now);
        assert!(!s.flashlight.is_active());
        s.pointer(DragEvent::Update(Point::new(100.0, 250.0)), now);
        assert!((s.sheet_top_at(now) - (SHEET_PARTIAL_OFFSET - 150.0)).abs() < 1e-9);
        s.pointer(DragEvent::End, now);
        assert_eq!(s.sheet_position(), SheetPosition::Full);
        // Continues from where the finger let go.
        assert!((s.sheet_top_at(now) - (SHEET_PARTIAL_OFFSET - 150.0)).abs() < 1e-9);
        assert!((s.sheet_top_at(ms(2000)) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_cancelled_sheet_drag_returns_to_rest() {
        let mut s = state();
        s.toggle_sheet(ms(0));
        let now = ms(1000);
        s.pointer(DragEvent::Begin(Point::new(100.0, 400.0)), now);
        s.pointer(DragEvent::Update(Point::new(100.0, 700.0)), now);
        s.pointer(DragEvent::Cancel, now);
        assert_eq!(s.sheet_position(), SheetPosition::Partial);
        assert!((s.sheet_top_at(ms(2000)) - SHEET_PARTIAL_OFFSET).abs() < 1e-9);
    }

    #[test]
    fn test_tilt_follows_presentation() {
        let mut s = state();
        assert!((s.dial_squash(ms(0)) - 1.0).abs() < 1e-9);
        s.toggle_sheet(ms(0));
        let tilt = SHOWN_TILT.to_radians().cos();
        assert!((s.dial_squash(ms(1000)) - tilt).abs() < 1e-9);
        assert!((s.waypoint_scale(ms(1000)) - SHOWN_WAYPOINT_SCALE).abs() < 1e-9);
    }

    #[test]
    fn test_reconfigure_drops_widths_only_when_needed() {
        let mut s = state();
        let report = (0..s.label.text().chars().count()).map(|i| (i, 8.0)).collect();
        s.label.absorb(report);
        assert!(s.label.is_settled());

        let mut cfg = CompassConfig::default();
        cfg.label_radius = 150.0;
        cfg.city = "Oslo".to_string();
        s.reconfigure(&cfg, &HeadingConfig::default());
        assert!(s.label.is_settled());
        assert_eq!(s.city, "Oslo");

        cfg.font_size = 14.0;
        s.reconfigure(&cfg, &HeadingConfig::default());
        assert!(!s.label.is_settled());
    }
}
