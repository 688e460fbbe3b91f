//! Direct-manipulation drag handling.
//!
//! A drag is `Idle -> Dragging -> Idle`. Hosts must deliver either `End` or
//! `Cancel` for every `Begin`; both return the machine to `Idle`, `Cancel`
//! without committing anything.

use crate::geometry::Point;
use strum::{Display as StrumDisplay, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Begin(Point),
    /// Absolute pointer location.
    Update(Point),
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { start: Point, location: Point },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    Started,
    Moved,
    /// Carries the final translation.
    Ended(Point),
    Cancelled,
    Ignored,
}

impl DragState {
    pub fn handle(&mut self, event: DragEvent) -> Transition {
        match (*self, event) {
            (_, DragEvent::Begin(p)) => {
                *self = Self::Dragging {
                    start: p,
                    location: p,
                };
                Transition::Started
            }
            (Self::Dragging { start, .. }, DragEvent::Update(p)) => {
                *self = Self::Dragging { start, location: p };
                Transition::Moved
            }
            (Self::Dragging { .. }, DragEvent::End) => {
                let translation = self.translation();
                *self = Self::Idle;
                Transition::Ended(translation)
            }
            (Self::Dragging { .. }, DragEvent::Cancel) => {
                *self = Self::Idle;
                Transition::Cancelled
            }
            (Self::Idle, _) => Transition::Ignored,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }

    pub fn location(&self) -> Option<Point> {
        match self {
            Self::Dragging { location, .. } => Some(*location),
            Self::Idle => None,
        }
    }

    /// Zero when idle.
    pub fn translation(&self) -> Point {
        match self {
            Self::Dragging { start, location } => *location - *start,
            Self::Idle => Point::ORIGIN,
        }
    }
}

/// Highlight that follows the pointer while a free drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Flashlight {
    drag: DragState,
}

impl Flashlight {
    /// Returns true when the highlight moved, appeared or vanished.
    pub fn handle(&mut self, event: DragEvent) -> bool {
        self.drag.handle(event) != Transition::Ignored
    }

    pub fn spot(&self) -> Option<Point> {
        self.drag.location()
    }

    pub fn is_active(&self) -> bool {
        self.drag.is_dragging()
    }
}

pub const SHEET_HIDDEN_OFFSET: f64 = 1000.0;
pub const SHEET_PARTIAL_OFFSET: f64 = 340.0;
pub const SHEET_FULL_LIFT: f64 = -280.0;
/// Downward drag (beyond the current lift) that dismisses the sheet.
pub const SHEET_DISMISS_THRESHOLD: f64 = 150.0;
/// Upward drag (beyond the current lift) that fully reveals the sheet.
pub const SHEET_EXPAND_THRESHOLD: f64 = -100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumIter, StrumDisplay)]
pub enum SheetPosition {
    #[default]
    Hidden,
    Partial,
    Full,
}

impl SheetPosition {
    pub fn lift(&self) -> f64 {
        match self {
            Self::Full => SHEET_FULL_LIFT,
            Self::Hidden | Self::Partial => 0.0,
        }
    }

    /// Distance of the sheet's top edge from the top of the screen.
    pub fn resting_offset(&self) -> f64 {
        match self {
            Self::Hidden => SHEET_HIDDEN_OFFSET,
            Self::Partial | Self::Full => SHEET_PARTIAL_OFFSET + self.lift(),
        }
    }

    /// Where a vertical drag of `dy` released from `self` comes to rest.
    pub fn settle(&self, dy: f64) -> Self {
        let lift = self.lift();
        if dy > SHEET_DISMISS_THRESHOLD - lift {
            Self::Hidden
        } else if dy < SHEET_EXPAND_THRESHOLD - lift {
            Self::Full
        } else {
            Self::Partial
        }
    }
}

/// Bottom sheet with three snap positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sheet {
    position: SheetPosition,
    drag: DragState,
}

impl Sheet {
    pub fn position(&self) -> SheetPosition {
        self.position
    }

    pub fn is_shown(&self) -> bool {
        self.position != SheetPosition::Hidden
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn toggle(&mut self) -> SheetPosition {
        self.position = match self.position {
            SheetPosition::Hidden => SheetPosition::Partial,
            SheetPosition::Partial | SheetPosition::Full => SheetPosition::Hidden,
        };
        self.drag = DragState::Idle;
        self.position
    }

    /// Resting offset plus the live vertical translation.
    pub fn offset_y(&self) -> f64 {
        self.position.resting_offset() + self.drag.translation().y
    }

    /// Drags on a hidden sheet are ignored, but `End`/`Cancel` always reset.
    /// Returns the new position when a release committed one.
    pub fn handle(&mut self, event: DragEvent) -> Option<SheetPosition> {
        if !self.is_shown() && matches!(event, DragEvent::Begin(_)) {
            return None;
        }
        match self.drag.handle(event) {
            Transition::Ended(translation) => {
                self.position = self.position.settle(translation.y);
                Some(self.position)
            }
            _ => None,
        }
    }
}
