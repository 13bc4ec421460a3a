use serde::{Deserialize, Serialize};

use crate::core::Point;

/// One segment command of a drawable path in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bezier curve from the current point.
    QuadTo { control: Point, end: Point },
    Close,
}

impl PathCommand {
    #[must_use]
    pub fn is_finite(self) -> bool {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => point.is_finite(),
            Self::QuadTo { control, end } => control.is_finite() && end.is_finite(),
            Self::Close => true,
        }
    }

    /// Point the pen rests on after this command, if the command moves it.
    #[must_use]
    pub fn end_point(self) -> Option<Point> {
        match self {
            Self::MoveTo(point) | Self::LineTo(point) => Some(point),
            Self::QuadTo { end, .. } => Some(end),
            Self::Close => None,
        }
    }
}
