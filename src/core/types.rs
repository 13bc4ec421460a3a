use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn ensure_valid(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    #[must_use]
    pub fn width_px(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_px(self) -> f64 {
        f64::from(self.height)
    }

    #[must_use]
    pub fn min_dimension(self) -> f64 {
        self.width_px().min(self.height_px())
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.width_px() / 2.0, self.height_px() / 2.0)
    }

    /// Whole viewport as a pixel rectangle anchored at the origin.
    #[must_use]
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width_px(), self.height_px())
    }
}

/// Axis-aligned region in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn center(self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn min_dimension(self) -> f64 {
        self.width.min(self.height)
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn is_drawable(self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Splits into a top part of `top_fraction` of the height and the rest.
    #[must_use]
    pub fn split_top(self, top_fraction: f64) -> (Self, Self) {
        let top_height = self.height * top_fraction.clamp(0.0, 1.0);
        (
            Self::new(self.x, self.y, self.width, top_height),
            Self::new(self.x, self.y + top_height, self.width, self.height - top_height),
        )
    }
}

/// Position in pixel space, y growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Animation progress fraction driven by the host's tweening engine.
///
/// Charts only read this value to scale drawn extents; they never advance it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AnimationProgress(f64);

impl AnimationProgress {
    pub const START: Self = Self(0.0);
    pub const COMPLETE: Self = Self(1.0);

    /// Builds a progress value, clamping finite input into `[0, 1]`.
    pub fn new(value: f64) -> ChartResult<Self> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData(
                "animation progress must be finite".to_owned(),
            ));
        }
        Ok(Self(value.clamp(0.0, 1.0)))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }
}

impl Default for AnimationProgress {
    fn default() -> Self {
        Self::COMPLETE
    }
}

impl TryFrom<f64> for AnimationProgress {
    type Error = ChartError;

    fn try_from(value: f64) -> ChartResult<Self> {
        Self::new(value)
    }
}

impl From<AnimationProgress> for f64 {
    fn from(progress: AnimationProgress) -> Self {
        progress.0
    }
}
