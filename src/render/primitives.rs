use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::{PathCommand, Point};
use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.533, 0.533, 0.533);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn from_rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Same color with `alpha` replacing the current alpha channel.
    #[must_use]
    pub const fn with_alpha(self, alpha: f64) -> Self {
        Self::rgba(self.red, self.green, self.blue, alpha)
    }

    /// Same color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn fade(self, factor: f64) -> Self {
        self.with_alpha(self.alpha * factor)
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Stroke pattern for lines and path outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineStrokeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStrokeStyle {
    /// Dash lengths in stroke-width units, empty for solid strokes.
    #[must_use]
    pub fn dash_pattern(self, stroke_width: f64) -> SmallVec<[f64; 2]> {
        let unit = stroke_width.max(1.0);
        match self {
            Self::Solid => SmallVec::new(),
            Self::Dashed => smallvec![unit * 4.0, unit * 3.0],
            Self::Dotted => smallvec![unit, unit * 2.0],
        }
    }
}

fn ensure_finite_points(points: &[Point], what: &str) -> ChartResult<()> {
    if points.iter().all(|point| point.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn ensure_stroke_width(stroke_width: f64, what: &str) -> ChartResult<()> {
    if !stroke_width.is_finite() || stroke_width <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{what} stroke width must be finite and > 0"
        )));
    }
    Ok(())
}

fn ensure_radius(radius: f64, what: &str) -> ChartResult<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{what} radius must be finite and >= 0"
        )));
    }
    Ok(())
}

/// Draw command for one line segment in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub stroke_width: f64,
    pub color: Color,
    pub stroke_style: LineStrokeStyle,
}

impl LinePrimitive {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64, stroke_width: f64, color: Color) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            stroke_width,
            color,
            stroke_style: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub fn between(from: Point, to: Point, stroke_width: f64, color: Color) -> Self {
        Self::new(from.x, from.y, to.x, to.y, stroke_width, color)
    }

    #[must_use]
    pub const fn with_stroke_style(mut self, stroke_style: LineStrokeStyle) -> Self {
        self.stroke_style = stroke_style;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite_points(
            &[Point::new(self.x1, self.y1), Point::new(self.x2, self.y2)],
            "line",
        )?;
        ensure_stroke_width(self.stroke_width, "line")?;
        self.color.validate()
    }
}

/// Whether a closed shape is filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapePaint {
    Fill,
    Stroke { width: f64 },
}

impl ShapePaint {
    fn validate(self, what: &str) -> ChartResult<()> {
        match self {
            Self::Fill => Ok(()),
            Self::Stroke { width } => ensure_stroke_width(width, what),
        }
    }
}

/// Draw command for a full circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub color: Color,
    pub paint: ShapePaint,
}

impl CirclePrimitive {
    #[must_use]
    pub const fn new(center: Point, radius: f64, color: Color, paint: ShapePaint) -> Self {
        Self {
            center,
            radius,
            color,
            paint,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite_points(&[self.center], "circle")?;
        ensure_radius(self.radius, "circle")?;
        self.paint.validate("circle")?;
        self.color.validate()
    }
}

/// Draw command for a circular arc.
///
/// Angles are in degrees, 0 along +x, growing clockwise on screen.
/// `ShapePaint::Fill` draws a wedge closed through the center;
/// `ShapePaint::Stroke` draws a ring segment of the given width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPrimitive {
    pub center: Point,
    pub radius: f64,
    pub start_deg: f64,
    pub sweep_deg: f64,
    pub color: Color,
    pub paint: ShapePaint,
}

impl ArcPrimitive {
    #[must_use]
    pub const fn new(
        center: Point,
        radius: f64,
        start_deg: f64,
        sweep_deg: f64,
        color: Color,
        paint: ShapePaint,
    ) -> Self {
        Self {
            center,
            radius,
            start_deg,
            sweep_deg,
            color,
            paint,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        ensure_finite_points(&[self.center], "arc")?;
        ensure_radius(self.radius, "arc")?;
        if !self.start_deg.is_finite() || !self.sweep_deg.is_finite() {
            return Err(ChartError::InvalidData(
                "arc angles must be finite".to_owned(),
            ));
        }
        self.paint.validate("arc")?;
        self.color.validate()
    }
}

/// Color stop of a gradient, `offset` in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

/// How a path is painted.
#[derive(Debug, Clone, PartialEq)]
pub enum PathPaint {
    Stroke {
        color: Color,
        width: f64,
        style: LineStrokeStyle,
    },
    Fill {
        color: Color,
    },
    /// Top-to-bottom gradient between `start_y` and `end_y`.
    VerticalGradient {
        start_y: f64,
        end_y: f64,
        stops: SmallVec<[GradientStop; 2]>,
    },
}

impl PathPaint {
    #[must_use]
    pub fn vertical_fade(top: Color, bottom: Color, start_y: f64, end_y: f64) -> Self {
        Self::VerticalGradient {
            start_y,
            end_y,
            stops: smallvec![
                GradientStop {
                    offset: 0.0,
                    color: top,
                },
                GradientStop {
                    offset: 1.0,
                    color: bottom,
                },
            ],
        }
    }

    fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Stroke { color, width, .. } => {
                ensure_stroke_width(*width, "path")?;
                color.validate()
            }
            Self::Fill { color } => color.validate(),
            Self::VerticalGradient {
                start_y,
                end_y,
                stops,
            } => {
                if !start_y.is_finite() || !end_y.is_finite() {
                    return Err(ChartError::InvalidData(
                        "gradient bounds must be finite".to_owned(),
                    ));
                }
                if stops.is_empty() {
                    return Err(ChartError::InvalidData(
                        "gradient needs at least one stop".to_owned(),
                    ));
                }
                for stop in stops {
                    if !(0.0..=1.0).contains(&stop.offset) {
                        return Err(ChartError::InvalidData(
                            "gradient stop offset must be in [0, 1]".to_owned(),
                        ));
                    }
                    stop.color.validate()?;
                }
                Ok(())
            }
        }
    }
}

/// Draw command for an arbitrary path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPrimitive {
    pub commands: Vec<PathCommand>,
    pub paint: PathPaint,
}

impl PathPrimitive {
    #[must_use]
    pub fn new(commands: Vec<PathCommand>, paint: PathPaint) -> Self {
        Self { commands, paint }
    }

    pub fn validate(&self) -> ChartResult<()> {
        match self.commands.first() {
            Some(PathCommand::MoveTo(_)) => {}
            Some(_) => {
                return Err(ChartError::InvalidData(
                    "path must start with a move command".to_owned(),
                ));
            }
            None => {
                return Err(ChartError::InvalidData(
                    "path must not be empty".to_owned(),
                ));
            }
        }
        if !self.commands.iter().all(|command| command.is_finite()) {
            return Err(ChartError::InvalidData(
                "path coordinates must be finite".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

/// Horizontal text alignment relative to `TextPrimitive::x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextHAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Draw command for one label in pixel space. `y` is the top of the text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size_px: f64,
    pub color: Color,
    pub h_align: TextHAlign,
}

impl TextPrimitive {
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        h_align: TextHAlign,
    ) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size_px,
            color,
            h_align,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.x.is_finite() || !self.y.is_finite() {
            return Err(ChartError::InvalidData(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Axis-aligned clip region in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ClipRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.x.is_finite()
            || !self.y.is_finite()
            || !self.width.is_finite()
            || !self.height.is_finite()
            || self.width < 0.0
            || self.height < 0.0
        {
            return Err(ChartError::InvalidData(
                "clip rect must be finite with size >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, LineStrokeStyle, PathPaint, PathPrimitive};
    use crate::core::{PathCommand, Point};

    #[test]
    fn path_must_start_with_move() {
        let paint = PathPaint::Fill {
            color: Color::BLACK,
        };
        let path = PathPrimitive::new(vec![PathCommand::LineTo(Point::new(1.0, 1.0))], paint);
        assert!(path.validate().is_err());
    }

    #[test]
    fn solid_strokes_have_no_dashes() {
        assert!(LineStrokeStyle::Solid.dash_pattern(2.0).is_empty());
        assert_eq!(LineStrokeStyle::Dashed.dash_pattern(2.0).as_slice(), &[8.0, 6.0]);
    }

    #[test]
    fn fade_scales_alpha() {
        let color = Color::rgba(1.0, 0.0, 0.0, 0.5).fade(0.5);
        assert!((color.alpha - 0.25).abs() <= 1e-12);
    }
}
