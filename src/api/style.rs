use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle, TextHAlign, TextPrimitive, text_metrics};

/// Font size and color for one family of labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    #[serde(default = "default_font_size_px")]
    pub font_size_px: f64,
    #[serde(default = "default_text_color")]
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size_px: default_font_size_px(),
            color: default_text_color(),
        }
    }
}

impl TextStyle {
    #[must_use]
    pub const fn new(font_size_px: f64, color: Color) -> Self {
        Self {
            font_size_px,
            color,
        }
    }

    #[must_use]
    pub const fn with_font_size(mut self, font_size_px: f64) -> Self {
        self.font_size_px = font_size_px;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "text style font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }

    #[must_use]
    pub fn text_width(self, text: &str) -> f64 {
        text_metrics::estimate_text_width_px(text, self.font_size_px)
    }

    #[must_use]
    pub fn text_height(self) -> f64 {
        text_metrics::estimate_text_height_px(self.font_size_px)
    }

    #[must_use]
    pub fn primitive(
        self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        h_align: TextHAlign,
    ) -> TextPrimitive {
        TextPrimitive::new(text, x, y, self.font_size_px, self.color, h_align)
    }
}

/// Stroke settings shared by outlines and guide lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: Color,
    #[serde(default = "default_stroke_width")]
    pub width: f64,
    #[serde(default)]
    pub pattern: LineStrokeStyle,
}

impl StrokeStyle {
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            pattern: LineStrokeStyle::Solid,
        }
    }

    #[must_use]
    pub const fn with_pattern(mut self, pattern: LineStrokeStyle) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(ChartError::InvalidData(
                "stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

pub(super) fn validate_alpha(alpha: f64, what: &str) -> ChartResult<()> {
    if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
        return Err(ChartError::InvalidData(format!(
            "{what} alpha must be finite and in [0, 1]"
        )));
    }
    Ok(())
}

fn default_font_size_px() -> f64 {
    14.0
}

fn default_text_color() -> Color {
    Color::BLACK
}

fn default_stroke_width() -> f64 {
    1.0
}
