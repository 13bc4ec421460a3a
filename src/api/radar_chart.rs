use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AnimationProgress, RadarLayout, Viewport, polar_to_cartesian, polygon_vertices,
    validate_radar,
};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, LineStrokeStyle, PathBuilder, PathPaint, RenderFrame, TextHAlign,
};

use super::style::validate_alpha;
use super::{Chart, TextStyle, format_scalar_value};

const AXIS_LABEL_OFFSET_PX: f64 = 12.0;
const SCALAR_LABEL_OFFSET_PX: f64 = 4.0;
/// Below this |cos| or |sin| a label is centered on its ray end.
const LABEL_ALIGN_THRESHOLD: f64 = 0.1;

/// Look of the radar net: concentric rings and axis rays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NetLinesStyle {
    pub net_line_color: Color,
    #[serde(default = "default_net_stroke_width")]
    pub net_lines_stroke_width: f64,
    #[serde(default)]
    pub net_lines_stroke_style: LineStrokeStyle,
}

impl Default for NetLinesStyle {
    fn default() -> Self {
        Self {
            net_line_color: Color::GRAY,
            net_lines_stroke_width: default_net_stroke_width(),
            net_lines_stroke_style: LineStrokeStyle::Solid,
        }
    }
}

/// Fill and border of one radar polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolygonStyle {
    pub fill_color: Color,
    #[serde(default = "default_fill_alpha")]
    pub fill_color_alpha: f64,
    pub border_color: Color,
    #[serde(default = "default_border_alpha")]
    pub border_color_alpha: f64,
    #[serde(default = "default_border_stroke_width")]
    pub border_stroke_width: f64,
    #[serde(default)]
    pub border_stroke_style: LineStrokeStyle,
}

impl PolygonStyle {
    #[must_use]
    pub fn new(fill_color: Color, border_color: Color) -> Self {
        Self {
            fill_color,
            fill_color_alpha: default_fill_alpha(),
            border_color,
            border_color_alpha: default_border_alpha(),
            border_stroke_width: default_border_stroke_width(),
            border_stroke_style: LineStrokeStyle::Solid,
        }
    }

    fn validate(self) -> ChartResult<()> {
        self.fill_color.validate()?;
        self.border_color.validate()?;
        validate_alpha(self.fill_color_alpha, "polygon fill")?;
        validate_alpha(self.border_color_alpha, "polygon border")?;
        super::StrokeStyle::new(self.border_color, self.border_stroke_width).validate()
    }
}

/// One data series of a radar chart, one value per axis label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub values: Vec<f64>,
    #[serde(default)]
    pub unit: String,
    pub style: PolygonStyle,
}

impl Polygon {
    #[must_use]
    pub fn new(values: Vec<f64>, unit: impl Into<String>, style: PolygonStyle) -> Self {
        Self {
            values,
            unit: unit.into(),
            style,
        }
    }
}

/// Radar chart plotting polygons over equally spaced radial axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadarChart {
    pub radar_labels: Vec<String>,
    #[serde(default)]
    pub labels_style: TextStyle,
    #[serde(default)]
    pub net_lines_style: NetLinesStyle,
    pub scalar_steps: i32,
    pub scalar_value: f64,
    #[serde(default)]
    pub scalar_values_style: TextStyle,
    pub polygons: Vec<Polygon>,
}

impl RadarChart {
    #[must_use]
    pub fn new(
        radar_labels: Vec<String>,
        scalar_steps: i32,
        scalar_value: f64,
        polygons: Vec<Polygon>,
    ) -> Self {
        Self {
            radar_labels,
            labels_style: TextStyle::default(),
            net_lines_style: NetLinesStyle::default(),
            scalar_steps,
            scalar_value,
            scalar_values_style: TextStyle::default().with_font_size(10.0),
            polygons,
        }
    }

    #[must_use]
    pub fn with_labels_style(mut self, style: TextStyle) -> Self {
        self.labels_style = style;
        self
    }

    #[must_use]
    pub fn with_net_lines_style(mut self, style: NetLinesStyle) -> Self {
        self.net_lines_style = style;
        self
    }

    #[must_use]
    pub fn with_scalar_values_style(mut self, style: TextStyle) -> Self {
        self.scalar_values_style = style;
        self
    }

    pub fn resolve_layout(&self, viewport: Viewport) -> ChartResult<RadarLayout> {
        RadarLayout::resolve(viewport, self.radar_labels.len(), self.scalar_steps)
    }

    /// Unit shown next to scalar values, taken from the first polygon.
    #[must_use]
    pub fn scalar_unit(&self) -> &str {
        self.polygons.first().map_or("", |polygon| polygon.unit.as_str())
    }

    fn push_net(&self, frame: &mut RenderFrame, layout: &RadarLayout) {
        let style = self.net_lines_style;
        for &radius in &layout.ring_radii {
            let mut ring = PathBuilder::new();
            ring.polygon(&layout.ring_points(radius));
            frame.push_path(ring.build(PathPaint::Stroke {
                color: style.net_line_color,
                width: style.net_lines_stroke_width,
                style: style.net_lines_stroke_style,
            }));
        }
        for end in layout.axis_end_points() {
            frame.push_line(
                LinePrimitive::between(
                    layout.center,
                    end,
                    style.net_lines_stroke_width,
                    style.net_line_color,
                )
                .with_stroke_style(style.net_lines_stroke_style),
            );
        }
    }

    fn push_polygons(
        &self,
        frame: &mut RenderFrame,
        layout: &RadarLayout,
        progress: AnimationProgress,
    ) {
        for polygon in &self.polygons {
            let vertices = polygon_vertices(&polygon.values, layout, self.scalar_value, progress);
            let mut builder = PathBuilder::new();
            builder.polygon(&vertices);
            let style = polygon.style;
            frame.push_path(builder.clone().build(PathPaint::Stroke {
                color: style.border_color.fade(style.border_color_alpha),
                width: style.border_stroke_width,
                style: style.border_stroke_style,
            }));
            frame.push_path(builder.build(PathPaint::Fill {
                color: style.fill_color.fade(style.fill_color_alpha),
            }));
        }
    }

    fn push_axis_labels(&self, frame: &mut RenderFrame, layout: &RadarLayout) {
        let style = self.labels_style;
        let text_height = style.text_height();
        for (label, &angle) in self.radar_labels.iter().zip(&layout.axis_angles_deg) {
            if label.is_empty() {
                continue;
            }
            let anchor =
                polar_to_cartesian(layout.center, layout.radius + AXIS_LABEL_OFFSET_PX, angle);
            let (cos, sin) = (angle.to_radians().cos(), angle.to_radians().sin());
            let h_align = if cos > LABEL_ALIGN_THRESHOLD {
                TextHAlign::Left
            } else if cos < -LABEL_ALIGN_THRESHOLD {
                TextHAlign::Right
            } else {
                TextHAlign::Center
            };
            let y = if sin < -LABEL_ALIGN_THRESHOLD {
                anchor.y - text_height
            } else if sin > LABEL_ALIGN_THRESHOLD {
                anchor.y
            } else {
                anchor.y - text_height / 2.0
            };
            frame.push_text(style.primitive(label.as_str(), anchor.x, y, h_align));
        }
    }

    fn push_scalar_labels(&self, frame: &mut RenderFrame, layout: &RadarLayout) {
        let Some(&first_axis) = layout.axis_angles_deg.first() else {
            return;
        };
        let style = self.scalar_values_style;
        let steps = layout.ring_radii.len();
        let unit = self.scalar_unit();
        for (step, &radius) in layout.ring_radii.iter().enumerate() {
            let value = self.scalar_value * (step + 1) as f64 / steps as f64;
            let point = polar_to_cartesian(layout.center, radius, first_axis);
            frame.push_text(style.primitive(
                format_scalar_value(value, unit),
                point.x + SCALAR_LABEL_OFFSET_PX,
                point.y - style.text_height() / 2.0,
                TextHAlign::Left,
            ));
        }
    }
}

impl Chart for RadarChart {
    fn kind(&self) -> &'static str {
        "radar"
    }

    fn validate(&self) -> ChartResult<()> {
        validate_radar(
            self.radar_labels.len(),
            self.scalar_value,
            self.polygons.iter().map(|polygon| polygon.values.as_slice()),
            self.scalar_steps,
        )?;
        for polygon in &self.polygons {
            polygon.style.validate()?;
        }
        self.labels_style.validate()?;
        self.scalar_values_style.validate()?;
        super::StrokeStyle::new(
            self.net_lines_style.net_line_color,
            self.net_lines_style.net_lines_stroke_width,
        )
        .validate()
    }

    fn build_frame(
        &self,
        viewport: Viewport,
        progress: AnimationProgress,
    ) -> ChartResult<RenderFrame> {
        self.validate()?;
        let layout = self.resolve_layout(viewport)?;
        debug!(
            axes = self.radar_labels.len(),
            polygons = self.polygons.len(),
            rings = layout.ring_radii.len(),
            radius = layout.radius,
            "compose radar frame"
        );

        let mut frame = RenderFrame::new(viewport);
        self.push_net(&mut frame, &layout);
        self.push_polygons(&mut frame, &layout, progress);
        self.push_axis_labels(&mut frame, &layout);
        self.push_scalar_labels(&mut frame, &layout);
        Ok(frame)
    }
}

fn default_net_stroke_width() -> f64 {
    1.0
}

fn default_fill_alpha() -> f64 {
    0.4
}

fn default_border_alpha() -> f64 {
    1.0
}

fn default_border_stroke_width() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::{Polygon, PolygonStyle, RadarChart};
    use crate::api::Chart;
    use crate::core::{AnimationProgress, Viewport};
    use crate::render::Color;

    #[test]
    fn scalar_labels_use_first_polygon_unit() {
        let style = PolygonStyle::new(Color::BLACK, Color::BLACK);
        let chart = RadarChart::new(
            vec!["a".into(), "b".into(), "c".into()],
            2,
            10.0,
            vec![Polygon::new(vec![1.0, 2.0, 3.0], "pts", style)],
        );
        let frame = chart
            .build_frame(Viewport::new(300, 300), AnimationProgress::COMPLETE)
            .expect("frame");
        let texts: Vec<&str> = frame.texts().iter().map(|text| text.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c", "5 pts", "10 pts"]);
    }
}
