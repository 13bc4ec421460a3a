use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AnimationProgress, LineLayout, PathCommand, Point, ValueRange, Viewport, close_to_baseline,
    project_quadratic_line, project_straight_line,
};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ClipRect, Color, DrawCommand, LinePrimitive, LineStrokeStyle, PathPaint, PathPrimitive,
    RenderFrame, TextHAlign,
};

use super::legend::{LegendEntry, layout_horizontal_legend};
use super::{Chart, StrokeStyle, TextStyle, format_compact};

/// Alpha of the line color at the top of a shadow gradient.
pub const SHADOW_TOP_ALPHA: f64 = 0.3;
/// Upper bound on y-axis subdivisions; each one becomes a grid line and a label.
pub const MAX_Y_AXIS_STEPS: u32 = 1_000;
const AXIS_LABEL_GAP_PX: f64 = 6.0;
const LEGEND_BOTTOM_MARGIN_PX: f64 = 4.0;

/// How consecutive points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineType {
    /// Straight segments.
    Default,
    /// Quadratic curves through segment midpoints.
    #[default]
    Quadratic,
}

/// Whether the area under a line is filled with a fading gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineShadow {
    Shadow,
    #[default]
    None,
}

/// One series of a line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineParameters {
    pub label: String,
    pub data: Vec<f64>,
    pub line_color: Color,
    #[serde(default)]
    pub line_type: LineType,
    #[serde(default)]
    pub line_shadow: LineShadow,
    #[serde(default = "default_line_stroke_width")]
    pub stroke_width: f64,
}

impl LineParameters {
    #[must_use]
    pub fn new(label: impl Into<String>, data: Vec<f64>, line_color: Color) -> Self {
        Self {
            label: label.into(),
            data,
            line_color,
            line_type: LineType::default(),
            line_shadow: LineShadow::default(),
            stroke_width: default_line_stroke_width(),
        }
    }

    #[must_use]
    pub fn with_line_type(mut self, line_type: LineType) -> Self {
        self.line_type = line_type;
        self
    }

    #[must_use]
    pub fn with_shadow(mut self, line_shadow: LineShadow) -> Self {
        self.line_shadow = line_shadow;
        self
    }

    #[must_use]
    pub fn with_stroke_width(mut self, stroke_width: f64) -> Self {
        self.stroke_width = stroke_width;
        self
    }

    /// Path commands of this series' stroke.
    pub fn stroke_commands(&self, layout: LineLayout) -> ChartResult<Vec<PathCommand>> {
        match self.line_type {
            LineType::Default => project_straight_line(&self.data, layout),
            LineType::Quadratic => project_quadratic_line(&self.data, layout),
        }
    }
}

/// Axis, grid, and spacing settings of a line chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartStyle {
    /// Horizontal room reserved for y-axis labels; half sits left of the first point.
    pub spacing_x: f64,
    /// Vertical room reserved below the plot for x-axis labels and the legend.
    pub spacing_y: f64,
    pub x_axis_style: TextStyle,
    pub y_axis_style: TextStyle,
    pub legend_style: TextStyle,
    pub grid_line: Option<StrokeStyle>,
    pub y_axis_steps: u32,
    pub y_axis_decimals: u8,
    pub show_legend: bool,
}

impl Default for LineChartStyle {
    fn default() -> Self {
        Self {
            spacing_x: 80.0,
            spacing_y: 60.0,
            x_axis_style: TextStyle::default().with_font_size(12.0),
            y_axis_style: TextStyle::default().with_font_size(12.0),
            legend_style: TextStyle::default().with_font_size(12.0),
            grid_line: Some(
                StrokeStyle::new(Color::GRAY.with_alpha(0.4), 1.0)
                    .with_pattern(LineStrokeStyle::Dashed),
            ),
            y_axis_steps: 5,
            y_axis_decimals: 2,
            show_legend: true,
        }
    }
}

/// Multi-series line chart revealed left to right by animation progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineChart {
    pub lines: Vec<LineParameters>,
    #[serde(default)]
    pub x_axis_data: Vec<String>,
    /// Explicit `(lower, upper)` value range; derived from the data when absent.
    #[serde(default)]
    pub value_range: Option<(f64, f64)>,
    #[serde(default)]
    pub style: LineChartStyle,
}

impl LineChart {
    #[must_use]
    pub fn new(lines: Vec<LineParameters>) -> Self {
        Self {
            lines,
            x_axis_data: Vec::new(),
            value_range: None,
            style: LineChartStyle::default(),
        }
    }

    #[must_use]
    pub fn with_x_axis_data(mut self, labels: Vec<String>) -> Self {
        self.x_axis_data = labels;
        self
    }

    #[must_use]
    pub fn with_value_range(mut self, lower: f64, upper: f64) -> Self {
        self.value_range = Some((lower, upper));
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: LineChartStyle) -> Self {
        self.style = style;
        self
    }

    /// Number of points shared by every series.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.lines.first().map_or(0, |line| line.data.len())
    }

    pub fn resolve_range(&self) -> ChartResult<ValueRange> {
        match self.value_range {
            Some((lower, upper)) => ValueRange::new(lower, upper),
            None => ValueRange::covering(self.lines.iter().map(|line| line.data.as_slice())),
        }
    }

    pub fn resolve_layout(&self, viewport: Viewport) -> ChartResult<LineLayout> {
        LineLayout::resolve(
            viewport,
            self.point_count(),
            self.style.spacing_x,
            self.style.spacing_y,
            self.resolve_range()?,
        )
    }

    fn series_commands(
        &self,
        line: &LineParameters,
        layout: LineLayout,
    ) -> ChartResult<Vec<DrawCommand>> {
        let stroke = line.stroke_commands(layout)?;
        let mut commands = Vec::with_capacity(2);
        if line.line_shadow == LineShadow::Shadow {
            commands.push(DrawCommand::Path(PathPrimitive::new(
                close_to_baseline(&stroke, layout),
                PathPaint::vertical_fade(
                    line.line_color.with_alpha(SHADOW_TOP_ALPHA),
                    Color::TRANSPARENT,
                    0.0,
                    layout.baseline_y(),
                ),
            )));
        }
        commands.push(DrawCommand::Path(PathPrimitive::new(
            stroke,
            PathPaint::Stroke {
                color: line.line_color,
                width: line.stroke_width,
                style: LineStrokeStyle::Solid,
            },
        )));
        Ok(commands)
    }

    fn push_grid_and_y_axis(
        &self,
        frame: &mut RenderFrame,
        layout: LineLayout,
    ) -> ChartResult<()> {
        let steps = self.style.y_axis_steps;
        if steps == 0 {
            return Ok(());
        }
        let style = self.style.y_axis_style;
        let left = layout.x_at(0);
        let right = layout.x_at(self.point_count().saturating_sub(1)).max(left);
        let range = layout.range;
        for step in 0..=steps {
            let value =
                range.lower + (range.upper - range.lower) * f64::from(step) / f64::from(steps);
            let y = layout.y_for(value)?;
            if let Some(grid) = self.style.grid_line {
                frame.push_line(
                    LinePrimitive::new(left, y, right, y, grid.width, grid.color)
                        .with_stroke_style(grid.pattern),
                );
            }
            let label_y = (y - style.text_height() / 2.0).max(0.0);
            frame.push_text(style.primitive(
                format_compact(value, self.style.y_axis_decimals),
                left - AXIS_LABEL_GAP_PX,
                label_y,
                TextHAlign::Right,
            ));
        }
        Ok(())
    }

    fn push_x_axis(&self, frame: &mut RenderFrame, layout: LineLayout) {
        let style = self.style.x_axis_style;
        let y = layout.baseline_y() + AXIS_LABEL_GAP_PX;
        for (index, label) in self.x_axis_data.iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            frame.push_text(style.primitive(
                label.clone(),
                layout.x_at(index),
                y,
                TextHAlign::Center,
            ));
        }
    }

    fn push_legend(&self, frame: &mut RenderFrame, layout: LineLayout) {
        if !self.style.show_legend {
            return;
        }
        let style = self.style.legend_style;
        let entries: Vec<LegendEntry<'_>> = self
            .lines
            .iter()
            .map(|line| LegendEntry {
                label: &line.label,
                color: line.line_color,
            })
            .collect();
        let origin = Point::new(
            layout.x_at(0),
            layout.height - style.text_height() - LEGEND_BOTTOM_MARGIN_PX,
        );
        for command in layout_horizontal_legend(&entries, origin, style) {
            frame.push(command);
        }
    }
}

impl Chart for LineChart {
    fn kind(&self) -> &'static str {
        "line"
    }

    fn validate(&self) -> ChartResult<()> {
        let Some(first) = self.lines.first() else {
            return Err(ChartError::InvalidData(
                "line chart needs at least one series".to_owned(),
            ));
        };
        let expected = first.data.len();
        if expected == 0 {
            return Err(ChartError::InvalidData(
                "line series must not be empty".to_owned(),
            ));
        }
        for line in &self.lines {
            if line.data.len() != expected {
                return Err(ChartError::LengthMismatch {
                    what: "line series points",
                    expected,
                    actual: line.data.len(),
                });
            }
            if let Some(index) = line.data.iter().position(|value| !value.is_finite()) {
                return Err(ChartError::InvalidData(format!(
                    "line `{}` value at index {index} must be finite",
                    line.label
                )));
            }
            if !line.stroke_width.is_finite() || line.stroke_width <= 0.0 {
                return Err(ChartError::InvalidData(
                    "line stroke width must be finite and > 0".to_owned(),
                ));
            }
            line.line_color.validate()?;
        }
        if !self.x_axis_data.is_empty() && self.x_axis_data.len() != expected {
            return Err(ChartError::LengthMismatch {
                what: "x-axis labels",
                expected,
                actual: self.x_axis_data.len(),
            });
        }
        if self.style.y_axis_steps > MAX_Y_AXIS_STEPS {
            return Err(ChartError::InvalidData(format!(
                "y-axis steps must be <= {MAX_Y_AXIS_STEPS}, got {}",
                self.style.y_axis_steps
            )));
        }
        self.style.x_axis_style.validate()?;
        self.style.y_axis_style.validate()?;
        self.style.legend_style.validate()?;
        if let Some(grid) = self.style.grid_line {
            grid.validate()?;
        }
        self.resolve_range().map(|_| ())
    }

    fn build_frame(
        &self,
        viewport: Viewport,
        progress: AnimationProgress,
    ) -> ChartResult<RenderFrame> {
        self.validate()?;
        let layout = self.resolve_layout(viewport)?;
        debug!(
            series = self.lines.len(),
            points = self.point_count(),
            progress = progress.value(),
            "compose line frame"
        );

        let mut frame = RenderFrame::new(viewport);
        self.push_grid_and_y_axis(&mut frame, layout)?;
        self.push_x_axis(&mut frame, layout);

        let clip = ClipRect::new(0.0, 0.0, layout.width * progress.value(), layout.height);
        for line in &self.lines {
            let commands = self.series_commands(line, layout)?;
            frame.push_clipped(clip, commands);
        }

        self.push_legend(&mut frame, layout);
        Ok(frame)
    }
}

fn default_line_stroke_width() -> f64 {
    3.0
}

#[cfg(test)]
mod tests {
    use super::{LineChart, LineParameters, LineShadow, LineType, MAX_Y_AXIS_STEPS};
    use crate::ChartError;
    use crate::api::Chart;
    use crate::core::{AnimationProgress, Viewport};
    use crate::render::{Color, DrawCommand, PathPaint};

    #[test]
    fn shadow_is_clipped_with_stroke_and_drawn_first() {
        let chart = LineChart::new(vec![
            LineParameters::new("a", vec![1.0, 3.0, 2.0], Color::BLACK)
                .with_shadow(LineShadow::Shadow),
        ]);
        let progress = AnimationProgress::new(0.5).expect("progress");
        let frame = chart
            .build_frame(Viewport::new(400, 300), progress)
            .expect("frame");

        let clipped = frame
            .commands
            .iter()
            .find_map(|command| match command {
                DrawCommand::Clipped { clip, commands } => Some((clip, commands)),
                _ => None,
            })
            .expect("clipped series group");
        assert_eq!(clipped.0.width, 200.0);
        assert_eq!(clipped.1.len(), 2);
        assert!(matches!(
            &clipped.1[0],
            DrawCommand::Path(path) if matches!(path.paint, PathPaint::VerticalGradient { .. })
        ));
    }

    #[test]
    fn straight_lines_use_line_segments() {
        let line = LineParameters::new("a", vec![1.0, 2.0], Color::BLACK)
            .with_line_type(LineType::Default);
        let chart = LineChart::new(vec![line.clone()]);
        let layout = chart.resolve_layout(Viewport::new(200, 100)).expect("layout");
        let commands = line.stroke_commands(layout).expect("commands");
        assert_eq!(commands.len(), 2);
    }

    #[test]
    fn y_axis_steps_are_capped() {
        let line = LineParameters::new("a", vec![1.0, 2.0], Color::BLACK);
        let mut chart = LineChart::new(vec![line]);
        chart.style.y_axis_steps = MAX_Y_AXIS_STEPS;
        assert!(chart.validate().is_ok());
        chart.style.y_axis_steps = u32::MAX;
        assert!(matches!(chart.validate(), Err(ChartError::InvalidData(_))));
    }
}
