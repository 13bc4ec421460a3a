use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    AnimationProgress, DonutLayout, DonutSlice, Point, Rect, Viewport, ensure_non_negative,
    polar_to_cartesian, project_donut_slices,
};
use crate::error::ChartResult;
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, DrawCommand, LinePrimitive, RenderFrame, ShapePaint,
    TextHAlign, text_metrics,
};

use super::legend::{LegendEntry, layout_vertical_legend};
use super::{Chart, TextStyle, format_ratio_percent};

/// Longest center title shown; extra characters are cut.
pub const CENTER_TITLE_MAX_CHARS: usize = 10;
/// Share of the height given to the ring when the legend is shown.
const RING_AREA_FRACTION: f64 = 0.75;
const RATIO_LEADER_LENGTH_PX: f64 = 15.0;
const RATIO_LEADER_TAIL_PX: f64 = 10.0;
const RATIO_TEXT_GAP_PX: f64 = 4.0;

/// One named part of a donut/pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChartData {
    pub part_name: String,
    pub data: f64,
    pub color: Color,
}

impl PieChartData {
    #[must_use]
    pub fn new(part_name: impl Into<String>, data: f64, color: Color) -> Self {
        Self {
            part_name: part_name.into(),
            data,
            color,
        }
    }
}

/// Ring with a hollow center, or a solid pie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartType {
    #[default]
    Donut,
    Pie,
}

/// Colors and fonts of a donut/pie chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutChartStyle {
    pub center_title_style: TextStyle,
    pub description_style: TextStyle,
    pub ratio_text_style: TextStyle,
    pub outer_circular_color: Color,
    pub inner_circular_color: Color,
    pub ratio_line_color: Color,
    pub guide_stroke_width: f64,
    pub ratio_decimals: u8,
}

impl Default for DonutChartStyle {
    fn default() -> Self {
        Self {
            center_title_style: TextStyle::default(),
            description_style: TextStyle::default(),
            ratio_text_style: TextStyle::default().with_font_size(12.0),
            outer_circular_color: Color::GRAY,
            inner_circular_color: Color::GRAY,
            ratio_line_color: Color::GRAY,
            guide_stroke_width: 1.0,
            ratio_decimals: 1,
        }
    }
}

/// Donut or pie chart whose slice sweeps are proportional to part values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutChart {
    pub data: Vec<PieChartData>,
    #[serde(default)]
    pub center_title: String,
    #[serde(default)]
    pub chart_type: ChartType,
    #[serde(default = "default_start_angle_deg")]
    pub start_angle_deg: f64,
    #[serde(default = "default_show_description")]
    pub show_description: bool,
    #[serde(default)]
    pub style: DonutChartStyle,
}

impl DonutChart {
    #[must_use]
    pub fn new(data: Vec<PieChartData>) -> Self {
        Self {
            data,
            center_title: String::new(),
            chart_type: ChartType::Donut,
            start_angle_deg: default_start_angle_deg(),
            show_description: default_show_description(),
            style: DonutChartStyle::default(),
        }
    }

    /// Solid pie variant of `new`.
    #[must_use]
    pub fn pie(data: Vec<PieChartData>) -> Self {
        Self::new(data).with_chart_type(ChartType::Pie)
    }

    #[must_use]
    pub fn with_center_title(mut self, title: impl Into<String>) -> Self {
        self.center_title = title.into();
        self
    }

    #[must_use]
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    #[must_use]
    pub fn with_start_angle(mut self, start_angle_deg: f64) -> Self {
        self.start_angle_deg = start_angle_deg;
        self
    }

    #[must_use]
    pub fn with_description(mut self, show_description: bool) -> Self {
        self.show_description = show_description;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: DonutChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.data.iter().map(|part| part.data).collect()
    }

    /// Center title as drawn, at most `CENTER_TITLE_MAX_CHARS` characters.
    #[must_use]
    pub fn displayed_title(&self) -> &str {
        text_metrics::truncate_chars(&self.center_title, CENTER_TITLE_MAX_CHARS)
    }

    /// Animated slices laid out on the ring.
    pub fn project_slices(&self, progress: AnimationProgress) -> ChartResult<Vec<DonutSlice>> {
        project_donut_slices(&self.values(), self.start_angle_deg, progress)
    }

    fn ring_area(&self, viewport: Viewport) -> (Rect, Option<Rect>) {
        let area = viewport.rect();
        if self.show_description && !self.data.is_empty() {
            let (ring, description) = area.split_top(RING_AREA_FRACTION);
            (ring, Some(description))
        } else {
            (area, None)
        }
    }

    fn push_slices(&self, frame: &mut RenderFrame, layout: DonutLayout, slices: &[DonutSlice]) {
        for (slice, part) in slices.iter().zip(&self.data) {
            let arc = match self.chart_type {
                ChartType::Donut => ArcPrimitive::new(
                    layout.center,
                    layout.ring_radius(),
                    slice.start_deg,
                    slice.sweep_deg,
                    part.color,
                    ShapePaint::Stroke {
                        width: layout.arc_width,
                    },
                ),
                ChartType::Pie => ArcPrimitive::new(
                    layout.center,
                    layout.ring_radius() + layout.arc_width / 2.0,
                    slice.start_deg,
                    slice.sweep_deg,
                    part.color,
                    ShapePaint::Fill,
                ),
            };
            frame.push_arc(arc);
        }
    }

    fn push_ratio_labels(
        &self,
        frame: &mut RenderFrame,
        layout: DonutLayout,
        slices: &[DonutSlice],
    ) {
        let style = self.style.ratio_text_style;
        let ring_edge = layout.ring_radius() + layout.arc_width / 2.0;
        let elbow_radius = layout.outer_guide_radius() + RATIO_LEADER_LENGTH_PX;
        for slice in slices.iter().filter(|slice| slice.is_mid_revealed()) {
            let start = slice.point_at(layout, ring_edge);
            let elbow = polar_to_cartesian(layout.center, elbow_radius, slice.mid_deg());
            let on_right = elbow.x >= layout.center.x;
            let tail_x = if on_right {
                elbow.x + RATIO_LEADER_TAIL_PX
            } else {
                elbow.x - RATIO_LEADER_TAIL_PX
            };
            let tail = Point::new(tail_x, elbow.y);
            let stroke = self.style.guide_stroke_width;
            frame.push_line(LinePrimitive::between(
                start,
                elbow,
                stroke,
                self.style.ratio_line_color,
            ));
            frame.push_line(LinePrimitive::between(
                elbow,
                tail,
                stroke,
                self.style.ratio_line_color,
            ));

            let (text_x, h_align) = if on_right {
                (tail.x + RATIO_TEXT_GAP_PX, TextHAlign::Left)
            } else {
                (tail.x - RATIO_TEXT_GAP_PX, TextHAlign::Right)
            };
            frame.push_text(style.primitive(
                format_ratio_percent(slice.ratio_percent, self.style.ratio_decimals),
                text_x,
                tail.y - style.text_height() / 2.0,
                h_align,
            ));
        }
    }

    fn push_guide_circles(&self, frame: &mut RenderFrame, layout: DonutLayout) {
        let paint = ShapePaint::Stroke {
            width: self.style.guide_stroke_width,
        };
        frame.push_circle(CirclePrimitive::new(
            layout.center,
            layout.outer_guide_radius(),
            self.style.outer_circular_color,
            paint,
        ));
        if self.chart_type == ChartType::Donut {
            frame.push_circle(CirclePrimitive::new(
                layout.center,
                layout.inner_guide_radius(),
                self.style.inner_circular_color,
                paint,
            ));
        }
    }

    fn push_center_title(&self, frame: &mut RenderFrame, layout: DonutLayout) {
        let title = self.displayed_title();
        if title.is_empty() || self.chart_type == ChartType::Pie {
            return;
        }
        let style = self.style.center_title_style;
        frame.push_text(style.primitive(
            title,
            layout.center.x,
            layout.center.y - style.text_height() / 2.0,
            TextHAlign::Center,
        ));
    }
}

impl Chart for DonutChart {
    fn kind(&self) -> &'static str {
        match self.chart_type {
            ChartType::Donut => "donut",
            ChartType::Pie => "pie",
        }
    }

    fn validate(&self) -> ChartResult<()> {
        ensure_non_negative(&self.values())?;
        for part in &self.data {
            part.color.validate()?;
        }
        self.style.center_title_style.validate()?;
        self.style.description_style.validate()?;
        self.style.ratio_text_style.validate()?;
        self.style.outer_circular_color.validate()?;
        self.style.inner_circular_color.validate()?;
        self.style.ratio_line_color.validate()
    }

    fn build_frame(
        &self,
        viewport: Viewport,
        progress: AnimationProgress,
    ) -> ChartResult<RenderFrame> {
        self.validate()?;
        let viewport = viewport.ensure_valid()?;
        let slices = self.project_slices(progress)?;

        let (ring_area, description_area) = self.ring_area(viewport);
        let layout = DonutLayout::resolve(ring_area)?;
        debug!(
            chart = self.kind(),
            slices = slices.len(),
            progress = progress.value(),
            ring_radius = layout.ring_radius(),
            "compose donut frame"
        );

        let mut frame = RenderFrame::new(viewport);
        self.push_center_title(&mut frame, layout);
        self.push_slices(&mut frame, layout, &slices);
        self.push_ratio_labels(&mut frame, layout, &slices);
        self.push_guide_circles(&mut frame, layout);

        if let Some(area) = description_area {
            let entries: Vec<LegendEntry<'_>> = self
                .data
                .iter()
                .map(|part| LegendEntry {
                    label: &part.part_name,
                    color: part.color,
                })
                .collect();
            for command in layout_vertical_legend(&entries, area, self.style.description_style) {
                frame.push(command);
            }
        }

        Ok(frame)
    }
}

fn default_start_angle_deg() -> f64 {
    -90.0
}

fn default_show_description() -> bool {
    true
}
