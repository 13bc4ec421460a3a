mod chart;
mod donut_chart;
mod json_contract;
mod label_format;
mod legend;
mod line_chart;
mod radar_chart;
mod style;

pub use chart::Chart;
pub use donut_chart::{
    CENTER_TITLE_MAX_CHARS, ChartType, DonutChart, DonutChartStyle, PieChartData,
};
pub use json_contract::{CHART_SPEC_JSON_SCHEMA_V1, ChartSpec, ChartSpecJsonContractV1};
pub use label_format::{format_compact, format_ratio_percent, format_scalar_value};
pub use legend::LegendEntry;
pub use line_chart::{
    LineChart, LineChartStyle, LineParameters, LineShadow, LineType, MAX_Y_AXIS_STEPS,
    SHADOW_TOP_ALPHA,
};
pub use radar_chart::{NetLinesStyle, Polygon, PolygonStyle, RadarChart};
pub use style::{StrokeStyle, TextStyle};
