pub mod donut;
pub mod geometry;
pub mod line;
pub mod path;
pub mod radar;
pub mod types;

pub use donut::{DonutLayout, DonutSlice, project_donut_slices};
pub use geometry::{
    SweepSegment, ensure_non_negative, polar_to_cartesian, sweep_angles, value_ratio,
};
pub use line::{
    LineLayout, ValueRange, close_to_baseline, project_quadratic_line, project_straight_line,
};
pub use path::PathCommand;
pub use radar::{MAX_SCALAR_STEPS, RadarLayout, polygon_vertices, validate_radar};
pub use types::{AnimationProgress, Point, Rect, Viewport};
