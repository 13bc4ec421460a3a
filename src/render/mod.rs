mod frame;
mod null_renderer;
mod path;
mod primitives;
pub mod text_metrics;

pub use frame::{DrawCommand, FrameStats, RenderFrame};
pub use null_renderer::NullRenderer;
pub use path::PathBuilder;
pub use primitives::{
    ArcPrimitive, CirclePrimitive, ClipRect, Color, GradientStop, LinePrimitive,
    LineStrokeStyle, PathPaint, PathPrimitive, ShapePaint, TextHAlign, TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized, deterministic `RenderFrame` so
/// drawing code remains isolated from chart data and layout logic.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
