use tracing::trace;

use crate::core::{AnimationProgress, Viewport};
use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Stateless chart composer.
///
/// Implementations validate their data, then map it into a fresh
/// `RenderFrame` for the given viewport and animation progress. Nothing is
/// retained between calls.
pub trait Chart {
    /// Short identifier used in logs.
    fn kind(&self) -> &'static str;

    /// Rejects malformed input before any drawing occurs.
    fn validate(&self) -> ChartResult<()>;

    fn build_frame(
        &self,
        viewport: Viewport,
        progress: AnimationProgress,
    ) -> ChartResult<RenderFrame>;

    /// Builds a frame and hands it to `renderer`.
    fn render(
        &self,
        renderer: &mut dyn Renderer,
        viewport: Viewport,
        progress: AnimationProgress,
    ) -> ChartResult<()> {
        let frame = self.build_frame(viewport, progress)?;
        trace!(
            chart = self.kind(),
            commands = frame.commands.len(),
            progress = progress.value(),
            "render chart frame"
        );
        renderer.render(&frame)
    }
}
