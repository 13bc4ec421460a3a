use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::Chart;
use crate::core::{AnimationProgress, Viewport};
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, CairoRenderer};

type SharedChart = Rc<RefCell<Box<dyn Chart>>>;

/// Hosts a chart inside a `gtk4::DrawingArea`.
///
/// The host owns the animation: it calls `set_progress` from its own tick
/// callback or tween, and the adapter only queues a redraw.
pub struct GtkChartAdapter {
    area: gtk::DrawingArea,
    chart: SharedChart,
    progress: Rc<Cell<AnimationProgress>>,
}

impl GtkChartAdapter {
    pub fn new(chart: impl Chart + 'static) -> ChartResult<Self> {
        let area = gtk::DrawingArea::new();
        let chart: SharedChart = Rc::new(RefCell::new(Box::new(chart)));
        let progress = Rc::new(Cell::new(AnimationProgress::COMPLETE));
        let renderer = Rc::new(RefCell::new(CairoRenderer::new(1, 1)?));

        let draw_chart = Rc::clone(&chart);
        let draw_progress = Rc::clone(&progress);
        area.set_draw_func(move |_area, context, width, height| {
            let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
                return;
            };
            let viewport = Viewport::new(width, height);
            let result = draw_chart
                .borrow()
                .build_frame(viewport, draw_progress.get())
                .and_then(|frame| renderer.borrow_mut().render_on_cairo_context(context, &frame));
            if let Err(err) = result {
                warn!(error = %err, width, height, "skipping chart draw");
            }
        });

        Ok(Self {
            area,
            chart,
            progress,
        })
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.area
    }

    #[must_use]
    pub fn progress(&self) -> AnimationProgress {
        self.progress.get()
    }

    pub fn set_progress(&self, progress: AnimationProgress) {
        self.progress.set(progress);
        self.area.queue_draw();
    }

    /// Replaces the displayed chart after validating it.
    pub fn set_chart(&self, chart: impl Chart + 'static) -> ChartResult<()> {
        chart.validate()?;
        *self.chart.borrow_mut() = Box::new(chart);
        self.area.queue_draw();
        Ok(())
    }
}
