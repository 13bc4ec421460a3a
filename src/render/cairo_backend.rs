use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LinearGradient};
use pango::FontDescription;
use tracing::debug;

use crate::core::{PathCommand, Point};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    ArcPrimitive, CirclePrimitive, Color, DrawCommand, LinePrimitive, PathPaint, PathPrimitive,
    RenderFrame, Renderer, ShapePaint, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub arcs_drawn: usize,
    pub circles_drawn: usize,
    pub paths_drawn: usize,
    pub texts_drawn: usize,
}

/// Optional extension trait for renderers that can draw into an external Cairo
/// context (for example a GTK `DrawingArea` callback).
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango + PangoCairo renderer backend.
///
/// Renders offscreen into an image surface through `Renderer::render`, or in
/// place on an external Cairo context through `CairoContextRenderer`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    clear_color: Color,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            clear_color: Color::WHITE,
            last_stats: CairoRenderStats::default(),
        })
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) -> ChartResult<()> {
        color.validate()?;
        self.clear_color = color;
        Ok(())
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    /// Writes the offscreen surface as PNG.
    pub fn write_png(&self, path: &Path) -> ChartResult<()> {
        let mut file = File::create(path).map_err(|err| {
            ChartError::Backend(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface
            .write_to_png(&mut file)
            .map_err(|err| ChartError::Backend(format!("failed to encode png: {err}")))
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.clear_color.validate()?;

        apply_color(context, self.clear_color);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        draw_commands(context, &frame.commands, &mut stats)?;
        debug!(
            backend = self.backend_name(),
            lines = stats.lines_drawn,
            arcs = stats.arcs_drawn,
            paths = stats.paths_drawn,
            texts = stats.texts_drawn,
            "cairo frame rendered"
        );
        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn draw_commands(
    context: &Context,
    commands: &[DrawCommand],
    stats: &mut CairoRenderStats,
) -> ChartResult<()> {
    for command in commands {
        match command {
            DrawCommand::Line(line) => {
                draw_line(context, *line)?;
                stats.lines_drawn += 1;
            }
            DrawCommand::Arc(arc) => {
                draw_arc(context, *arc)?;
                stats.arcs_drawn += 1;
            }
            DrawCommand::Circle(circle) => {
                draw_circle(context, *circle)?;
                stats.circles_drawn += 1;
            }
            DrawCommand::Path(path) => {
                draw_path(context, path)?;
                stats.paths_drawn += 1;
            }
            DrawCommand::Text(text) => {
                draw_text(context, text);
                stats.texts_drawn += 1;
            }
            DrawCommand::Clipped { clip, commands } => {
                context
                    .save()
                    .map_err(|err| map_backend_error("failed to save context", err))?;
                context.rectangle(clip.x, clip.y, clip.width, clip.height);
                context.clip();
                let result = draw_commands(context, commands, stats);
                context
                    .restore()
                    .map_err(|err| map_backend_error("failed to restore context", err))?;
                result?;
            }
        }
    }
    Ok(())
}

fn draw_line(context: &Context, line: LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    context.set_dash(&line.stroke_style.dash_pattern(line.stroke_width), 0.0);
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    let result = context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err));
    context.set_dash(&[], 0.0);
    result
}

fn draw_arc(context: &Context, arc: ArcPrimitive) -> ChartResult<()> {
    if arc.sweep_deg == 0.0 || arc.radius == 0.0 {
        return Ok(());
    }
    let start = arc.start_deg.to_radians();
    let end = (arc.start_deg + arc.sweep_deg).to_radians();
    context.new_path();
    if let ShapePaint::Fill = arc.paint {
        context.move_to(arc.center.x, arc.center.y);
    }
    if arc.sweep_deg > 0.0 {
        context.arc(arc.center.x, arc.center.y, arc.radius, start, end);
    } else {
        context.arc_negative(arc.center.x, arc.center.y, arc.radius, start, end);
    }
    apply_color(context, arc.color);
    match arc.paint {
        ShapePaint::Fill => {
            context.close_path();
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill arc wedge", err))
        }
        ShapePaint::Stroke { width } => {
            context.set_line_width(width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke arc", err))
        }
    }
}

fn draw_circle(context: &Context, circle: CirclePrimitive) -> ChartResult<()> {
    context.new_path();
    context.arc(
        circle.center.x,
        circle.center.y,
        circle.radius,
        0.0,
        std::f64::consts::TAU,
    );
    apply_color(context, circle.color);
    match circle.paint {
        ShapePaint::Fill => context
            .fill()
            .map_err(|err| map_backend_error("failed to fill circle", err)),
        ShapePaint::Stroke { width } => {
            context.set_line_width(width);
            context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke circle", err))
        }
    }
}

fn append_path(context: &Context, commands: &[PathCommand]) {
    context.new_path();
    let mut current = Point::default();
    let mut subpath_start = Point::default();
    for command in commands {
        match *command {
            PathCommand::MoveTo(point) => {
                context.move_to(point.x, point.y);
                current = point;
                subpath_start = point;
            }
            PathCommand::LineTo(point) => {
                context.line_to(point.x, point.y);
                current = point;
            }
            PathCommand::QuadTo { control, end } => {
                // Cairo only has cubic curves; elevate the quadratic.
                let c1 = Point::new(
                    current.x + 2.0 / 3.0 * (control.x - current.x),
                    current.y + 2.0 / 3.0 * (control.y - current.y),
                );
                let c2 = Point::new(
                    end.x + 2.0 / 3.0 * (control.x - end.x),
                    end.y + 2.0 / 3.0 * (control.y - end.y),
                );
                context.curve_to(c1.x, c1.y, c2.x, c2.y, end.x, end.y);
                current = end;
            }
            PathCommand::Close => {
                context.close_path();
                current = subpath_start;
            }
        }
    }
}

fn draw_path(context: &Context, path: &PathPrimitive) -> ChartResult<()> {
    append_path(context, &path.commands);
    match &path.paint {
        PathPaint::Stroke {
            color,
            width,
            style,
        } => {
            apply_color(context, *color);
            context.set_line_width(*width);
            context.set_dash(&style.dash_pattern(*width), 0.0);
            let result = context
                .stroke()
                .map_err(|err| map_backend_error("failed to stroke path", err));
            context.set_dash(&[], 0.0);
            result
        }
        PathPaint::Fill { color } => {
            apply_color(context, *color);
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill path", err))
        }
        PathPaint::VerticalGradient {
            start_y,
            end_y,
            stops,
        } => {
            let gradient = LinearGradient::new(0.0, *start_y, 0.0, *end_y);
            for stop in stops {
                gradient.add_color_stop_rgba(
                    stop.offset,
                    stop.color.red,
                    stop.color.green,
                    stop.color.blue,
                    stop.color.alpha,
                );
            }
            context
                .set_source(&gradient)
                .map_err(|err| map_backend_error("failed to set gradient source", err))?;
            context
                .fill()
                .map_err(|err| map_backend_error("failed to fill gradient path", err))
        }
    }
}

fn draw_text(context: &Context, text: &TextPrimitive) {
    let layout = pangocairo::functions::create_layout(context);
    let font_description = FontDescription::from_string(&format!("Sans {}", text.font_size_px));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, _text_height) = layout.pixel_size();
    let x = match text.h_align {
        TextHAlign::Left => text.x,
        TextHAlign::Center => text.x - f64::from(text_width) / 2.0,
        TextHAlign::Right => text.x - f64::from(text_width),
    };

    apply_color(context, text.color);
    context.move_to(x, text.y);
    pangocairo::functions::show_layout(context, &layout);
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
