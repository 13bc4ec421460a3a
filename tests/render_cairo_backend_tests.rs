#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chart_kit::ChartError;
use chart_kit::api::{
    Chart, DonutChart, LineChart, LineParameters, LineShadow, PieChartData, Polygon,
    PolygonStyle, RadarChart,
};
use chart_kit::core::{AnimationProgress, Viewport};
use chart_kit::render::{CairoContextRenderer, CairoRenderer, Color};

fn donut() -> DonutChart {
    DonutChart::new(vec![
        PieChartData::new("Rent", 50.0, Color::rgb(0.9, 0.3, 0.2)),
        PieChartData::new("Food", 30.0, Color::rgb(0.2, 0.6, 0.9)),
        PieChartData::new("Fun", 20.0, Color::rgb(0.3, 0.8, 0.4)),
    ])
    .with_center_title("Budget")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_donut_slices_and_legend() {
    let mut renderer = CairoRenderer::new(400, 400).expect("renderer");
    donut()
        .render(&mut renderer, Viewport::new(400, 400), AnimationProgress::COMPLETE)
        .expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.arcs_drawn, 3);
    // Two guide circles plus one swatch per legend row.
    assert_eq!(stats.circles_drawn, 5);
    // Title, three ratio labels, three legend labels.
    assert_eq!(stats.texts_drawn, 7);
}

#[test]
fn cairo_renderer_draws_clipped_line_series() {
    let chart = LineChart::new(vec![
        LineParameters::new("a", vec![1.0, 4.0, 2.0, 5.0], Color::BLACK)
            .with_shadow(LineShadow::Shadow),
    ]);
    let mut renderer = CairoRenderer::new(640, 360).expect("renderer");
    chart
        .render(
            &mut renderer,
            Viewport::new(640, 360),
            AnimationProgress::new(0.5).expect("progress"),
        )
        .expect("render");
    assert_eq!(renderer.last_stats().paths_drawn, 2);
}

#[test]
fn cairo_renderer_can_draw_radar_on_external_context() {
    let chart = RadarChart::new(
        vec!["a".into(), "b".into(), "c".into(), "d".into()],
        3,
        10.0,
        vec![Polygon::new(
            vec![2.0, 8.0, 5.0, 10.0],
            "pts",
            PolygonStyle::new(Color::rgb(0.2, 0.4, 0.9), Color::BLACK),
        )],
    );
    let viewport = Viewport::new(500, 400);
    let frame = chart
        .build_frame(viewport, AnimationProgress::COMPLETE)
        .expect("frame");

    let surface = ImageSurface::create(Format::ARgb32, 500, 400).expect("surface");
    let context = Context::new(&surface).expect("context");
    let mut renderer = CairoRenderer::new(1, 1).expect("renderer");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");

    let stats = renderer.last_stats();
    assert_eq!(stats.paths_drawn, 5);
    assert_eq!(stats.lines_drawn, 4);
}

#[test]
fn cairo_renderer_writes_png() {
    let mut renderer = CairoRenderer::new(320, 320).expect("renderer");
    donut()
        .render(&mut renderer, Viewport::new(320, 320), AnimationProgress::COMPLETE)
        .expect("render");

    let path = std::env::temp_dir().join(format!("chart-kit-donut-{}.png", std::process::id()));
    renderer.write_png(&path).expect("png");
    let bytes = std::fs::read(&path).expect("read png");
    let _ = std::fs::remove_file(&path);
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}
