use approx::assert_relative_eq;
use chart_kit::ChartError;
use chart_kit::api::{Chart, LineChart, LineChartStyle, LineParameters, LineShadow, LineType};
use chart_kit::core::{AnimationProgress, PathCommand, Point, Viewport};
use chart_kit::render::{Color, DrawCommand, NullRenderer, PathPaint, PathPrimitive};

fn plain_style() -> LineChartStyle {
    LineChartStyle {
        spacing_x: 40.0,
        spacing_y: 20.0,
        grid_line: None,
        y_axis_steps: 0,
        show_legend: false,
        ..LineChartStyle::default()
    }
}

fn series_paths(commands: &[DrawCommand]) -> Vec<PathPrimitive> {
    commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Clipped { commands, .. } => Some(commands),
            _ => None,
        })
        .flatten()
        .filter_map(|command| match command {
            DrawCommand::Path(path) => Some(path.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn quadratic_stroke_passes_through_segment_midpoints() {
    let chart = LineChart::new(vec![LineParameters::new(
        "sales",
        vec![0.0, 10.0, 5.0, 10.0],
        Color::BLACK,
    )])
    .with_value_range(0.0, 10.0)
    .with_style(plain_style());

    let frame = chart
        .build_frame(Viewport::new(440, 220), AnimationProgress::COMPLETE)
        .expect("frame");
    let paths = series_paths(&frame.commands);
    assert_eq!(paths.len(), 1);

    // space = (440 - 40) / 4 = 100, plot height = 200.
    let commands = &paths[0].commands;
    assert_eq!(commands[0], PathCommand::MoveTo(Point::new(20.0, 200.0)));
    assert_eq!(
        commands[1],
        PathCommand::QuadTo {
            control: Point::new(120.0, 0.0),
            end: Point::new(170.0, 50.0),
        }
    );
    assert_eq!(
        commands[3],
        PathCommand::QuadTo {
            control: Point::new(320.0, 0.0),
            end: Point::new(320.0, 0.0),
        }
    );
}

#[test]
fn progress_clips_series_horizontally() {
    let chart = LineChart::new(vec![
        LineParameters::new("a", vec![1.0, 2.0, 3.0], Color::BLACK),
        LineParameters::new("b", vec![3.0, 2.0, 1.0], Color::WHITE),
    ])
    .with_style(plain_style());
    let progress = AnimationProgress::new(0.25).expect("progress");

    let frame = chart
        .build_frame(Viewport::new(800, 400), progress)
        .expect("frame");
    let clips: Vec<f64> = frame
        .commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Clipped { clip, .. } => Some(clip.width),
            _ => None,
        })
        .collect();
    assert_eq!(clips, vec![200.0, 200.0]);
}

#[test]
fn shadow_fades_from_line_color_to_transparent_at_baseline() {
    let color = Color::rgb(0.1, 0.4, 0.8);
    let chart = LineChart::new(vec![
        LineParameters::new("a", vec![1.0, 2.0, 3.0], color).with_shadow(LineShadow::Shadow),
    ])
    .with_style(plain_style());

    let frame = chart
        .build_frame(Viewport::new(400, 300), AnimationProgress::COMPLETE)
        .expect("frame");
    let paths = series_paths(&frame.commands);
    assert_eq!(paths.len(), 2);

    match &paths[0].paint {
        PathPaint::VerticalGradient {
            start_y,
            end_y,
            stops,
        } => {
            assert_relative_eq!(*start_y, 0.0);
            assert_relative_eq!(*end_y, 280.0);
            assert_relative_eq!(stops[0].color.alpha, 0.3);
            assert_eq!(stops[1].color, Color::TRANSPARENT);
        }
        other => panic!("expected gradient fill, got {other:?}"),
    }
    assert_eq!(paths[0].commands.last(), Some(&PathCommand::Close));
    assert!(matches!(paths[1].paint, PathPaint::Stroke { .. }));
}

#[test]
fn straight_line_type_emits_polyline() {
    let chart = LineChart::new(vec![
        LineParameters::new("a", vec![1.0, 2.0, 3.0], Color::BLACK)
            .with_line_type(LineType::Default),
    ])
    .with_style(plain_style());
    let frame = chart
        .build_frame(Viewport::new(400, 300), AnimationProgress::COMPLETE)
        .expect("frame");
    let paths = series_paths(&frame.commands);
    assert!(
        paths[0].commands[1..]
            .iter()
            .all(|command| matches!(command, PathCommand::LineTo(_)))
    );
}

#[test]
fn axis_labels_grid_and_legend_are_drawn() {
    let chart = LineChart::new(vec![
        LineParameters::new("north", vec![0.0, 50.0, 100.0], Color::BLACK),
        LineParameters::new("south", vec![20.0, 40.0, 60.0], Color::GRAY),
    ])
    .with_x_axis_data(vec!["Jan".into(), "Feb".into(), "Mar".into()]);
    let mut renderer = NullRenderer::default();
    chart
        .render(&mut renderer, Viewport::new(600, 400), AnimationProgress::COMPLETE)
        .expect("render");

    // 6 y labels + 3 x labels + 2 legend labels.
    assert_eq!(renderer.last_stats.texts, 11);
    assert_eq!(renderer.last_stats.lines, 6, "one grid line per y step");
    assert_eq!(renderer.last_stats.circles, 2, "legend swatches");
    assert_eq!(renderer.last_stats.clips, 2);
}

#[test]
fn mismatched_series_lengths_are_rejected() {
    let chart = LineChart::new(vec![
        LineParameters::new("a", vec![1.0, 2.0, 3.0], Color::BLACK),
        LineParameters::new("b", vec![1.0, 2.0], Color::BLACK),
    ]);
    let err = chart.validate().expect_err("mismatch must fail");
    assert!(matches!(
        err,
        ChartError::LengthMismatch {
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[test]
fn x_axis_label_count_must_match_points() {
    let chart = LineChart::new(vec![LineParameters::new(
        "a",
        vec![1.0, 2.0],
        Color::BLACK,
    )])
    .with_x_axis_data(vec!["only".into()]);
    assert!(chart.validate().is_err());
}

#[test]
fn empty_and_non_finite_series_are_rejected() {
    assert!(LineChart::new(Vec::new()).validate().is_err());
    assert!(
        LineChart::new(vec![LineParameters::new("a", Vec::new(), Color::BLACK)])
            .validate()
            .is_err()
    );
    assert!(
        LineChart::new(vec![LineParameters::new(
            "a",
            vec![1.0, f64::NAN],
            Color::BLACK
        )])
        .validate()
        .is_err()
    );
}

#[test]
fn identical_inputs_produce_identical_frames() {
    let chart = LineChart::new(vec![
        LineParameters::new("a", vec![4.0, 8.0, 1.0, 7.0], Color::BLACK)
            .with_shadow(LineShadow::Shadow),
    ]);
    let progress = AnimationProgress::new(0.7).expect("progress");
    let first = chart
        .build_frame(Viewport::new(500, 300), progress)
        .expect("frame");
    let second = chart
        .build_frame(Viewport::new(500, 300), progress)
        .expect("frame");
    assert_eq!(first, second);
}
