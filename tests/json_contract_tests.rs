use chart_kit::api::{
    CHART_SPEC_JSON_SCHEMA_V1, Chart, ChartSpec, ChartType, DonutChart, LineChart,
    LineParameters, PieChartData, Polygon, PolygonStyle, RadarChart,
};
use chart_kit::core::{AnimationProgress, Viewport};
use chart_kit::render::{Color, NullRenderer};

const BARE_DONUT: &str = r#"{
    "type": "donut",
    "data": [
        { "part_name": "Rent", "data": 60.0, "color": { "red": 0.9, "green": 0.2, "blue": 0.2, "alpha": 1.0 } },
        { "part_name": "Food", "data": 40.0, "color": { "red": 0.2, "green": 0.7, "blue": 0.3, "alpha": 1.0 } }
    ],
    "center_title": "Budget"
}"#;

#[test]
fn bare_spec_fills_defaults() {
    let spec = ChartSpec::from_json_str(BARE_DONUT).expect("parse");
    let ChartSpec::Donut(chart) = &spec else {
        panic!("expected donut spec, got {spec:?}");
    };
    assert_eq!(chart.chart_type, ChartType::Donut);
    assert_eq!(chart.start_angle_deg, -90.0);
    assert!(chart.show_description);
    assert_eq!(spec.kind(), "donut");
}

#[test]
fn envelope_is_written_with_schema_version() {
    let spec = ChartSpec::from(LineChart::new(vec![LineParameters::new(
        "a",
        vec![1.0, 2.0],
        Color::BLACK,
    )]));
    let json = spec.to_json_contract_v1_pretty().expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("json");
    assert_eq!(value["schema_version"], CHART_SPEC_JSON_SCHEMA_V1);
    assert_eq!(value["chart"]["type"], "line");
}

#[test]
fn every_chart_kind_survives_the_envelope() {
    let specs = [
        ChartSpec::from(DonutChart::pie(vec![PieChartData::new(
            "only",
            1.0,
            Color::GRAY,
        )])),
        ChartSpec::from(
            LineChart::new(vec![LineParameters::new("a", vec![3.0, 1.0], Color::BLACK)])
                .with_x_axis_data(vec!["x".into(), "y".into()])
                .with_value_range(0.0, 5.0),
        ),
        ChartSpec::from(RadarChart::new(
            vec!["a".into(), "b".into(), "c".into()],
            3,
            9.0,
            vec![Polygon::new(
                vec![1.0, 2.0, 3.0],
                "pts",
                PolygonStyle::new(Color::WHITE, Color::BLACK),
            )],
        )),
    ];
    for spec in specs {
        let json = spec.to_json_contract_v1_pretty().expect("serialize");
        let parsed = ChartSpec::from_json_str(&json).expect("parse");
        assert_eq!(parsed, spec);
    }
}

#[test]
fn unknown_schema_version_is_rejected() {
    let json = format!(r#"{{ "schema_version": 2, "chart": {BARE_DONUT} }}"#);
    let err = ChartSpec::from_json_str(&json).expect_err("version 2 must fail");
    assert!(err.to_string().contains("unsupported chart spec schema version"));
}

#[test]
fn malformed_json_is_reported_as_invalid_data() {
    let err = ChartSpec::from_json_str(r#"{ "type": "bubble" }"#).expect_err("must fail");
    assert!(err.to_string().starts_with("invalid data"));
}

#[test]
fn parsed_spec_renders_through_chart_trait() {
    let spec = ChartSpec::from_json_str(BARE_DONUT).expect("parse");
    let mut renderer = NullRenderer::default();
    spec.render(&mut renderer, Viewport::new(320, 320), AnimationProgress::COMPLETE)
        .expect("render");
    assert_eq!(renderer.frames_rendered, 1);
    assert_eq!(renderer.last_stats.arcs, 2);
}

#[test]
fn oversized_step_counts_in_json_fail_validation() {
    let json = r#"{
        "type": "radar",
        "radar_labels": ["a", "b", "c"],
        "scalar_steps": 2147483647,
        "scalar_value": 10.0,
        "polygons": []
    }"#;
    let spec = ChartSpec::from_json_str(json).expect("parse");
    assert!(spec.validate().is_err());
}

#[test]
fn bare_spec_errors_name_the_real_cause() {
    let json = r#"{ "type": "donut", "data": [{ "part_name": "a", "data": 1.0 }] }"#;
    let message = ChartSpec::from_json_str(json)
        .expect_err("missing color must fail")
        .to_string();
    assert!(message.contains("color"), "{message}");
    assert!(!message.contains("schema_version"), "{message}");
}
