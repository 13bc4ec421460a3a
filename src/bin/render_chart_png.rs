use chart_kit::api::{Chart, ChartSpec};
use chart_kit::core::{AnimationProgress, Viewport};
use chart_kit::render::CairoRenderer;
use std::fs;
use std::path::PathBuf;

const USAGE: &str = "usage: render_chart_png --input <spec.json> --output <chart.png> [--width <px>] [--height <px>] [--progress <0..1>] [--log <filter>]";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
    width: u32,
    height: u32,
    progress: f64,
    log_filter: Option<String>,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let _ = match args.log_filter.as_deref() {
        Some(directives) => chart_kit::telemetry::init_tracing_with_filter(directives),
        None => chart_kit::telemetry::init_default_tracing(),
    };
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let spec = ChartSpec::from_json_str(&raw).map_err(|err| err.to_string())?;
    let progress = AnimationProgress::new(args.progress).map_err(|err| err.to_string())?;

    let width = i32::try_from(args.width).map_err(|_| "width is too large".to_owned())?;
    let height = i32::try_from(args.height).map_err(|_| "height is too large".to_owned())?;
    let mut renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    spec.render(
        &mut renderer,
        Viewport::new(args.width, args.height),
        progress,
    )
    .map_err(|err| err.to_string())?;
    renderer
        .write_png(&args.output)
        .map_err(|err| err.to_string())?;

    println!(
        "rendered {} chart to {} ({}x{})",
        spec.kind(),
        args.output.display(),
        args.width,
        args.height
    );
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut width = 800_u32;
    let mut height = 600_u32;
    let mut progress = 1.0_f64;
    let mut log_filter = None::<String>;

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--input" => input = Some(PathBuf::from(value("--input")?)),
            "--output" => output = Some(PathBuf::from(value("--output")?)),
            "--width" => {
                width = value("--width")?
                    .parse()
                    .map_err(|err| format!("invalid --width: {err}"))?;
            }
            "--height" => {
                height = value("--height")?
                    .parse()
                    .map_err(|err| format!("invalid --height: {err}"))?;
            }
            "--progress" => {
                progress = value("--progress")?
                    .parse()
                    .map_err(|err| format!("invalid --progress: {err}"))?;
            }
            "--log" => log_filter = Some(value("--log")?),
            "--help" | "-h" => return Err(USAGE.to_owned()),
            _ => return Err(format!("unknown argument `{flag}`")),
        }
    }

    let input = input.ok_or_else(|| format!("missing --input\n{USAGE}"))?;
    let output = output.ok_or_else(|| format!("missing --output\n{USAGE}"))?;
    Ok(CliArgs {
        input,
        output,
        width,
        height,
        progress,
        log_filter,
    })
}
