use crate::config::{Config, load_config};
use crate::layout::{ItemDetailLayout, compute_item_details, compute_layout, prepare_chart_data};
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_resume;
use crate::path::round_path_corners;
use crate::render::{render_item_details_svg, render_svg, write_output_png, write_output_svg};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "cvtl", version, about = "Career timeline renderer (work and learning history as SVG)")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render the layered timeline chart of a resume
    Render(RenderArgs),
    /// Render the responsibilities-to-problems chart of one item, or its
    /// responsibilities table when it addressed no problems
    Slope(SlopeArgs),
    /// Round the corners of a compact path string
    RoundPath(RoundPathArgs),
}

#[derive(ClapArgs, Debug)]
pub struct InputArgs {
    /// Resume JSON/JSON5 file or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (camelCase overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<f64>,

    /// End date for ongoing items (YYYY-MM-DD). Defaults to now.
    #[arg(long = "now", value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
}

#[derive(ClapArgs, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub common: InputArgs,

    /// Write the prepared chart data and layout as JSON
    #[arg(long = "dump")]
    pub dump: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
pub struct SlopeArgs {
    #[command(flatten)]
    pub common: InputArgs,

    /// Title of the item to chart
    #[arg(long = "item")]
    pub item: String,
}

#[derive(ClapArgs, Debug)]
pub struct RoundPathArgs {
    /// Path in compact form, e.g. M0,0L10,0L10,10
    pub path: String,

    /// Corner radius
    #[arg(short = 'r', long = "radius", default_value_t = 5.0)]
    pub radius: f64,

    /// Vertex x-coordinates to leave sharp
    #[arg(long = "ignore-x", allow_negative_numbers = true)]
    pub ignore_x: Vec<f64>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    match args.command {
        Command::Render(args) => run_render(args),
        Command::Slope(args) => run_slope(args),
        Command::RoundPath(args) => {
            let rounded = round_path_corners(&args.path, args.radius, &args.ignore_x)?;
            println!("{rounded}");
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn run_render(args: RenderArgs) -> Result<()> {
    let (config, now) = resolve_config(&args.common)?;
    let input = read_input(args.common.input.as_deref())?;
    let resume = parse_resume(&input)?;
    let chart = prepare_chart_data(resume, now, &config.layout)?;
    let layout = compute_layout(&chart, &config.theme, &config.layout, config.render.width);
    info!(items = layout.items.len(), width = layout.width, "rendered timeline");

    if let Some(path) = args.dump.as_deref() {
        write_layout_dump(path, &layout, &chart)
            .with_context(|| format!("failed to write layout dump to {}", path.display()))?;
        debug!(path = %path.display(), "wrote layout dump");
    }

    let svg = render_svg(&layout, &config.theme);
    emit(&svg, &args.common, &config)
}

fn run_slope(args: SlopeArgs) -> Result<()> {
    let (config, now) = resolve_config(&args.common)?;
    let input = read_input(args.common.input.as_deref())?;
    let resume = parse_resume(&input)?;
    let chart = prepare_chart_data(resume, now, &config.layout)?;
    let placed = chart
        .find(&args.item)
        .ok_or_else(|| anyhow::anyhow!("No item titled {:?}", args.item))?;
    let details = compute_item_details(placed, &config.layout, config.render.width)
        .ok_or_else(|| anyhow::anyhow!("{:?} lists no responsibilities", args.item))?;
    if let ItemDetailLayout::Table(table) = &details {
        info!(item = %args.item, rows = table.rows.len(), "no addressed problems; rendering responsibilities table");
    }
    let svg = render_item_details_svg(&details, &config.theme, &config.layout.slope);
    emit(&svg, &args.common, &config)
}

fn resolve_config(args: &InputArgs) -> Result<(Config, NaiveDateTime)> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    let now = args
        .now
        .unwrap_or_else(|| chrono::Local::now().naive_local());
    Ok((config, now))
}

fn emit(svg: &str, args: &InputArgs, config: &Config) -> Result<()> {
    match args.output_format {
        OutputFormat::Svg => write_output_svg(svg, args.output.as_deref()),
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(svg, &output, &config.render)
        }
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path != Path::new("-") {
            return std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn parse_now(value: &str) -> std::result::Result<NaiveDateTime, String> {
    let value = value.trim();
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(datetime);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| format!("expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS, got {value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_render_command() {
        let args = Args::try_parse_from([
            "cvtl", "render", "-i", "cv.json", "-o", "cv.svg", "-w", "960", "--now", "2024-02-29",
        ])
        .unwrap();
        let Command::Render(render) = args.command else {
            panic!("expected render");
        };
        assert_eq!(render.common.input.as_deref(), Some(Path::new("cv.json")));
        assert_eq!(render.common.width, Some(960.0));
        assert_eq!(render.common.output_format, OutputFormat::Svg);
        assert_eq!(
            render.common.now,
            Some(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_time(NaiveTime::MIN))
        );
        assert!(render.dump.is_none());
    }

    #[test]
    fn parses_round_path_command() {
        let args = Args::try_parse_from([
            "cvtl", "round-path", "M0,0L10,0L10,10", "-r", "2", "--ignore-x", "10", "--ignore-x", "-3",
        ])
        .unwrap();
        let Command::RoundPath(round) = args.command else {
            panic!("expected round-path");
        };
        assert_eq!(round.radius, 2.0);
        assert_eq!(round.ignore_x, vec![10.0, -3.0]);
    }

    #[test]
    fn slope_requires_item() {
        assert!(Args::try_parse_from(["cvtl", "slope", "-i", "cv.json"]).is_err());
    }

    #[test]
    fn now_accepts_date_or_datetime() {
        assert!(parse_now("2020-05-06").is_ok());
        assert_eq!(
            parse_now("2020-05-06T08:30:00").unwrap(),
            NaiveDate::from_ymd_opt(2020, 5, 6).unwrap().and_hms_opt(8, 30, 0).unwrap()
        );
        assert!(parse_now("yesterday").is_err());
    }

    #[test]
    fn png_needs_an_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("out.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }
}
