use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use modmul_webgl::config::Rgb;
use modmul_webgl::consts::{DEFAULT_MULTIPLIER, DEFAULT_POINTS, DEFAULT_SVG_MARGIN, DEFAULT_SVG_SIZE};
use modmul_webgl::error::CanvasError;
use modmul_webgl::geometry::Geometry;
use modmul_webgl::svg::{SvgOptions, render_svg};

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Canvas(#[from] CanvasError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "modmul-cli", about = "Modular multiplication diagrams from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct DiagramArgs {
    /// Number of points on the circle.
    #[arg(long, env = "MODMUL_POINTS", default_value_t = i64::from(DEFAULT_POINTS), allow_negative_numbers = true)]
    points: i64,

    /// Multiplier; fractional values floor the product `i * m`.
    #[arg(long, env = "MODMUL_MULTIPLIER", default_value_t = DEFAULT_MULTIPLIER, allow_negative_numbers = true)]
    multiplier: f64,
}

impl DiagramArgs {
    fn geometry(self) -> Result<Geometry, CliError> {
        Ok(Geometry::new(self.points, self.multiplier)?)
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every segment as `start -> end`.
    Segments {
        #[command(flatten)]
        diagram: DiagramArgs,

        /// Emit a JSON array of `[start, end]` pairs instead.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Render the diagram as an SVG document.
    Svg {
        #[command(flatten)]
        diagram: DiagramArgs,

        /// Image width and height in pixels.
        #[arg(long, default_value_t = DEFAULT_SVG_SIZE)]
        size: u32,

        /// Gap between the circle and the image edge, in pixels.
        #[arg(long, default_value_t = DEFAULT_SVG_MARGIN)]
        margin: f64,

        /// Radius of each point's dot, in pixels.
        #[arg(long, default_value_t = 1.0)]
        point_radius: f64,

        /// Line width, in pixels.
        #[arg(long, default_value_t = 0.5)]
        stroke_width: f64,

        /// Line and point color as `#rrggbb`.
        #[arg(long, value_parser = parse_hex_color)]
        color: Option<Rgb>,

        /// Background color as `#rrggbb`.
        #[arg(long, value_parser = parse_hex_color)]
        background: Option<Rgb>,

        #[arg(long, help = "Output file path; stdout when omitted")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let cli = Cli::parse();
    let stdout = io::stdout();
    run(cli.command, &mut stdout.lock())
}

fn run(command: Command, out: &mut impl Write) -> Result<(), CliError> {
    match command {
        Command::Segments { diagram, json } => run_segments(diagram, json, out),
        Command::Svg { diagram, size, margin, point_radius, stroke_width, color, background, output } => {
            let mut options = SvgOptions { size, margin, point_radius, stroke_width, ..SvgOptions::default() };
            if let Some(color) = color {
                options.foreground = color;
            }
            if let Some(background) = background {
                options.background = background;
            }
            match output {
                Some(path) => {
                    let mut file = BufWriter::new(File::create(&path)?);
                    run_svg(diagram, &options, &mut file)?;
                    file.flush()?;
                    tracing::info!(path = %path.display(), "wrote svg");
                    Ok(())
                }
                None => run_svg(diagram, &options, out),
            }
        }
    }
}

fn run_segments(diagram: DiagramArgs, json: bool, out: &mut impl Write) -> Result<(), CliError> {
    let geometry = diagram.geometry()?;
    tracing::debug!(points = geometry.point_count(), multiplier = geometry.multiplier(), "listing segments");

    if json {
        let pairs: Vec<[u32; 2]> = geometry.segments().into_iter().map(|s| [s.start, s.end]).collect();
        serde_json::to_writer(&mut *out, &pairs)?;
        writeln!(out)?;
    } else {
        for seg in geometry.segments() {
            writeln!(out, "{} -> {}", seg.start, seg.end)?;
        }
    }
    Ok(())
}

fn run_svg(diagram: DiagramArgs, options: &SvgOptions, out: &mut impl Write) -> Result<(), CliError> {
    let geometry = diagram.geometry()?;
    tracing::debug!(points = geometry.point_count(), multiplier = geometry.multiplier(), size = options.size, "rendering svg");
    out.write_all(render_svg(&geometry, options).as_bytes())?;
    Ok(())
}

fn parse_hex_color(text: &str) -> Result<Rgb, String> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected #rrggbb, got {text:?}"));
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| format!("{text:?}: {e}"));
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
