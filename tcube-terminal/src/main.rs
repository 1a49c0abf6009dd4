//! tcube - ray-cast a cube, tetrahedron or sphere into the terminal
//!
//! Renders one frame by default. With `--animate` the transform is applied
//! again after every frame; press q, Esc or Ctrl-C to stop.

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::time::Duration;
use tcube_core::parse::{parse_transform, parse_vector};
use tcube_core::{Camera, ColorModel, Configuration, Matrix, Target, Vector};
use tcube_terminal::TerminalApp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TargetKind {
    Cube,
    Tetrahedron,
    Sphere,
}

#[derive(Debug, Parser)]
#[command(name = "tcube", version)]
#[command(about = "Draws a ray-cast cube in the terminal with half-block glyphs", long_about = None)]
struct Cli {
    /// Image width in pixels, one terminal column each
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..))]
    width: u32,

    /// Image height in pixels, two per terminal row
    #[arg(long, default_value_t = 32, value_parser = clap::value_parser!(u32).range(1..))]
    height: u32,

    /// Transform applied every frame: r,X,Y,Z (degrees), s,X,Y,Z, m,<9 coefficients> or eye
    #[arg(long, default_value = "r,0,45,0", value_parser = parse_transform)]
    transform: Matrix,

    /// Camera position as X,Y,Z
    #[arg(long, default_value = "0,0,-2", value_parser = parse_vector, allow_hyphen_values = true)]
    camera: Vector,

    /// Shape to render
    #[arg(long, value_enum, default_value_t = TargetKind::Cube)]
    target: TargetKind,

    /// Sphere radius
    #[arg(long, default_value_t = 0.5)]
    sphere_radius: f32,

    /// Number of latitude rings between the sphere's polar caps
    #[arg(long, default_value_t = 8)]
    sphere_rings: u32,

    /// Number of longitude segments around the sphere
    #[arg(long, default_value_t = 16)]
    sphere_segments: u32,

    /// Color depth: 24 for truecolor, 8 for the 216-color cube
    #[arg(long, alias = "color-model", default_value = "24")]
    colormodel: ColorModel,

    /// Delay between animation frames in milliseconds
    #[arg(long, alias = "frame-delay", default_value_t = 32)]
    framedelay: u64,

    /// Keep rotating until interrupted
    #[arg(
        long,
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        action = ArgAction::Set
    )]
    animate: bool,

    /// Log level on stderr
    #[arg(
        long,
        default_value = "warn",
        ignore_case = true,
        value_parser = ["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: String,
}

impl Cli {
    fn configuration(&self) -> Configuration {
        let target = match self.target {
            TargetKind::Cube => Target::Cube,
            TargetKind::Tetrahedron => Target::Tetrahedron,
            TargetKind::Sphere => Target::Sphere {
                radius: self.sphere_radius,
                vertical: self.sphere_rings,
                horizontal: self.sphere_segments,
            },
        };

        Configuration {
            width: self.width,
            height: self.height,
            camera: Camera::new(self.camera),
            transform: self.transform,
            target,
            color_model: self.colormodel,
            frame_delay: Duration::from_millis(self.framedelay),
            animate: self.animate,
        }
    }
}

fn parse_log_level(level: &str, default: LevelFilter) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => default,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    TermLogger::init(
        parse_log_level(&cli.log_level, LevelFilter::Warn),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;

    let config = cli.configuration();
    info!(
        "rendering {} at {}x{}, camera {:?}, {} color, animate={} every {:?}",
        config.target,
        config.width,
        config.height,
        config.camera.position.as_slice(),
        config.color_model,
        config.animate,
        config.frame_delay
    );

    let mut app = TerminalApp::new(config).context("invalid configuration")?;
    app.run().context("failed to draw to the terminal")?;

    Ok(())
}
