use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::Rng;

use rds_rs::geometry::{
    DEFAULT_EYE_SEPARATION_INCHES, DEFAULT_OBSERVER_DISTANCE_INCHES, DEFAULT_SEPARATION_FACTOR,
    DEFAULT_X_DPI,
};
use rds_rs::{render_rds, RenderParams};

#[derive(Parser)]
#[command(name = "rds")]
#[command(about = "Generate a random-dot autostereogram from a grayscale depth map")]
#[command(version)]
struct Cli {
    /// Path to the depth map used to generate the autostereogram.
    source: PathBuf,

    /// Horizontal dpi value used in the depth calculation.
    #[arg(short = 'd', long, default_value_t = DEFAULT_X_DPI)]
    xdpi: f64,

    /// The distance between the observer and the screen in inches.
    #[arg(short = 'o', long, default_value_t = DEFAULT_OBSERVER_DISTANCE_INCHES)]
    observer_distance: f64,

    /// The distance between the observer's eyes in inches.
    #[arg(short = 'e', long, default_value_t = DEFAULT_EYE_SEPARATION_INCHES)]
    eye_separation: f64,

    /// The stereo separation factor used in the depth calculation.
    #[arg(short = 's', long, default_value_t = DEFAULT_SEPARATION_FACTOR)]
    stereo_separation_factor: f64,

    /// The file to save the resulting image to.
    #[arg(short = 'f', long)]
    output_file: Option<PathBuf>,

    /// Seed for the random dot pattern; drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    /// Source name with a parameter suffix, used when no output file is
    /// given, e.g. `scene-autostereogram-xdpi_75.0-od_12.0-es_2.5-esf_0.7.png`.
    fn default_output_path(&self) -> PathBuf {
        let stem = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let suffix = format!(
            "-autostereogram-xdpi_{:?}-od_{:?}-es_{:?}-esf_{:?}",
            self.xdpi, self.observer_distance, self.eye_separation, self.stereo_separation_factor
        );
        let name = match self.source.extension() {
            Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
            None => format!("{}{}", stem, suffix),
        };
        self.source.with_file_name(name)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let depth = image::open(&cli.source)
        .with_context(|| format!("failed to load depth map {}", cli.source.display()))?
        .to_luma8();
    info!("loaded {}x{} depth map", depth.width(), depth.height());

    let params = RenderParams {
        x_dpi: cli.xdpi,
        separation_factor: cli.stereo_separation_factor,
        eye_separation_inches: cli.eye_separation,
        observer_distance_inches: cli.observer_distance,
    };
    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!("rendering with seed {}", seed);
    let image = render_rds(&depth, &params, seed)?;

    let output = cli
        .output_file
        .clone()
        .unwrap_or_else(|| cli.default_output_path());
    image
        .save(&output)
        .with_context(|| format!("failed to save {}", output.display()))?;
    info!("wrote {}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    run(&cli)
}
