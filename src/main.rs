use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod buffer;
mod config;
mod error;
mod metrics;
mod restoration;
mod sink;
mod sinks;
mod source;

use config::WeightingArg;
use error::DenoiseError;
use restoration::Pipeline;
use sink::VisualSink;

#[derive(Parser, Debug)]
#[command(name = "rank-denoise-bench")]
#[command(about = "Salt-and-pepper restoration benchmark for disk rank filters")]
#[command(version)]
pub struct Args {
    /// Image to degrade and restore
    pub input: PathBuf,

    /// Fraction of pixels corrupted by impulse noise
    #[arg(long, env = "DENOISE_DENSITY", default_value = "0.1", allow_negative_numbers = true)]
    pub density: f64,

    /// Disk footprint radius for the rank filters
    #[arg(long, env = "DENOISE_RADIUS", default_value = "3", allow_negative_numbers = true)]
    pub radius: i32,

    /// Seed for the noise generator (random if not set)
    #[arg(long, env = "DENOISE_SEED")]
    pub seed: Option<u64>,

    /// SSIM window side length (odd)
    #[arg(long, default_value = "7")]
    pub ssim_window: usize,

    /// SSIM window weighting
    #[arg(long, value_enum, default_value = "uniform")]
    pub ssim_weighting: WeightingArg,

    /// Directory for the restored images and comparison strip
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing; stdout is reserved for the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting rank-denoise-bench v{}", env!("CARGO_PKG_VERSION"));

    // anyhow prints the code followed by the cause
    run(&config).map_err(|e| {
        let code = e.code();
        anyhow::Error::new(e).context(code)
    })
}

fn run(config: &config::Config) -> Result<(), DenoiseError> {
    config.validate()?;

    let original = source::load_grayscale(&config.input)?;

    let mut rng = match config.seed {
        Some(seed) => {
            tracing::info!("Using noise seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let pipeline = Pipeline::new(config.pipeline());
    tracing::info!(
        "Density {}, radius {}, SSIM window {} ({:?})",
        pipeline.config().density,
        pipeline.config().radius,
        pipeline.config().ssim.window,
        pipeline.config().ssim.weighting
    );
    let output = pipeline.run(&original, &mut rng)?;

    let mut report = sinks::report_sink(config.json, std::io::stdout());
    tracing::debug!("Reporting with the {} sink", report.name());

    let mut gallery = config.output_dir.as_ref().map(|dir| {
        tracing::info!("Writing images to {}", dir.display());
        sinks::GallerySink::new(dir)
    });

    pipeline.emit(
        &original,
        &output,
        report.as_mut(),
        gallery.as_mut().map(|g| g as &mut dyn VisualSink),
    )
}
