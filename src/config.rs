use crate::error::DenoiseError;
use crate::metrics::{SsimParams, Weighting};
use crate::restoration::PipelineConfig;
use crate::Args;
use std::path::PathBuf;

/// SSIM weighting as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum WeightingArg {
    Uniform,
    Gaussian,
}

impl From<WeightingArg> for Weighting {
    fn from(arg: WeightingArg) -> Self {
        match arg {
            WeightingArg::Uniform => Weighting::Uniform,
            WeightingArg::Gaussian => Weighting::Gaussian,
        }
    }
}

/// Run configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub density: f64,
    pub radius: i32,
    pub seed: Option<u64>,
    pub ssim_window: usize,
    pub ssim_weighting: Weighting,
    pub output_dir: Option<PathBuf>,
    pub json: bool,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            density: args.density,
            radius: args.radius,
            seed: args.seed,
            ssim_window: args.ssim_window,
            ssim_weighting: args.ssim_weighting.into(),
            output_dir: args.output_dir,
            json: args.json,
        }
    }
}

impl Config {
    /// Reject out-of-range parameters before any image is read
    pub fn validate(&self) -> Result<(), DenoiseError> {
        if !(0.0..=1.0).contains(&self.density) {
            return Err(DenoiseError::InvalidArgument(format!(
                "density must be within [0, 1], got {}",
                self.density
            )));
        }
        if self.radius < 0 {
            return Err(DenoiseError::InvalidArgument(format!(
                "radius must be non-negative, got {}",
                self.radius
            )));
        }
        self.pipeline().ssim.validate()
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig {
            density: self.density,
            radius: self.radius,
            ssim: SsimParams {
                window: self.ssim_window,
                weighting: self.ssim_weighting,
            },
        }
    }
}
