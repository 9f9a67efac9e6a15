//! Restoration quality metrics
//!
//! PSNR and SSIM compare a candidate buffer against a reference. Both are
//! computed on raw sample values, so `data_range` must match the domain
//! (`1.0` for float buffers, `255.0` for byte buffers).

pub mod psnr;
pub mod report;
pub mod ssim;

pub use psnr::psnr;
pub use report::{MetricResult, MetricsTable, Variant};
pub use ssim::{ssim_with, SsimParams, Weighting};

use crate::error::DenoiseError;

fn check_data_range(data_range: f64) -> Result<(), DenoiseError> {
    if !data_range.is_finite() || data_range <= 0.0 {
        return Err(DenoiseError::InvalidArgument(format!(
            "data range must be a positive finite number, got {}",
            data_range
        )));
    }
    Ok(())
}
