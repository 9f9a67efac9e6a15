use super::check_data_range;
use crate::buffer::{PixelBuffer, Sample};
use crate::error::DenoiseError;

/// Mean squared per-pixel difference
pub fn mse<T: Sample>(
    reference: &PixelBuffer<T>,
    candidate: &PixelBuffer<T>,
) -> Result<f64, DenoiseError> {
    reference.ensure_same_size(candidate)?;

    let sum: f64 = reference
        .data()
        .iter()
        .zip(candidate.data())
        .map(|(&a, &b)| {
            let d = a.to_f64() - b.to_f64();
            d * d
        })
        .sum();

    Ok(sum / reference.data().len() as f64)
}

/// Peak signal-to-noise ratio in decibels
///
/// Returns `f64::INFINITY` for pixel-identical buffers.
pub fn psnr<T: Sample>(
    reference: &PixelBuffer<T>,
    candidate: &PixelBuffer<T>,
    data_range: f64,
) -> Result<f64, DenoiseError> {
    check_data_range(data_range)?;
    let mse = mse(reference, candidate)?;
    if mse == 0.0 {
        return Ok(f64::INFINITY);
    }
    Ok(10.0 * (data_range * data_range / mse).log10())
}
