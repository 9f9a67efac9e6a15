//! Structural similarity index
//!
//! SSIM is evaluated for every window position that lies fully inside the
//! image and the local values are averaged. Uniform windows use integral
//! images for the local moments and apply the sample-covariance correction
//! `N / (N - 1)`; Gaussian windows use normalized weights and weighted
//! (population) moments.

use super::check_data_range;
use crate::buffer::{PixelBuffer, Sample};
use crate::error::DenoiseError;

const K1: f64 = 0.01;
const K2: f64 = 0.03;
/// Standard deviation of the Gaussian window
const GAUSSIAN_SIGMA: f64 = 1.5;

pub const DEFAULT_WINDOW: usize = 7;

/// Weighting applied to samples inside an SSIM window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    #[default]
    Uniform,
    Gaussian,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SsimParams {
    /// Side length of the square window; odd and at least 3
    pub window: usize,
    pub weighting: Weighting,
}

impl Default for SsimParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            weighting: Weighting::Uniform,
        }
    }
}

impl SsimParams {
    pub fn validate(&self) -> Result<(), DenoiseError> {
        if self.window < 3 || self.window % 2 == 0 {
            return Err(DenoiseError::InvalidArgument(format!(
                "SSIM window must be odd and at least 3, got {}",
                self.window
            )));
        }
        Ok(())
    }
}

/// Local first and second order moments of two windows
#[derive(Debug, Clone, Copy)]
struct Moments {
    mean_x: f64,
    mean_y: f64,
    var_x: f64,
    var_y: f64,
    cov_xy: f64,
}

impl Moments {
    fn ssim(&self, c1: f64, c2: f64) -> f64 {
        let numerator = (2.0 * self.mean_x * self.mean_y + c1) * (2.0 * self.cov_xy + c2);
        let denominator = (self.mean_x * self.mean_x + self.mean_y * self.mean_y + c1)
            * (self.var_x + self.var_y + c2);
        numerator / denominator
    }
}

/// SSIM with the default 7x7 uniform window
#[cfg(test)]
pub fn ssim<T: Sample>(
    reference: &PixelBuffer<T>,
    candidate: &PixelBuffer<T>,
    data_range: f64,
) -> Result<f64, DenoiseError> {
    ssim_with(reference, candidate, data_range, &SsimParams::default())
}

pub fn ssim_with<T: Sample>(
    reference: &PixelBuffer<T>,
    candidate: &PixelBuffer<T>,
    data_range: f64,
    params: &SsimParams,
) -> Result<f64, DenoiseError> {
    check_data_range(data_range)?;
    params.validate()?;
    reference.ensure_same_size(candidate)?;

    let (width, height) = reference.dimensions();
    if width < params.window || height < params.window {
        return Err(DenoiseError::DimensionMismatch {
            expected: (params.window, params.window),
            actual: (width, height),
        });
    }

    let x: Vec<f64> = reference.data().iter().map(|v| v.to_f64()).collect();
    let y: Vec<f64> = candidate.data().iter().map(|v| v.to_f64()).collect();

    let c1 = (K1 * data_range).powi(2);
    let c2 = (K2 * data_range).powi(2);

    let local: Vec<Moments> = match params.weighting {
        Weighting::Uniform => uniform_moments(&x, &y, width, height, params.window),
        Weighting::Gaussian => gaussian_moments(&x, &y, width, height, params.window),
    };

    let total: f64 = local.iter().map(|m| m.ssim(c1, c2)).sum();
    Ok(total / local.len() as f64)
}

fn uniform_moments(x: &[f64], y: &[f64], width: usize, height: usize, win: usize) -> Vec<Moments> {
    let sum_x = compute_integral(width, height, |i| x[i]);
    let sum_y = compute_integral(width, height, |i| y[i]);
    let sum_xx = compute_integral(width, height, |i| x[i] * x[i]);
    let sum_yy = compute_integral(width, height, |i| y[i] * y[i]);
    let sum_xy = compute_integral(width, height, |i| x[i] * y[i]);

    let n = (win * win) as f64;
    let cov_norm = n / (n - 1.0);

    let mut moments = Vec::with_capacity((width - win + 1) * (height - win + 1));
    for y0 in 0..=(height - win) {
        for x0 in 0..=(width - win) {
            let (x1, y1) = (x0 + win, y0 + win);
            let mean_x = window_sum(&sum_x, x0, y0, x1, y1) / n;
            let mean_y = window_sum(&sum_y, x0, y0, x1, y1) / n;
            let mean_xx = window_sum(&sum_xx, x0, y0, x1, y1) / n;
            let mean_yy = window_sum(&sum_yy, x0, y0, x1, y1) / n;
            let mean_xy = window_sum(&sum_xy, x0, y0, x1, y1) / n;

            moments.push(Moments {
                mean_x,
                mean_y,
                var_x: cov_norm * (mean_xx - mean_x * mean_x),
                var_y: cov_norm * (mean_yy - mean_y * mean_y),
                cov_xy: cov_norm * (mean_xy - mean_x * mean_y),
            });
        }
    }
    moments
}

fn gaussian_moments(x: &[f64], y: &[f64], width: usize, height: usize, win: usize) -> Vec<Moments> {
    let weights = gaussian_window(win);

    let mut moments = Vec::with_capacity((width - win + 1) * (height - win + 1));
    for y0 in 0..=(height - win) {
        for x0 in 0..=(width - win) {
            let (mut mx, mut my, mut mxx, mut myy, mut mxy) = (0.0, 0.0, 0.0, 0.0, 0.0);
            for wy in 0..win {
                let row = (y0 + wy) * width + x0;
                for wx in 0..win {
                    let w = weights[wy * win + wx];
                    let (a, b) = (x[row + wx], y[row + wx]);
                    mx += w * a;
                    my += w * b;
                    mxx += w * a * a;
                    myy += w * b * b;
                    mxy += w * a * b;
                }
            }

            moments.push(Moments {
                mean_x: mx,
                mean_y: my,
                var_x: mxx - mx * mx,
                var_y: myy - my * my,
                cov_xy: mxy - mx * my,
            });
        }
    }
    moments
}

/// Normalized 2D Gaussian weights, row-major
fn gaussian_window(win: usize) -> Vec<f64> {
    let center = (win / 2) as f64;
    let mut weights: Vec<f64> = (0..win * win)
        .map(|i| {
            let dx = (i % win) as f64 - center;
            let dy = (i / win) as f64 - center;
            (-(dx * dx + dy * dy) / (2.0 * GAUSSIAN_SIGMA * GAUSSIAN_SIGMA)).exp()
        })
        .collect();
    let total: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= total;
    }
    weights
}

/// Summed-area table with one row and column of zero padding
fn compute_integral<F>(width: usize, height: usize, value: F) -> Vec<Vec<f64>>
where
    F: Fn(usize) -> f64,
{
    let mut integral = vec![vec![0.0f64; width + 1]; height + 1];
    for y in 0..height {
        for x in 0..width {
            integral[y + 1][x + 1] =
                value(y * width + x) + integral[y][x + 1] + integral[y + 1][x] - integral[y][x];
        }
    }
    integral
}

/// Sum over `[x0, x1) x [y0, y1)`
fn window_sum(integral: &[Vec<f64>], x0: usize, y0: usize, x1: usize, y1: usize) -> f64 {
    integral[y1][x1] - integral[y0][x1] - integral[y1][x0] + integral[y0][x0]
}
