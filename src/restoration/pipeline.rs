use crate::buffer::FloatBuffer;
use crate::error::DenoiseError;
use crate::metrics::{self, MetricResult, MetricsTable, SsimParams, Variant};
use crate::sink::{Panel, ReportSink, VisualSink};
use rand::Rng;
use serde::Serialize;
use std::time::Instant;

use super::steps::{self, footprint::DiskFootprint, rank::FilterKind};

/// Metrics are computed on float `[0, 1]` buffers
const DATA_RANGE: f64 = 1.0;

/// Timing information for a single pipeline step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Parameters for one restoration run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Fraction of pixels hit by impulse noise
    pub density: f64,
    /// Disk footprint radius shared by the four rank filters
    pub radius: i32,
    pub ssim: SsimParams,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            density: 0.1,
            radius: 3,
            ssim: SsimParams::default(),
        }
    }
}

/// Everything a run produces, in computation order
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub noisy: FloatBuffer,
    pub filtered: Vec<(FilterKind, FloatBuffer)>,
    pub metrics: MetricsTable,
    pub steps: Vec<StepTiming>,
}

impl PipelineOutput {
    pub fn filtered(&self, kind: FilterKind) -> Option<&FloatBuffer> {
        self.filtered
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, img)| img)
    }
}

/// Noise → rank filters → metrics
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Degrade `original` with impulse noise, restore it with each rank filter
    /// and score every variant against `original`
    pub fn run(
        &self,
        original: &FloatBuffer,
        rng: &mut impl Rng,
    ) -> Result<PipelineOutput, DenoiseError> {
        let start = Instant::now();
        let mut timings = Vec::new();

        // Fail on bad parameters before doing any work
        let footprint = DiskFootprint::new(self.config.radius)?;
        self.config.ssim.validate()?;

        if original.data().iter().all(|&v| v == original.data()[0]) {
            tracing::warn!("Input image is constant; SSIM reduces to the luminance term");
        }

        let noisy = self.run_step("noise", &mut timings, || {
            steps::noise::apply_impulse_noise(original, self.config.density, rng)
        })?;

        tracing::debug!(
            "Disk footprint radius {} has {} offsets",
            footprint.radius(),
            footprint.size()
        );

        let noisy_bytes = noisy.to_uint8();
        let mut filtered = Vec::with_capacity(FilterKind::ALL.len());
        for kind in FilterKind::ALL {
            let restored = self.run_step(kind.as_str(), &mut timings, || {
                steps::rank::apply(&noisy_bytes, &footprint, kind)
            })?;
            filtered.push((kind, restored.to_float01()));
        }

        let metrics = self.run_step("metrics", &mut timings, || {
            let mut table = MetricsTable::new();
            table.insert(Variant::Noisy, self.score(original, &noisy)?);
            for (kind, restored) in &filtered {
                table.insert(Variant::Filtered(*kind), self.score(original, restored)?);
            }
            Ok(table)
        })?;

        tracing::info!(
            "Pipeline finished in {}ms ({} steps, {} variants scored)",
            start.elapsed().as_millis(),
            timings.len(),
            metrics.len()
        );

        Ok(PipelineOutput {
            noisy,
            filtered,
            metrics,
            steps: timings,
        })
    }

    /// Hand the run's results to the reporting and visualization sinks
    pub fn emit(
        &self,
        original: &FloatBuffer,
        output: &PipelineOutput,
        report: &mut dyn ReportSink,
        visual: Option<&mut dyn VisualSink>,
    ) -> Result<(), DenoiseError> {
        if let Some(visual) = visual {
            let mut panels = vec![
                Panel::new("Original", original),
                Panel::new("Noisy", &output.noisy),
            ];
            for kind in FilterKind::ALL {
                if let Some(img) = output.filtered(kind) {
                    panels.push(Panel::new(kind.label(), img));
                }
            }
            visual.show(&panels)?;
        }

        report.report(&output.metrics, &output.steps)
    }

    fn score(
        &self,
        original: &FloatBuffer,
        candidate: &FloatBuffer,
    ) -> Result<MetricResult, DenoiseError> {
        let psnr = metrics::psnr(original, candidate, DATA_RANGE)?;
        let ssim = metrics::ssim_with(original, candidate, DATA_RANGE, &self.config.ssim)?;
        Ok(MetricResult { psnr, ssim })
    }

    fn run_step<T, F>(
        &self,
        name: &str,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<T, DenoiseError>
    where
        F: FnOnce() -> Result<T, DenoiseError>,
    {
        let step_start = Instant::now();
        let result = step_fn()?;
        let time_ms = step_start.elapsed().as_millis() as u64;
        tracing::info!("Step '{}' completed in {}ms", name, time_ms);
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms,
        });
        Ok(result)
    }
}
