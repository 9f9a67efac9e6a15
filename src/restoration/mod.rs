//! Impulse-noise restoration
//!
//! Noise injection, disk-footprint rank filters and the pipeline that runs
//! them and scores the results.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PipelineConfig, StepTiming};
