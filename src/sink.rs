use crate::buffer::FloatBuffer;
use crate::error::DenoiseError;
use crate::metrics::MetricsTable;
use crate::restoration::StepTiming;

/// A labeled image handed to a visualization sink
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub label: &'a str,
    pub image: &'a FloatBuffer,
}

impl<'a> Panel<'a> {
    pub fn new(label: &'a str, image: &'a FloatBuffer) -> Self {
        Self { label, image }
    }
}

/// Consumer of the ordered metrics table
pub trait ReportSink {
    /// Returns the sink identifier (e.g., "text", "json")
    fn name(&self) -> &'static str;

    fn report(
        &mut self,
        metrics: &MetricsTable,
        steps: &[StepTiming],
    ) -> Result<(), DenoiseError>;
}

/// Consumer of the labeled, same-size display images
pub trait VisualSink {
    fn show(&mut self, panels: &[Panel<'_>]) -> Result<(), DenoiseError>;
}
