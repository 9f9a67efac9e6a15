use crate::error::DenoiseError;
use crate::metrics::MetricsTable;
use crate::restoration::StepTiming;
use crate::sink::ReportSink;
use std::io::Write;

const TITLE: &str = "RESTORATION QUALITY";

/// Plain-text table: PSNR to 2 decimals, SSIM to 4
pub struct ConsoleReport<W> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for ConsoleReport<W> {
    fn name(&self) -> &'static str {
        "text"
    }

    fn report(
        &mut self,
        metrics: &MetricsTable,
        _steps: &[StepTiming],
    ) -> Result<(), DenoiseError> {
        let io_err = |e: std::io::Error| DenoiseError::Output(format!("Failed to write report: {}", e));

        if metrics.is_empty() {
            tracing::warn!("No metrics to report");
        }

        writeln!(self.out, "{}", TITLE).map_err(io_err)?;
        for (variant, result) in metrics.iter() {
            writeln!(
                self.out,
                "{:<15} -> PSNR: {:.2}, SSIM: {:.4}",
                variant.name(),
                result.psnr,
                result.ssim
            )
            .map_err(io_err)?;
        }
        self.out.flush().map_err(io_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricResult, Variant};
    use crate::restoration::steps::rank::FilterKind;

    #[test]
    fn test_formats_one_line_per_variant() {
        let mut table = MetricsTable::new();
        table.insert(
            Variant::Noisy,
            MetricResult {
                psnr: 15.456,
                ssim: 0.123456,
            },
        );
        table.insert(
            Variant::Filtered(FilterKind::Median),
            MetricResult {
                psnr: f64::INFINITY,
                ssim: 1.0,
            },
        );

        let mut sink = ConsoleReport::new(Vec::new());
        sink.report(&table, &[]).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        assert_eq!(
            text,
            "RESTORATION QUALITY\n\
             Noisy           -> PSNR: 15.46, SSIM: 0.1235\n\
             Median Filtered -> PSNR: inf, SSIM: 1.0000\n"
        );
    }
}
