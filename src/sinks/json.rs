use crate::error::DenoiseError;
use crate::metrics::MetricsTable;
use crate::restoration::StepTiming;
use crate::sink::ReportSink;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct JsonDocument<'a> {
    metrics: &'a MetricsTable,
    steps: &'a [StepTiming],
}

/// Machine-readable report; infinite PSNR is written as `null`
pub struct JsonReport<W> {
    out: W,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportSink for JsonReport<W> {
    fn name(&self) -> &'static str {
        "json"
    }

    fn report(&mut self, metrics: &MetricsTable, steps: &[StepTiming]) -> Result<(), DenoiseError> {
        let doc = JsonDocument { metrics, steps };
        serde_json::to_writer_pretty(&mut self.out, &doc)
            .map_err(|e| DenoiseError::Output(format!("Failed to serialize report: {}", e)))?;
        writeln!(self.out)
            .and_then(|_| self.out.flush())
            .map_err(|e| DenoiseError::Output(format!("Failed to write report: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricResult, Variant};

    #[test]
    fn test_writes_metrics_and_steps() {
        let mut table = MetricsTable::new();
        table.insert(
            Variant::Noisy,
            MetricResult {
                psnr: 16.25,
                ssim: 0.5,
            },
        );
        let steps = vec![StepTiming {
            name: "noise".to_string(),
            time_ms: 3,
        }];

        let mut sink = JsonReport::new(Vec::new());
        sink.report(&table, &steps).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&sink.into_inner()).unwrap();

        assert_eq!(value["metrics"][0]["variant"], "Noisy");
        assert_eq!(value["metrics"][0]["psnr"], 16.25);
        assert_eq!(value["metrics"][0]["ssim"], 0.5);
        assert_eq!(value["steps"][0]["name"], "noise");
        assert_eq!(value["steps"][0]["time_ms"], 3);
    }
}
