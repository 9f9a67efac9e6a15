use crate::restoration::steps::rank::FilterKind;
use serde::{Serialize, Serializer};
use std::fmt;

/// Image variant scored against the original
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Noisy,
    Filtered(FilterKind),
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Noisy => "Noisy",
            Self::Filtered(FilterKind::Mean) => "Mean Filtered",
            Self::Filtered(FilterKind::Min) => "Min Filtered",
            Self::Filtered(FilterKind::Median) => "Median Filtered",
            Self::Filtered(FilterKind::Max) => "Max Filtered",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// PSNR (dB, possibly infinite) and SSIM of one variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricResult {
    #[serde(serialize_with = "finite_or_null")]
    pub psnr: f64,
    pub ssim: f64,
}

/// JSON has no infinity; identical images report `null`
fn finite_or_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_some(value)
    } else {
        serializer.serialize_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsEntry {
    pub variant: Variant,
    #[serde(flatten)]
    pub result: MetricResult,
}

/// Metrics in computation order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsTable {
    entries: Vec<MetricsEntry>,
}

impl MetricsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result; a variant that is already present is replaced in place
    pub fn insert(&mut self, variant: Variant, result: MetricResult) {
        match self.entries.iter_mut().find(|e| e.variant == variant) {
            Some(entry) => entry.result = result,
            None => self.entries.push(MetricsEntry { variant, result }),
        }
    }

    #[cfg(test)]
    pub fn get(&self, variant: Variant) -> Option<&MetricResult> {
        self.entries
            .iter()
            .find(|e| e.variant == variant)
            .map(|e| &e.result)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variant, &MetricResult)> {
        self.entries.iter().map(|e| (e.variant, &e.result))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(psnr: f64, ssim: f64) -> MetricResult {
        MetricResult { psnr, ssim }
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let mut table = MetricsTable::new();
        table.insert(Variant::Noisy, result(15.0, 0.2));
        for kind in FilterKind::ALL {
            table.insert(Variant::Filtered(kind), result(20.0, 0.5));
        }

        let names: Vec<&str> = table.iter().map(|(v, _)| v.name()).collect();
        assert_eq!(
            names,
            [
                "Noisy",
                "Mean Filtered",
                "Min Filtered",
                "Median Filtered",
                "Max Filtered"
            ]
        );
    }

    #[test]
    fn test_insert_replaces_existing_variant() {
        let mut table = MetricsTable::new();
        table.insert(Variant::Noisy, result(15.0, 0.2));
        table.insert(Variant::Filtered(FilterKind::Min), result(9.0, 0.1));
        table.insert(Variant::Noisy, result(16.0, 0.3));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(Variant::Noisy), Some(&result(16.0, 0.3)));
        assert_eq!(table.iter().next().map(|(v, _)| v), Some(Variant::Noisy));
    }

    #[test]
    fn test_serializes_infinite_psnr_as_null() {
        let mut table = MetricsTable::new();
        table.insert(Variant::Noisy, result(f64::INFINITY, 1.0));
        table.insert(Variant::Filtered(FilterKind::Median), result(31.5, 0.75));

        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "variant": "Noisy", "psnr": null, "ssim": 1.0 },
                { "variant": "Median Filtered", "psnr": 31.5, "ssim": 0.75 }
            ])
        );
    }
}
