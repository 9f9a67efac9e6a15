use super::footprint::DiskFootprint;
use crate::buffer::ByteBuffer;
use crate::error::DenoiseError;
use rayon::prelude::*;

/// Order statistic applied to each neighborhood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Mean,
    Min,
    Median,
    Max,
}

impl FilterKind {
    /// All kinds, in reporting order
    pub const ALL: [FilterKind; 4] = [Self::Mean, Self::Min, Self::Median, Self::Max];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Min => "min",
            Self::Median => "median",
            Self::Max => "max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Min => "Min",
            Self::Median => "Median",
            Self::Max => "Max",
        }
    }

    /// Reduce a non-empty neighborhood to one sample
    ///
    /// `values` is used as scratch space and may be reordered.
    fn reduce(&self, values: &mut [u8]) -> u8 {
        match self {
            Self::Mean => {
                let n = values.len() as u64;
                let sum: u64 = values.iter().map(|&v| v as u64).sum();
                ((sum + n / 2) / n).min(u8::MAX as u64) as u8
            }
            Self::Min => values.iter().copied().min().unwrap_or(0),
            Self::Max => values.iter().copied().max().unwrap_or(u8::MAX),
            Self::Median => {
                // lower of the two middle values when the count is even
                let mid = (values.len() - 1) / 2;
                *values.select_nth_unstable(mid).1
            }
        }
    }
}

/// Apply a rank filter over a disk footprint
///
/// Out-of-bounds neighbors replicate the nearest edge sample. Rows are
/// processed in parallel against the untouched input, so the result does not
/// depend on evaluation order.
pub fn apply(
    image: &ByteBuffer,
    footprint: &DiskFootprint,
    kind: FilterKind,
) -> Result<ByteBuffer, DenoiseError> {
    let (width, height) = image.dimensions();
    let offsets = footprint.offsets();
    if offsets.is_empty() {
        return Err(DenoiseError::InvalidArgument(
            "footprint has no offsets".to_string(),
        ));
    }

    let mut out = vec![0u8; width * height];
    out.par_chunks_mut(width)
        .enumerate()
        .for_each_init(
            || Vec::with_capacity(offsets.len()),
            |scratch, (y, row)| {
                for (x, px) in row.iter_mut().enumerate() {
                    scratch.clear();
                    scratch.extend(offsets.iter().map(|&(dx, dy)| {
                        image.get_clamped(x as isize + dx, y as isize + dy)
                    }));
                    *px = kind.reduce(scratch);
                }
            },
        );

    ByteBuffer::from_vec(width, height, out)
}
