use crate::error::DenoiseError;

/// Disk-shaped neighborhood: every `(dx, dy)` with `dx² + dy² <= radius²`
///
/// Offsets are stored row-major (by `dy`, then `dx`), so a given radius always
/// produces the same sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskFootprint {
    radius: u32,
    offsets: Vec<(isize, isize)>,
}

impl DiskFootprint {
    pub fn new(radius: i32) -> Result<Self, DenoiseError> {
        let radius = u32::try_from(radius).map_err(|_| {
            DenoiseError::InvalidArgument(format!(
                "footprint radius must be non-negative, got {}",
                radius
            ))
        })?;

        let r = radius as isize;
        let r2 = r * r;
        let mut offsets = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r2 {
                    offsets.push((dx, dy));
                }
            }
        }

        Ok(Self { radius, offsets })
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn offsets(&self) -> &[(isize, isize)] {
        &self.offsets
    }

    pub fn size(&self) -> usize {
        self.offsets.len()
    }
}
