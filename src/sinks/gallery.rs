use crate::buffer::FloatBuffer;
use crate::error::DenoiseError;
use crate::sink::{Panel, VisualSink};
use image::{imageops, GrayImage, Luma};
use std::path::PathBuf;

/// White gap between panels in the comparison strip
const GUTTER: u32 = 4;
const MONTAGE_FILE: &str = "comparison.png";

/// Writes each panel as a PNG plus a side-by-side comparison strip
pub struct GallerySink {
    dir: PathBuf,
}

impl GallerySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn save(&self, image: &GrayImage, file_name: &str) -> Result<(), DenoiseError> {
        let path = self.dir.join(file_name);
        image.save(&path).map_err(|e| {
            DenoiseError::Output(format!("Failed to write {}: {}", path.display(), e))
        })?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl VisualSink for GallerySink {
    fn show(&mut self, panels: &[Panel<'_>]) -> Result<(), DenoiseError> {
        let Some(first) = panels.first() else {
            return Ok(());
        };
        for panel in &panels[1..] {
            first.image.ensure_same_size(panel.image)?;
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| {
            DenoiseError::Output(format!(
                "Failed to create {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let rendered: Vec<GrayImage> = panels.iter().map(|p| to_gray_image(p.image)).collect();
        for (panel, image) in panels.iter().zip(&rendered) {
            self.save(image, &file_name(panel.label))?;
        }

        let (width, height) = (first.image.width() as u32, first.image.height() as u32);
        let count = rendered.len() as u32;
        let mut montage = GrayImage::from_pixel(
            count * width + (count - 1) * GUTTER,
            height,
            Luma([255u8]),
        );
        for (i, image) in rendered.iter().enumerate() {
            let x = i as u32 * (width + GUTTER);
            imageops::replace(&mut montage, image, x as i64, 0);
        }
        self.save(&montage, MONTAGE_FILE)?;

        tracing::info!(
            "Wrote {} panels and {} to {}",
            panels.len(),
            MONTAGE_FILE,
            self.dir.display()
        );
        Ok(())
    }
}

fn to_gray_image(buffer: &FloatBuffer) -> GrayImage {
    let bytes = buffer.to_uint8();
    let (width, height) = bytes.dimensions();
    GrayImage::from_fn(width as u32, height as u32, |x, y| {
        Luma([bytes.get(x as usize, y as usize).unwrap_or(0)])
    })
}

/// "Median" -> "median.png"
fn file_name(label: &str) -> String {
    let stem: String = label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.png", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(file_name("Original"), "original.png");
        assert_eq!(file_name("Mean Filter"), "mean_filter.png");
    }

    #[test]
    fn test_writes_panels_and_montage() {
        let dir = tempfile::TempDir::new().unwrap();
        let out_dir = dir.path().join("gallery");
        let dark = FloatBuffer::filled(6, 4, 0.0).unwrap();
        let light = FloatBuffer::filled(6, 4, 1.0).unwrap();

        let mut sink = GallerySink::new(&out_dir);
        sink.show(&[Panel::new("Original", &dark), Panel::new("Noisy", &light)])
            .unwrap();

        let original = image::open(out_dir.join("original.png")).unwrap().to_luma8();
        assert_eq!(original.dimensions(), (6, 4));
        assert_eq!(original.get_pixel(0, 0).0[0], 0);

        let montage = image::open(out_dir.join(MONTAGE_FILE)).unwrap().to_luma8();
        assert_eq!(montage.dimensions(), (2 * 6 + GUTTER, 4));
        assert_eq!(montage.get_pixel(5, 2).0[0], 0);
        assert_eq!(montage.get_pixel(6, 2).0[0], 255); // gutter
        assert_eq!(montage.get_pixel(6 + GUTTER, 2).0[0], 255);
    }

    #[test]
    fn test_rejects_mismatched_panels() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = FloatBuffer::filled(6, 4, 0.0).unwrap();
        let b = FloatBuffer::filled(6, 5, 0.0).unwrap();

        let mut sink = GallerySink::new(dir.path());
        let err = sink
            .show(&[Panel::new("Original", &a), Panel::new("Noisy", &b)])
            .unwrap_err();
        assert!(matches!(err, DenoiseError::DimensionMismatch { .. }));
    }
}
