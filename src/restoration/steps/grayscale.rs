use crate::buffer::{ByteBuffer, FloatBuffer};
use crate::error::DenoiseError;
use image::DynamicImage;

/// Convert a decoded image to a float `[0, 1]` grayscale buffer
///
/// Color images are reduced with the `image` crate's luma weighting before
/// scaling to the unit range.
pub fn apply(image: &DynamicImage) -> Result<FloatBuffer, DenoiseError> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    let bytes = ByteBuffer::from_vec(width as usize, height as usize, gray.into_raw())?;
    Ok(bytes.to_float01())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_grayscale_converts_color() {
        let mut img = RgbImage::new(10, 10);
        img.put_pixel(0, 0, Rgb([255, 0, 0])); // Red
        img.put_pixel(1, 0, Rgb([0, 255, 0])); // Green
        img.put_pixel(2, 0, Rgb([0, 0, 255])); // Blue
        img.put_pixel(3, 0, Rgb([255, 255, 255]));

        let gray = apply(&DynamicImage::ImageRgb8(img)).unwrap();

        assert!(gray.get(0, 0).unwrap() > 0.0);
        assert!(gray.get(1, 0).unwrap() > gray.get(0, 0).unwrap());
        assert!(gray.get(2, 0).unwrap() > 0.0);
        assert_eq!(gray.get(3, 0), Some(1.0));
        assert_eq!(gray.get(4, 0), Some(0.0));
    }

    #[test]
    fn test_grayscale_preserves_dimensions() {
        let img = RgbImage::new(100, 50);
        let gray = apply(&DynamicImage::ImageRgb8(img)).unwrap();
        assert_eq!(gray.dimensions(), (100, 50));
    }

    #[test]
    fn test_gray_input_scales_to_unit_range() {
        let img = GrayImage::from_fn(3, 1, |x, _| Luma([[0u8, 51, 255][x as usize]]));
        let gray = apply(&DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(gray.data(), &[0.0, 0.2, 1.0]);
    }
}
