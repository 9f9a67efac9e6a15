use crate::buffer::FloatBuffer;
use crate::error::DenoiseError;
use crate::restoration::steps::grayscale;
use std::path::Path;

/// Decode an image file into a float `[0, 1]` grayscale buffer
pub fn load_grayscale(path: &Path) -> Result<FloatBuffer, DenoiseError> {
    let image = image::open(path).map_err(|e| DenoiseError::ImageNotFound {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!(
        "Loaded {} ({}x{}, {:?})",
        path.display(),
        image.width(),
        image.height(),
        image.color()
    );

    let gray = grayscale::apply(&image)?;
    tracing::debug!("Grayscale buffer in {} domain", gray.domain().as_str());
    Ok(gray)
}
