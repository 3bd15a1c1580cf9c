//! Image file decoding, kept apart from the interpreter core
//!
//! Any format the `image` crate can read is accepted; alpha is dropped and
//! every pixel is converted to 8-bit RGB.

use crate::error::CodelError;
use crate::grid::RgbBuffer;
use log::debug;
use std::path::Path;

/// Decode an image file into an RGB pixel buffer
pub fn load_image(path: &Path) -> Result<RgbBuffer, CodelError> {
    let decoded = image::open(path).map_err(|e| CodelError::Image {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("decoded {} ({}x{} pixels)", path.display(), width, height);

    let pixels = rgb.pixels().map(|p| p.0).collect();
    Ok(RgbBuffer::new(width as usize, height as usize, pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_missing_file() {
        let result = load_image(Path::new("/nonexistent/program.png"));
        assert!(matches!(result, Err(CodelError::Image { .. })));
    }
}
