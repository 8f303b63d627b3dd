//! Image file decoding with channel-count validation.

use crate::error::{Error, Result};
use image::{ColorType, DynamicImage, RgbImage};
use std::path::Path;

/// Decode an image file into a 3-channel RGB buffer.
///
/// Grayscale and alpha-bearing images are outside the preprocessing
/// contract and are rejected rather than silently reinterpreted; a
/// transparent background folded into RGB would feed the classifier pixels
/// it was never trained on.
pub fn decode_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|e| Error::ImageOpen {
        path: path.to_path_buf(),
        source: e,
    })?;

    ensure_rgb(&img)?;
    Ok(img.into_rgb8())
}

fn ensure_rgb(img: &DynamicImage) -> Result<()> {
    match img.color() {
        ColorType::Rgb8 | ColorType::Rgb16 | ColorType::Rgb32F => Ok(()),
        other => Err(Error::UnsupportedImage {
            reason: format!("expected a 3-channel color image, got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_rgb_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        let img = RgbImage::from_pixel(4, 4, image::Rgb([10, 20, 30]));
        img.save(&path).unwrap();

        let decoded = decode_image(&path).unwrap();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(0, 0).0, [10, 20, 30]);
    }

    #[test]
    fn test_rgba_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([1, 2, 3, 128]));
        img.save(&path).unwrap();

        let result = decode_image(&path);
        assert!(matches!(result, Err(Error::UnsupportedImage { .. })));
    }

    #[test]
    fn test_grayscale_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        let img = image::GrayImage::from_pixel(4, 4, image::Luma([100]));
        img.save(&path).unwrap();

        let result = decode_image(&path);
        assert!(matches!(result, Err(Error::UnsupportedImage { .. })));
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let result = decode_image(Path::new("/nonexistent/img.png"));
        assert!(matches!(result, Err(Error::ImageOpen { .. })));
    }
}
