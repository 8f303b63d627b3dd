//! Raw frame representation with explicit channel order.

use crate::error::{Error, Result};
use image::RgbImage;

/// Channel ordering of a raw pixel buffer.
///
/// Capture sources disagree on this (V4L2 devices commonly deliver BGR,
/// decoded image files RGB), so the order is carried explicitly and
/// conversion is a visible step rather than an assumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red.
    Bgr,
}

/// A 3-channel frame as pulled from a capture source.
#[derive(Debug, Clone)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    order: ChannelOrder,
}

impl Frame {
    /// Wrap a raw interleaved pixel buffer.
    ///
    /// The buffer length must be exactly `width * height * 3`.
    pub fn new(data: Vec<u8>, width: u32, height: u32, order: ChannelOrder) -> Result<Self> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(Error::UnsupportedImage {
                reason: format!(
                    "frame buffer of {} bytes does not match {width}x{height}x3 ({expected} bytes)",
                    data.len()
                ),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            order,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel order of the underlying buffer.
    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Convert into an RGB image, swizzling channels when the source is BGR.
    pub fn into_rgb(self) -> Result<RgbImage> {
        let mut data = self.data;
        if self.order == ChannelOrder::Bgr {
            for pixel in data.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
        }
        RgbImage::from_raw(self.width, self.height, data).ok_or_else(|| Error::Internal {
            message: "frame buffer length changed during conversion".to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_bgr_to_rgb_swizzle() {
        // Two pixels: pure blue then pure red, stored as BGR.
        let data = vec![255, 0, 0, 0, 0, 255];
        let frame = Frame::new(data, 2, 1, ChannelOrder::Bgr).unwrap();
        assert_eq!((frame.width(), frame.height()), (2, 1));
        assert_eq!(frame.order(), ChannelOrder::Bgr);
        let rgb = frame.into_rgb().unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 255]);
        assert_eq!(rgb.get_pixel(1, 0).0, [255, 0, 0]);
    }

    #[test]
    fn test_rgb_passthrough() {
        let data = vec![1, 2, 3];
        let frame = Frame::new(data, 1, 1, ChannelOrder::Rgb).unwrap();
        let rgb = frame.into_rgb().unwrap();
        assert_eq!(rgb.get_pixel(0, 0).0, [1, 2, 3]);
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = Frame::new(vec![0; 5], 2, 1, ChannelOrder::Rgb);
        assert!(matches!(result, Err(Error::UnsupportedImage { .. })));
    }
}
