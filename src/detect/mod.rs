//! Detection overlays: poaching-zone and fire placeholders.
//!
//! Both detectors here are fixed-output placeholders behind real trait
//! seams. A future implementation replaces the stub without touching any
//! caller: the contract is variable-count, image-dependent boxes for
//! [`Detector`] and an image-dependent verdict for [`FireCheck`].

mod draw;
mod fire;

pub use draw::Overlay;
pub use fire::{AlwaysClear, FireCheck, FireReport};

use crate::constants::{overlay, stub};
use crate::error::Result;
use image::RgbImage;

/// An axis-aligned box in pixel coordinates.
///
/// Invariant for real detections: lies within image bounds with positive
/// width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct BoundingBox {
    /// Left edge, inclusive.
    pub left: u32,
    /// Top edge, inclusive.
    pub top: u32,
    /// Right edge, exclusive.
    pub right: u32,
    /// Bottom edge, exclusive.
    pub bottom: u32,
}

impl BoundingBox {
    /// Box width in pixels.
    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    /// Box height in pixels.
    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }
}

/// An annotated copy of the input plus the detected boxes.
#[derive(Debug, Clone)]
pub struct Detection {
    /// Input image with detection overlays drawn on it.
    pub image: RgbImage,
    /// Detected regions; may be empty.
    pub boxes: Vec<BoundingBox>,
}

/// Region detection capability.
pub trait Detector {
    /// Detect regions of interest and return an annotated copy of the image.
    fn detect(&self, image: &RgbImage) -> Result<Detection>;
}

/// The current placeholder: one rectangle inset a fixed number of pixels
/// from each edge, regardless of image content.
///
/// Not representative of real detection semantics; it exists so the overlay
/// path is exercised end to end until a trained detector lands.
#[derive(Debug, Clone, Copy)]
pub struct InsetDetector {
    inset: u32,
}

impl Default for InsetDetector {
    fn default() -> Self {
        Self {
            inset: stub::POACHING_INSET,
        }
    }
}

impl InsetDetector {
    /// Placeholder with a custom inset.
    pub fn with_inset(inset: u32) -> Self {
        Self { inset }
    }
}

impl Detector for InsetDetector {
    fn detect(&self, image: &RgbImage) -> Result<Detection> {
        let (w, h) = image.dimensions();
        let mut annotated = image.clone();

        // Images too small for the inset get no box at all; a degenerate
        // rectangle would violate the positive-area invariant.
        if w <= 2 * self.inset || h <= 2 * self.inset {
            return Ok(Detection {
                image: annotated,
                boxes: Vec::new(),
            });
        }

        let bbox = BoundingBox {
            left: self.inset,
            top: self.inset,
            right: w - self.inset,
            bottom: h - self.inset,
        };
        draw::draw_box(&mut annotated, &bbox, overlay::BOX_COLOR, stub::POACHING_BORDER);

        Ok(Detection {
            image: annotated,
            boxes: vec![bbox],
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_inset_detector_fixed_box() {
        let img = RgbImage::new(300, 200);
        let detection = InsetDetector::default().detect(&img).unwrap();

        assert_eq!(detection.boxes.len(), 1);
        assert_eq!(
            detection.boxes[0],
            BoundingBox {
                left: 50,
                top: 50,
                right: 250,
                bottom: 150
            }
        );
        assert_eq!(detection.image.dimensions(), (300, 200));
    }

    #[test]
    fn test_inset_detector_box_within_bounds_positive_area() {
        let img = RgbImage::new(640, 480);
        let detection = InsetDetector::default().detect(&img).unwrap();
        let bbox = &detection.boxes[0];
        assert!(bbox.right <= 640 && bbox.bottom <= 480);
        assert!(bbox.width() > 0 && bbox.height() > 0);
    }

    #[test]
    fn test_inset_detector_tiny_image_yields_no_boxes() {
        let img = RgbImage::new(80, 80);
        let detection = InsetDetector::default().detect(&img).unwrap();
        assert!(detection.boxes.is_empty());

        // Shrinking the inset makes the same image annotatable again.
        let detection = InsetDetector::with_inset(10).detect(&img).unwrap();
        assert_eq!(detection.boxes.len(), 1);
    }

    #[test]
    fn test_inset_detector_draws_on_copy_not_input() {
        let img = RgbImage::new(300, 200);
        let detection = InsetDetector::default().detect(&img).unwrap();
        // Input stays black; the annotated copy carries the green border.
        assert_eq!(img.get_pixel(50, 50).0, [0, 0, 0]);
        assert_eq!(detection.image.get_pixel(50, 50).0, [0, 255, 0]);
    }
}
