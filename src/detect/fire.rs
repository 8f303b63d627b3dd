//! Fire presence check (placeholder).

use crate::constants::stub;
use image::RgbImage;

/// Verdict of a fire check.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FireReport {
    /// Human-readable verdict, lowercase.
    pub label: String,
    /// Confidence in `[0, 1]`.
    pub confidence: f32,
}

/// Fire detection capability.
pub trait FireCheck {
    /// Assess one image for fire presence.
    fn assess(&self, image: &RgbImage) -> FireReport;
}

/// Placeholder that reports no fire with fixed confidence, regardless of
/// input. Stands in until a trained fire model is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysClear;

impl FireCheck for AlwaysClear {
    fn assess(&self, _image: &RgbImage) -> FireReport {
        FireReport {
            label: stub::FIRE_LABEL.to_string(),
            confidence: stub::FIRE_CONFIDENCE,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_always_clear_is_constant() {
        let check = AlwaysClear;
        let a = check.assess(&RgbImage::new(10, 10));
        let b = check.assess(&RgbImage::from_pixel(640, 480, image::Rgb([255, 0, 0])));
        assert_eq!(a, b);
        assert_eq!(a.label, "no fire");
        assert_eq!(a.confidence, 0.98);
    }
}
