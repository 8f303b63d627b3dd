//! Deterministic preprocessing into the classifier input tensor.

use crate::config::Normalization;
use crate::constants::{imagenet, input};
use image::RgbImage;
use image::imageops::FilterType;
use ndarray::Array4;

/// Preprocessing parameters, fixed by the model's training convention.
#[derive(Debug, Clone, Copy)]
pub struct PreprocessSpec {
    /// Pixel normalization convention.
    pub normalization: Normalization,
}

impl PreprocessSpec {
    /// Build a spec for the given normalization convention.
    pub fn new(normalization: Normalization) -> Self {
        Self { normalization }
    }
}

/// Convert an RGB image into the `(1, 224, 224, 3)` input tensor.
///
/// Step order matters and matches the training pipeline exactly: resize
/// first with a fixed triangle (bilinear) kernel, then cast to f32, then
/// normalize, then add the batch axis. The function is pure; identical
/// input always yields an identical tensor.
pub fn preprocess(image: &RgbImage, spec: &PreprocessSpec) -> Array4<f32> {
    let resized = image::imageops::resize(image, input::WIDTH, input::HEIGHT, FilterType::Triangle);

    let h = input::HEIGHT as usize;
    let w = input::WIDTH as usize;
    let mut tensor = Array4::<f32>::zeros((1, h, w, input::CHANNELS));

    for (x, y, pixel) in resized.enumerate_pixels() {
        for c in 0..input::CHANNELS {
            let value = normalize_channel(f32::from(pixel[c]), c, spec.normalization);
            tensor[[0, y as usize, x as usize, c]] = value;
        }
    }

    tensor
}

fn normalize_channel(raw: f32, channel: usize, convention: Normalization) -> f32 {
    match convention {
        Normalization::Unit => raw / 255.0,
        Normalization::Symmetric => raw / 127.5 - 1.0,
        Normalization::Imagenet => {
            (raw / 255.0 - imagenet::MEAN[channel]) / imagenet::STD[channel]
        }
    }
}
