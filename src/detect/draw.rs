//! Overlay drawing helpers.

use crate::constants::overlay;
use crate::detect::BoundingBox;
use crate::error::{Error, Result};
use crate::inference::Prediction;
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::path::Path;
use tracing::warn;

/// Draw a hollow rectangle with the given border thickness.
pub fn draw_box(image: &mut RgbImage, bbox: &BoundingBox, color: [u8; 3], thickness: u32) {
    for t in 0..thickness {
        let left = bbox.left.saturating_add(t);
        let top = bbox.top.saturating_add(t);
        let right = bbox.right.saturating_sub(t);
        let bottom = bbox.bottom.saturating_sub(t);
        if right <= left || bottom <= top {
            break;
        }
        let rect = Rect::at(left as i32, top as i32).of_size(right - left, bottom - top);
        draw_hollow_rect_mut(image, rect, Rgb(color));
    }
}

/// Burns classification results into frames for the live display sink.
///
/// Text rendering needs a font file; when none is configured the overlay
/// degrades to box-only output and warns once.
pub struct Overlay {
    font: Option<FontVec>,
    warned: bool,
}

impl Overlay {
    /// Build an overlay renderer, loading the font when one is configured.
    pub fn new(font_path: Option<&Path>) -> Result<Self> {
        let font = match font_path {
            Some(path) => {
                let bytes = std::fs::read(path).map_err(Error::Io)?;
                Some(FontVec::try_from_vec(bytes).map_err(|_| Error::FontLoad {
                    path: path.to_path_buf(),
                })?)
            }
            None => None,
        };
        Ok(Self {
            font,
            warned: false,
        })
    }

    /// Render `label (confidence%)` onto the frame.
    pub fn draw_label(&mut self, image: &mut RgbImage, prediction: &Prediction) {
        let Some(ref font) = self.font else {
            if !self.warned {
                warn!("No overlay font configured, publishing frames without label text");
                self.warned = true;
            }
            return;
        };

        let text = format!(
            "{} ({:.1}%)",
            prediction.label,
            prediction.confidence * 100.0
        );
        draw_text_mut(
            image,
            Rgb(overlay::TEXT_COLOR),
            overlay::TEXT_X,
            overlay::TEXT_Y,
            PxScale::from(overlay::FONT_SIZE),
            font,
            &text,
        );
    }
}
