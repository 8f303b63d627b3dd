//! Classification: forward pass, score decoding, and the analysis context.

mod classifier;
mod context;

pub use classifier::OnnxClassifier;
pub use context::AnalysisContext;

use crate::error::{Error, Result};
use crate::labels::ClassMap;
use ndarray::Array4;

/// A decoded classification result: one label/confidence pair per call.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Decoded class name, lowercased (see [`decode_top`]).
    pub label: String,
    /// Softmax probability mass at the arg-max index, in `[0, 1]`.
    pub confidence: f32,
}

/// Seam between preprocessing and a concrete model backend.
///
/// The session underneath is not assumed safe for concurrent forward
/// passes; callers hold the scorer exclusively and `scores` takes
/// `&mut self` to make that ownership discipline explicit.
pub trait Scorer {
    /// Run the model forward once on a batch-of-one input tensor and return
    /// the probability vector over classes.
    fn scores(&mut self, input: &Array4<f32>) -> Result<Vec<f32>>;
}

/// Arg-max decode of a probability vector against the class map.
///
/// The label is lowercased here, at the decode boundary: a downstream
/// consumer keys on lowercase names, and keeping the transformation in one
/// documented place beats burying it in the classifier.
pub fn decode_top(scores: &[f32], class_map: &ClassMap) -> Result<Prediction> {
    if scores.len() != class_map.len() {
        return Err(Error::ScoreCountMismatch {
            scores: scores.len(),
            classes: class_map.len(),
        });
    }

    let (index, &confidence) = scores
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .ok_or_else(|| Error::Internal {
            message: "empty score vector".to_string(),
        })?;

    let label = class_map
        .name_of(index)
        .ok_or_else(|| Error::Internal {
            message: format!("arg-max index {index} missing from class map"),
        })?
        .to_lowercase();

    Ok(Prediction { label, confidence })
}

/// Numerically stable softmax.
///
/// Used when the exported model emits logits instead of probabilities.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / sum).collect()
}
