//! Shared analysis context: model, class map and preprocessing parameters.

use crate::error::Result;
use crate::image::{PreprocessSpec, preprocess};
use crate::inference::{Prediction, Scorer, decode_top};
use crate::labels::ClassMap;
use image::RgbImage;

/// Everything a classification request needs, constructed once at startup
/// and passed to each caller explicitly (no ambient global state).
///
/// The class map and preprocessing spec are immutable after construction;
/// the scorer is held exclusively, so the context is the single owner that
/// serializes forward passes.
pub struct AnalysisContext<S> {
    scorer: S,
    class_map: ClassMap,
    spec: PreprocessSpec,
}

impl<S: Scorer> AnalysisContext<S> {
    /// Assemble a context from its parts.
    pub fn new(scorer: S, class_map: ClassMap, spec: PreprocessSpec) -> Self {
        Self {
            scorer,
            class_map,
            spec,
        }
    }

    /// Classify one RGB image: preprocess, forward pass, arg-max decode.
    pub fn analyze(&mut self, image: &RgbImage) -> Result<Prediction> {
        let tensor = preprocess(image, &self.spec);
        let scores = self.scorer.scores(&tensor)?;
        decode_top(&scores, &self.class_map)
    }

    /// The loaded class map.
    pub fn class_map(&self) -> &ClassMap {
        &self.class_map
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::Normalization;
    use crate::error::Error;
    use ndarray::Array4;
    use std::collections::HashMap;

    /// Scorer returning a fixed vector, recording how often it ran.
    struct FixedScorer {
        scores: Vec<f32>,
        calls: usize,
    }

    impl Scorer for FixedScorer {
        fn scores(&mut self, input: &Array4<f32>) -> Result<Vec<f32>> {
            assert_eq!(input.shape(), &[1, 224, 224, 3]);
            self.calls += 1;
            Ok(self.scores.clone())
        }
    }

    fn context(scores: Vec<f32>) -> AnalysisContext<FixedScorer> {
        let class_map = ClassMap::from_forward(HashMap::from([
            ("lion".to_string(), 0),
            ("tiger".to_string(), 1),
            ("elephant".to_string(), 2),
        ]))
        .unwrap();
        AnalysisContext::new(
            FixedScorer { scores, calls: 0 },
            class_map,
            PreprocessSpec::new(Normalization::Imagenet),
        )
    }

    #[test]
    fn test_analyze_end_to_end_with_stub_scorer() {
        let mut ctx = context(vec![0.1, 0.7, 0.2]);
        let img = RgbImage::new(100, 100);
        let prediction = ctx.analyze(&img).unwrap();
        assert_eq!(prediction.label, "tiger");
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(ctx.scorer.calls, 1);
    }

    #[test]
    fn test_analyze_is_deterministic() {
        let mut ctx = context(vec![0.3, 0.3, 0.4]);
        let img = RgbImage::from_pixel(50, 80, image::Rgb([120, 60, 200]));
        let a = ctx.analyze(&img).unwrap();
        let b = ctx.analyze(&img).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_analyze_surfaces_score_mismatch() {
        let mut ctx = context(vec![0.5, 0.5]);
        let img = RgbImage::new(10, 10);
        let result = ctx.analyze(&img);
        assert!(matches!(result, Err(Error::ScoreCountMismatch { .. })));
    }
}
