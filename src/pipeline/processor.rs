//! Per-image analysis: classify, run the stub detectors, write results.

use crate::config::OutputFormat;
use crate::constants::output_extensions;
use crate::detect::{Detector, FireCheck};
use crate::error::{Error, Result};
use crate::image::decode_image;
use crate::inference::{AnalysisContext, Scorer};
use crate::output::{ImageRecord, output_path_for, writer_for};
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;

/// Options for the single-image path.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Result file formats to produce.
    pub formats: Vec<OutputFormat>,
    /// Whether to save the annotated image next to the input.
    pub save_annotated: bool,
}

/// Analyze one image file end to end and write its result files.
///
/// Decode failures (missing file, unsupported channel layout) are
/// per-request errors: the caller reports them and moves on to the next
/// input rather than aborting the batch.
pub fn process_image<S: Scorer, D: Detector, F: FireCheck>(
    input_path: &Path,
    ctx: &mut AnalysisContext<S>,
    detector: &D,
    fire: &F,
    opts: &ProcessOptions,
) -> Result<ImageRecord> {
    info!("Processing: {}", input_path.display());

    let image = decode_image(input_path)?;

    let prediction = ctx.analyze(&image)?;
    let fire_report = fire.assess(&image);
    let detection = detector.detect(&image)?;

    info!(
        "{}: {} ({:.1}%), fire: {} ({:.1}%), {} box(es)",
        input_path.display(),
        prediction.label,
        prediction.confidence * 100.0,
        fire_report.label,
        fire_report.confidence * 100.0,
        detection.boxes.len()
    );

    if opts.save_annotated {
        let annotated_path = annotated_path_for(input_path);
        detection
            .image
            .save(&annotated_path)
            .map_err(|e| Error::ImageSave {
                path: annotated_path.clone(),
                source: e,
            })?;
        info!("Annotated image saved to {}", annotated_path.display());
    }

    let record = ImageRecord {
        file: input_path.to_path_buf(),
        label: prediction.label,
        confidence: prediction.confidence,
        fire_label: fire_report.label,
        fire_confidence: fire_report.confidence,
        boxes: detection.boxes.len(),
        timestamp: Utc::now(),
    };

    for format in &opts.formats {
        let path = output_path_for(input_path, *format);
        writer_for(*format).write(&record, &path)?;
        info!("Results written to {}", path.display());
    }

    Ok(record)
}

fn annotated_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".into(), std::ffi::OsStr::to_os_string);
    let mut name = stem;
    name.push(output_extensions::ANNOTATED);
    input.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::config::Normalization;
    use crate::detect::{AlwaysClear, InsetDetector};
    use crate::image::PreprocessSpec;
    use crate::labels::ClassMap;
    use image::RgbImage;
    use ndarray::Array4;
    use std::collections::HashMap;

    struct FixedScorer(Vec<f32>);

    impl Scorer for FixedScorer {
        fn scores(&mut self, _input: &Array4<f32>) -> Result<Vec<f32>> {
            Ok(self.0.clone())
        }
    }

    fn test_context() -> AnalysisContext<FixedScorer> {
        let map = ClassMap::from_forward(HashMap::from([
            ("lion".to_string(), 0),
            ("tiger".to_string(), 1),
            ("elephant".to_string(), 2),
        ]))
        .unwrap();
        AnalysisContext::new(
            FixedScorer(vec![0.1, 0.7, 0.2]),
            map,
            PreprocessSpec::new(Normalization::Imagenet),
        )
    }

    #[test]
    fn test_process_image_writes_all_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("scene.png");
        RgbImage::new(300, 200).save(&input).unwrap();

        let mut ctx = test_context();
        let opts = ProcessOptions {
            formats: vec![OutputFormat::Json, OutputFormat::Csv],
            save_annotated: true,
        };

        let record = process_image(&input, &mut ctx, &InsetDetector::default(), &AlwaysClear, &opts)
            .unwrap();

        assert_eq!(record.label, "tiger");
        assert_eq!(record.confidence, 0.7);
        assert_eq!(record.fire_label, "no fire");
        assert_eq!(record.boxes, 1);
        assert!(dir.path().join("scene.wilda.json").exists());
        assert!(dir.path().join("scene.wilda.results.csv").exists());
        assert!(dir.path().join("scene.wilda.png").exists());
    }

    #[test]
    fn test_process_image_missing_input_is_per_request_error() {
        let mut ctx = test_context();
        let opts = ProcessOptions {
            formats: vec![],
            save_annotated: false,
        };

        let result = process_image(
            Path::new("/nonexistent/scene.png"),
            &mut ctx,
            &InsetDetector::default(),
            &AlwaysClear,
            &opts,
        );
        assert!(matches!(result, Err(Error::ImageOpen { .. })));
    }
}
