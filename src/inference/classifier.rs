//! ONNX Runtime classifier backend.

use crate::config::{InferenceDevice, ModelConfig};
use crate::constants::input;
use crate::error::{Error, Result};
use crate::inference::{Scorer, softmax};
use ndarray::Array4;
use ort::execution_providers::CUDAExecutionProvider;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;
use std::path::Path;
use tracing::{debug, info, warn};

/// Classifier backed by an ONNX Runtime session.
///
/// The session is loaded once and treated as exclusively owned; concurrent
/// forward passes are not assumed safe, so [`Scorer::scores`] takes
/// `&mut self` and the caller serializes access.
pub struct OnnxClassifier {
    session: Session,
    input_name: String,
    output_name: String,
    apply_softmax: bool,
}

impl OnnxClassifier {
    /// Load the model artifact and build the inference session.
    pub fn load(model_config: &ModelConfig, device: InferenceDevice, intra_threads: usize) -> Result<Self> {
        Self::load_from_path(
            &model_config.path,
            device,
            intra_threads,
            model_config.logits,
        )
    }

    /// Build a session from an explicit model path.
    pub fn load_from_path(
        path: &Path,
        device: InferenceDevice,
        intra_threads: usize,
        logits: bool,
    ) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ModelFileNotFound {
                path: path.to_path_buf(),
            });
        }

        let mut builder = Session::builder().map_err(|e| Error::SessionBuild {
            reason: e.to_string(),
        })?;

        match device {
            InferenceDevice::Cpu => {
                info!("Requested device: CPU");
            }
            InferenceDevice::Auto => {
                debug!("Auto mode: registering CUDA provider with silent CPU fallback");
                builder = builder
                    .with_execution_providers([CUDAExecutionProvider::default().build()])
                    .map_err(|e| Error::SessionBuild {
                        reason: e.to_string(),
                    })?;
            }
            InferenceDevice::Gpu => {
                warn!("--gpu requested: registering CUDA provider (falls back to CPU if unavailable)");
                builder = builder
                    .with_execution_providers([CUDAExecutionProvider::default().build()])
                    .map_err(|e| Error::SessionBuild {
                        reason: e.to_string(),
                    })?;
            }
        }

        let session = builder
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::SessionBuild {
                reason: e.to_string(),
            })?
            .with_intra_threads(intra_threads)
            .map_err(|e| Error::SessionBuild {
                reason: e.to_string(),
            })?
            .commit_from_file(path)
            .map_err(|e| Error::SessionBuild {
                reason: e.to_string(),
            })?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .ok_or_else(|| Error::SessionBuild {
                reason: "model has no inputs".to_string(),
            })?;
        let output_name = session
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .ok_or_else(|| Error::SessionBuild {
                reason: "model has no outputs".to_string(),
            })?;

        info!(
            "Loaded model: {} (input: {}, output: {}, softmax: {})",
            path.display(),
            input_name,
            output_name,
            logits
        );

        Ok(Self {
            session,
            input_name,
            output_name,
            apply_softmax: logits,
        })
    }
}

impl Scorer for OnnxClassifier {
    fn scores(&mut self, tensor: &Array4<f32>) -> Result<Vec<f32>> {
        let expected = [
            1,
            input::HEIGHT as usize,
            input::WIDTH as usize,
            input::CHANNELS,
        ];
        // Contract violation, not a data error: the preprocessor is the only
        // producer of this tensor and always emits the fixed shape.
        if tensor.shape() != expected {
            return Err(Error::Inference {
                reason: format!(
                    "input tensor has shape {:?}, expected {expected:?}",
                    tensor.shape()
                ),
            });
        }

        let dims: Vec<i64> = tensor.shape().iter().map(|&d| d as i64).collect();
        let data = tensor.as_slice().ok_or_else(|| Error::Inference {
            reason: "input tensor is not contiguous in memory".to_string(),
        })?;

        let input_tensor =
            TensorRef::from_array_view((dims, data)).map_err(|e| Error::Inference {
                reason: format!("failed to convert input tensor: {e}"),
            })?;

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input_tensor])
            .map_err(|e| Error::Inference {
                reason: e.to_string(),
            })?;

        let (_shape, scores) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::Inference {
                reason: format!("failed to extract output tensor: {e}"),
            })?;

        if self.apply_softmax {
            Ok(softmax(scores))
        } else {
            Ok(scores.to_vec())
        }
    }
}
