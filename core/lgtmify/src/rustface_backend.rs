use std::path::Path;

use crate::error::LgtmError;
use crate::face_detector::{FaceBounds, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The SeetaFace frontal model (`seeta_fd_frontal_v1.0.bin`) is not shipped
/// with the crate; load it from disk or from memory.
pub struct RustfaceDetector {
    model: rustface::Model,
    min_face_size: u32,
}

impl RustfaceDetector {
    /// Load a SeetaFace model from raw bytes.
    pub fn from_bytes(model_data: &[u8]) -> Result<Self, LgtmError> {
        let model = rustface::read_model(std::io::Cursor::new(model_data))
            .map_err(|e| LgtmError::DecodeError(format!("SeetaFace model: {e}")))?;
        Ok(Self {
            model,
            min_face_size: 20,
        })
    }

    /// Load a SeetaFace model file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LgtmError> {
        let data = std::fs::read(path.as_ref()).map_err(|e| {
            LgtmError::DecodeError(format!("{}: {e}", path.as_ref().display()))
        })?;
        Self::from_bytes(&data)
    }

    /// Smallest face, in pixels, the detector looks for (default: 20).
    pub fn min_face_size(mut self, size: u32) -> Self {
        self.min_face_size = size;
        self
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<FaceBounds> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.min_face_size);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x() as f64,
                    y: bbox.y() as f64,
                    width: bbox.width() as f64,
                    height: bbox.height() as f64,
                    confidence: face.score(),
                }
            })
            .collect()
    }
}
