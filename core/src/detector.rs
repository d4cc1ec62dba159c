use crate::emotion::FaceDetection;
use crate::prelude::{CapturedImage, DetectorError, DetectorResult, EmotionDetector};
use std::fs;
use std::path::Path;

/// Detector that answers every image with the same canned faces.
///
/// Useful for demos and tests where no model service is running.
#[derive(Debug, Clone, Default)]
pub struct FixtureDetector {
    faces: Vec<FaceDetection>,
}

impl FixtureDetector {
    pub fn new(faces: Vec<FaceDetection>) -> Self {
        Self { faces }
    }

    /// Loads faces from a JSON file shaped like the model service response.
    pub fn load<P: AsRef<Path>>(path: P) -> DetectorResult<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref).map_err(|err| {
            DetectorError::Unavailable(format!("reading {}: {err}", path_ref.display()))
        })?;
        let faces = serde_json::from_str(&contents).map_err(|err| {
            DetectorError::InvalidResponse(format!("parsing {}: {err}", path_ref.display()))
        })?;
        Ok(Self { faces })
    }
}

impl EmotionDetector for FixtureDetector {
    fn name(&self) -> &str {
        "fixture"
    }

    fn detect(&self, _image: &CapturedImage) -> DetectorResult<Vec<FaceDetection>> {
        Ok(self.faces.clone())
    }
}
