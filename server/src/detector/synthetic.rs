use feeltune_core::emotion::FaceDetection;
use feeltune_core::prelude::{CapturedImage, DetectorError, DetectorResult, EmotionDetector};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Label vocabulary of the facial expression model, in its output order.
const MODEL_LABELS: [&str; 7] = [
    "angry", "disgust", "fear", "happy", "sad", "surprise", "neutral",
];

/// Configuration for generating stand-in detector output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub seed: u64,
    pub max_faces: usize,
    /// Chance that a generated frame contains no face at all.
    pub empty_frame_rate: f64,
    /// Extra weight added to `neutral` before normalisation.
    pub neutral_bias: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_faces: 2,
            empty_frame_rate: 0.1,
            neutral_bias: 0.5,
        }
    }
}

impl SyntheticConfig {
    fn normalized_max_faces(&self) -> usize {
        self.max_faces.max(1)
    }
}

/// Seeded detector that invents plausible faces; successive calls differ.
pub struct SyntheticDetector {
    config: SyntheticConfig,
    rng: Mutex<StdRng>,
}

impl SyntheticDetector {
    pub fn new(config: SyntheticConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }
}

fn build_face(rng: &mut StdRng, config: &SyntheticConfig) -> FaceDetection {
    let mut weights: Vec<f64> = MODEL_LABELS
        .iter()
        .map(|label| {
            let base: f64 = rng.gen_range(0.0..1.0);
            let sharpened = base * base * base;
            if *label == "neutral" {
                sharpened + config.neutral_bias.max(0.0)
            } else {
                sharpened
            }
        })
        .collect();
    let total: f64 = weights.iter().sum::<f64>().max(f64::EPSILON);
    for weight in weights.iter_mut() {
        // the model reports two decimals
        *weight = (*weight / total * 100.0).round() / 100.0;
    }

    let mut face = FaceDetection::new(MODEL_LABELS.iter().copied().zip(weights));
    let x = rng.gen_range(0..480);
    let y = rng.gen_range(0..320);
    let size = rng.gen_range(64..160);
    face.bounding_box = Some([x, y, size, size]);
    face
}

impl EmotionDetector for SyntheticDetector {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn detect(&self, image: &CapturedImage) -> DetectorResult<Vec<FaceDetection>> {
        if image.is_empty() {
            return Err(DetectorError::InvalidResponse("empty image".into()));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| DetectorError::Internal("synthetic rng poisoned".into()))?;

        if rng.gen_bool(self.config.empty_frame_rate.clamp(0.0, 1.0)) {
            return Ok(Vec::new());
        }
        let count = rng.gen_range(1..=self.config.normalized_max_faces());
        Ok((0..count)
            .map(|_| build_face(&mut rng, &self.config))
            .collect())
    }
}
