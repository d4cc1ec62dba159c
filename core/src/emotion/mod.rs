pub mod label;
pub mod selection;

pub use label::{Emotion, NEUTRAL};
pub use selection::{select_emotion, EmotionScore, FaceDetection, Selection};
