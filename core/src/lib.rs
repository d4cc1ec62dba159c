//! Core decision logic for the FeelTune mood player.
//!
//! The detector itself is an external capability reached through
//! [`EmotionDetector`]; this crate selects the dominant emotion from its
//! output, maps it to presentation data, and keeps the mood history log.

pub mod detector;
pub mod emotion;
pub mod history;
pub mod mood;
pub mod prelude;
pub mod session;
pub mod telemetry;

pub use prelude::{CapturedImage, DetectorError, EmotionDetector, HistoryError};
pub use session::{CycleOutcome, CycleReport, MoodSession};
