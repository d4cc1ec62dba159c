pub mod tables;
pub mod video;

pub use tables::{mood_message, music_url, style_class};
pub use video::{extract_video_id, Playback};

use crate::emotion::{Emotion, EmotionScore};
use serde::{Deserialize, Serialize};

/// Everything the page needs to present a detected mood.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodResult {
    pub emotion: Emotion,
    pub display_name: String,
    pub score: f64,
    pub headline: String,
    pub message: String,
    pub style_class: String,
    pub breakdown: Vec<EmotionScore>,
    pub playback: Option<Playback>,
}

impl MoodResult {
    pub fn new(top: EmotionScore, breakdown: Vec<EmotionScore>) -> Self {
        let display_name = top.emotion.display_name();
        let headline = format!(
            "Detected emotion: {} (confidence: {:.2})",
            display_name, top.score
        );
        Self {
            message: mood_message(&top.emotion).to_string(),
            style_class: style_class(&top.emotion),
            playback: music_url(&top.emotion).map(Playback::from_url),
            display_name,
            headline,
            emotion: top.emotion,
            score: top.score,
            breakdown,
        }
    }
}
