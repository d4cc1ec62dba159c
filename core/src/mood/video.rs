use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static VIDEO_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:v=|youtu\.be/)([A-Za-z0-9_-]{11})").unwrap());

const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Returns the 11-character video id from a watch URL or a short link.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str())
}

/// How the page should offer the music for a mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Playback {
    Embedded { video_id: String, embed_url: String },
    Link { url: String },
}

impl Playback {
    pub fn from_url(url: &str) -> Self {
        match extract_video_id(url) {
            Some(video_id) => Playback::Embedded {
                embed_url: format!("{EMBED_BASE}{video_id}?autoplay=1&mute=0"),
                video_id: video_id.to_string(),
            },
            None => Playback::Link {
                url: url.to_string(),
            },
        }
    }
}
