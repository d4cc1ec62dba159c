use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw detector label that never takes part in selection.
pub const NEUTRAL: &str = "neutral";

/// Emotion categories the mood tables know about.
///
/// Labels outside the closed set are carried as [`Emotion::Other`] so that a
/// detector with a wider vocabulary degrades to the empty-message fallback
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Emotion {
    Happy,
    Sad,
    Angry,
    Surprise,
    Fear,
    Disgust,
    Other(String),
}

impl Emotion {
    pub const KNOWN: [Emotion; 6] = [
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Angry,
        Emotion::Surprise,
        Emotion::Fear,
        Emotion::Disgust,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Angry => "angry",
            Emotion::Surprise => "surprise",
            Emotion::Fear => "fear",
            Emotion::Disgust => "disgust",
            Emotion::Other(label) => label,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Emotion::Other(_))
    }

    /// Label with its first letter upper-cased and the rest lower-cased.
    pub fn display_name(&self) -> String {
        let mut chars = self.as_str().chars();
        match chars.next() {
            Some(first) => first
                .to_uppercase()
                .chain(chars.flat_map(char::to_lowercase))
                .collect(),
            None => String::new(),
        }
    }
}

impl From<&str> for Emotion {
    fn from(label: &str) -> Self {
        match label {
            "happy" => Emotion::Happy,
            "sad" => Emotion::Sad,
            "angry" => Emotion::Angry,
            "surprise" => Emotion::Surprise,
            "fear" => Emotion::Fear,
            "disgust" => Emotion::Disgust,
            other => Emotion::Other(other.to_string()),
        }
    }
}

impl From<String> for Emotion {
    fn from(label: String) -> Self {
        Emotion::from(label.as_str())
    }
}

impl From<Emotion> for String {
    fn from(emotion: Emotion) -> Self {
        match emotion {
            Emotion::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for Emotion {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Emotion::from(s))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
