use crate::emotion::Emotion;
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in the history file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the mood history log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(with = "second_precision")]
    pub timestamp: NaiveDateTime,
    pub emotion: Emotion,
    pub score: f64,
}

impl HistoryEntry {
    /// Builds an entry, truncating the timestamp to whole seconds.
    pub fn new(timestamp: NaiveDateTime, emotion: Emotion, score: f64) -> Self {
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            emotion,
            score,
        }
    }
}

mod second_precision {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
