use feeltune_core::history::{EmotionCount, HistoryEntry, HistorySummary};
use serde::{Deserialize, Serialize};

/// Payload behind the history table and bar chart.
///
/// A log that cannot be read is shown as empty with `unavailable` set, so
/// the panel never blocks the rest of the page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryPanel {
    pub total: usize,
    pub recent: Vec<HistoryEntry>,
    pub counts: Vec<EmotionCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable: Option<String>,
}

impl HistoryPanel {
    pub fn unavailable(reason: String) -> Self {
        Self {
            unavailable: Some(reason),
            ..Default::default()
        }
    }
}

impl From<HistorySummary> for HistoryPanel {
    fn from(summary: HistorySummary) -> Self {
        Self {
            total: summary.total,
            recent: summary.recent,
            counts: summary.counts,
            unavailable: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
