pub mod entry;
pub mod store;

pub use entry::{HistoryEntry, TIMESTAMP_FORMAT};
pub use store::{EmotionCount, HistoryLog, HistorySummary, RECENT_LIMIT};
