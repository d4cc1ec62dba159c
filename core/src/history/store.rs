use super::entry::HistoryEntry;
use crate::emotion::Emotion;
use crate::prelude::{HistoryError, HistoryResult};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Number of rows shown in the recent-history view.
pub const RECENT_LIMIT: usize = 10;

/// CSV-backed mood history.
///
/// The file is the only source of truth: every read goes back to disk.
/// Appends rewrite the whole table, serialized within this process by an
/// internal lock. Writers in other processes are not coordinated with and
/// can still lose rows.
#[derive(Debug)]
pub struct HistoryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionCount {
    pub emotion: Emotion,
    pub count: usize,
}

/// Read-side view of the log used by the history panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    pub total: usize,
    pub recent: Vec<HistoryEntry>,
    pub counts: Vec<EmotionCount>,
}

impl HistorySummary {
    pub fn from_entries(entries: &[HistoryEntry], limit: usize) -> Self {
        let start = entries.len().saturating_sub(limit);
        Self {
            total: entries.len(),
            recent: entries[start..].to_vec(),
            counts: count_by_emotion(entries),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Counts per emotion, largest first; equal counts keep first-seen order.
fn count_by_emotion(entries: &[HistoryEntry]) -> Vec<EmotionCount> {
    let mut counts: Vec<EmotionCount> = Vec::new();
    for entry in entries {
        match counts.iter_mut().find(|c| c.emotion == entry.emotion) {
            Some(existing) => existing.count += 1,
            None => counts.push(EmotionCount {
                emotion: entry.emotion.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

impl HistoryLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Reads every entry in file order. A missing file is an empty log.
    pub fn read_all(&self) -> HistoryResult<Vec<HistoryEntry>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let entries = reader
            .deserialize::<HistoryEntry>()
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    /// Appends one entry by rewriting the whole table.
    ///
    /// Returns the new length of the log.
    pub fn append(&self, entry: HistoryEntry) -> HistoryResult<usize> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| HistoryError::LockPoisoned)?;

        let mut entries = self.read_all()?;
        entries.push(entry);
        self.write_all(&entries)?;
        debug!(
            "history {} now holds {} entries",
            self.path.display(),
            entries.len()
        );
        Ok(entries.len())
    }

    pub fn summary(&self, limit: usize) -> HistoryResult<HistorySummary> {
        let entries = self.read_all()?;
        Ok(HistorySummary::from_entries(&entries, limit))
    }

    fn write_all(&self, entries: &[HistoryEntry]) -> HistoryResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let staged = NamedTempFile::new_in(&dir)?;
        // the staged file starts private; keep whatever mode the log already had
        if let Ok(existing) = fs::metadata(&self.path) {
            staged.as_file().set_permissions(existing.permissions())?;
        }
        {
            let mut writer = csv::Writer::from_writer(staged.as_file());
            for entry in entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
        staged
            .persist(&self.path)
            .map_err(|err| HistoryError::Io(err.error))?;
        Ok(())
    }
}
