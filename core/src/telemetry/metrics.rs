use crate::session::{CycleOutcome, CycleReport};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Counters for capture cycles served by this process.
pub struct CycleMetrics {
    inner: Mutex<MetricsSnapshot>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub cycles: usize,
    pub detections: usize,
    pub no_face: usize,
    pub no_emotion: usize,
    pub detector_errors: usize,
    pub history_errors: usize,
}

impl CycleMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    pub fn record(&self, report: &CycleReport) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.cycles += 1;
            match report.outcome {
                CycleOutcome::Detected(_) => metrics.detections += 1,
                CycleOutcome::NoFace => metrics.no_face += 1,
                CycleOutcome::NoSignificantEmotion => metrics.no_emotion += 1,
            }
            if report.detector_error.is_some() {
                metrics.detector_errors += 1;
            }
            if report.history_error.is_some() {
                metrics.history_errors += 1;
            }
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for CycleMetrics {
    fn default() -> Self {
        Self::new()
    }
}
