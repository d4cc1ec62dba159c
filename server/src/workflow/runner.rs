use crate::detector::build_detector;
use crate::workflow::config::AppConfig;
use chrono::Local;
use feeltune_core::history::{HistoryLog, HistorySummary};
use feeltune_core::prelude::{CapturedImage, EmotionDetector, HistoryResult};
use feeltune_core::session::{CycleReport, MoodSession};
use feeltune_core::telemetry::{log_cycle, CycleMetrics, MetricsSnapshot};
use std::sync::Arc;

/// Drives capture cycles for the web bridge and the offline CLI path.
#[derive(Clone)]
pub struct Runner {
    session: Arc<MoodSession>,
    metrics: Arc<CycleMetrics>,
    recent_limit: usize,
}

impl Runner {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let detector = build_detector(&config.detector)?;
        Ok(Self::with_detector(config, detector))
    }

    pub fn with_detector(config: &AppConfig, detector: Arc<dyn EmotionDetector>) -> Self {
        let history = Arc::new(HistoryLog::new(config.history_path.clone()));
        Self {
            session: Arc::new(MoodSession::new(detector, history)),
            metrics: Arc::new(CycleMetrics::new()),
            recent_limit: config.recent_limit,
        }
    }

    pub fn detector_name(&self) -> &str {
        self.session.detector_name()
    }

    /// Runs one blocking capture cycle stamped with the local wall clock.
    pub fn execute(&self, image: &CapturedImage) -> CycleReport {
        let report = self.session.run_cycle(image, Local::now().naive_local());
        log_cycle(&report);
        self.metrics.record(&report);
        report
    }

    pub fn history(&self) -> HistoryResult<HistorySummary> {
        self.session.history_summary(self.recent_limit)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
