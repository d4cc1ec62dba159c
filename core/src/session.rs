use crate::emotion::{select_emotion, Selection};
use crate::history::{HistoryEntry, HistoryLog, HistorySummary};
use crate::mood::MoodResult;
use crate::prelude::{CapturedImage, EmotionDetector, HistoryResult};
use chrono::NaiveDateTime;
use log::warn;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a capture cycle concluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CycleOutcome {
    Detected(MoodResult),
    NoFace,
    NoSignificantEmotion,
}

impl CycleOutcome {
    pub fn notice(&self) -> &'static str {
        match self {
            CycleOutcome::Detected(_) => "Mood detected.",
            CycleOutcome::NoFace => "No face detected. Ensure proper lighting and position.",
            CycleOutcome::NoSignificantEmotion => "No significant emotion detected.",
        }
    }
}

/// Outcome of one capture cycle plus the failures recovered along the way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub outcome: CycleOutcome,
    pub notice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detector_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_error: Option<String>,
    #[serde(default)]
    pub history_len: Option<usize>,
}

impl CycleReport {
    pub fn mood(&self) -> Option<&MoodResult> {
        match &self.outcome {
            CycleOutcome::Detected(result) => Some(result),
            _ => None,
        }
    }
}

/// Detector handle and history log for one running instance.
pub struct MoodSession {
    detector: Arc<dyn EmotionDetector>,
    history: Arc<HistoryLog>,
}

impl MoodSession {
    pub fn new(detector: Arc<dyn EmotionDetector>, history: Arc<HistoryLog>) -> Self {
        Self { detector, history }
    }

    pub fn detector_name(&self) -> &str {
        self.detector.name()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Runs detect, select, map and record for one captured frame.
    ///
    /// Detector failures are reported and treated as "no face". A history
    /// failure is reported but never hides the computed mood.
    pub fn run_cycle(&self, image: &CapturedImage, captured_at: NaiveDateTime) -> CycleReport {
        let (faces, detector_error) = match self.detector.detect(image) {
            Ok(faces) => (faces, None),
            Err(err) => {
                warn!("detector {} failed: {err}", self.detector.name());
                (Vec::new(), Some(format!("Error detecting emotions: {err}")))
            }
        };

        let outcome = match select_emotion(&faces) {
            Selection::NoFace => CycleOutcome::NoFace,
            Selection::NoSignificantEmotion => CycleOutcome::NoSignificantEmotion,
            Selection::Detected { top, breakdown } => {
                CycleOutcome::Detected(MoodResult::new(top, breakdown))
            }
        };

        let (history_len, history_error) = match &outcome {
            CycleOutcome::Detected(result) => {
                let entry = HistoryEntry::new(captured_at, result.emotion.clone(), result.score);
                match self.history.append(entry) {
                    Ok(len) => (Some(len), None),
                    Err(err) => (None, Some(format!("Could not save mood history: {err}"))),
                }
            }
            _ => (None, None),
        };

        CycleReport {
            notice: outcome.notice().to_string(),
            outcome,
            detector_error,
            history_error,
            history_len,
        }
    }

    pub fn history_summary(&self, limit: usize) -> HistoryResult<HistorySummary> {
        self.history.summary(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::FixtureDetector;
    use crate::emotion::{Emotion, FaceDetection};
    use crate::prelude::{DetectorError, DetectorResult};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::tempdir;

    struct FailingDetector;

    impl EmotionDetector for FailingDetector {
        fn name(&self) -> &str {
            "failing"
        }

        fn detect(&self, _image: &CapturedImage) -> DetectorResult<Vec<FaceDetection>> {
            Err(DetectorError::Internal("model exploded".into()))
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 2)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap()
    }

    fn session_with(detector: Arc<dyn EmotionDetector>, history: &Arc<HistoryLog>) -> MoodSession {
        MoodSession::new(detector, history.clone())
    }

    #[test]
    fn detected_mood_is_recorded() {
        let dir = tempdir().unwrap();
        let history = Arc::new(HistoryLog::new(dir.path().join("h.csv")));
        let detector = FixtureDetector::new(vec![FaceDetection::new([
            ("angry", 0.05),
            ("happy", 0.8),
            ("neutral", 0.15),
        ])]);
        let session = session_with(Arc::new(detector), &history);

        let report = session.run_cycle(&CapturedImage::default(), now());
        let mood = report.mood().expect("mood detected");
        assert_eq!(mood.emotion, Emotion::Happy);
        assert_eq!(report.history_len, Some(1));
        assert!(report.history_error.is_none());

        let entries = history.read_all().unwrap();
        assert_eq!(entries, vec![HistoryEntry::new(now(), Emotion::Happy, 0.8)]);
    }

    #[test]
    fn no_face_skips_history() {
        let dir = tempdir().unwrap();
        let history = Arc::new(HistoryLog::new(dir.path().join("h.csv")));
        let session = session_with(Arc::new(FixtureDetector::default()), &history);

        let report = session.run_cycle(&CapturedImage::default(), now());
        assert_eq!(report.outcome, CycleOutcome::NoFace);
        assert!(!history.exists());
    }

    #[test]
    fn neutral_only_skips_history() {
        let dir = tempdir().unwrap();
        let history = Arc::new(HistoryLog::new(dir.path().join("h.csv")));
        let detector = FixtureDetector::new(vec![FaceDetection::new([("neutral", 0.9)])]);
        let session = session_with(Arc::new(detector), &history);

        let report = session.run_cycle(&CapturedImage::default(), now());
        assert_eq!(report.outcome, CycleOutcome::NoSignificantEmotion);
        assert!(!history.exists());
    }

    #[test]
    fn detector_failure_routes_to_no_face() {
        let dir = tempdir().unwrap();
        let history = Arc::new(HistoryLog::new(dir.path().join("h.csv")));
        let session = session_with(Arc::new(FailingDetector), &history);

        let report = session.run_cycle(&CapturedImage::default(), now());
        assert_eq!(report.outcome, CycleOutcome::NoFace);
        assert!(report
            .detector_error
            .as_deref()
            .unwrap()
            .contains("model exploded"));
        assert!(!history.exists());
    }

    #[test]
    fn history_failure_still_returns_mood() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("h.csv");
        fs::write(&path, "not,a,history\n1,2\n").unwrap();
        let history = Arc::new(HistoryLog::new(&path));
        let detector = FixtureDetector::new(vec![FaceDetection::new([("sad", 0.6)])]);
        let session = session_with(Arc::new(detector), &history);

        let report = session.run_cycle(&CapturedImage::default(), now());
        assert_eq!(report.mood().unwrap().emotion, Emotion::Sad);
        assert!(report.history_error.is_some());
        assert_eq!(report.history_len, None);
    }

    #[test]
    fn report_serializes_with_status_tag() {
        let report = CycleReport {
            outcome: CycleOutcome::NoFace,
            notice: CycleOutcome::NoFace.notice().into(),
            detector_error: None,
            history_error: None,
            history_len: None,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["status"], "no_face");
    }
}
