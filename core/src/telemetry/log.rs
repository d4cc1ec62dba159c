use crate::session::{CycleOutcome, CycleReport};
use log::{info, warn};

/// Emits the one-line summary for a finished capture cycle.
pub fn log_cycle(report: &CycleReport) {
    match &report.outcome {
        CycleOutcome::Detected(mood) => info!(
            "cycle -> {} ({:.2}), history len {:?}",
            mood.emotion, mood.score, report.history_len
        ),
        CycleOutcome::NoFace => info!("cycle -> no face"),
        CycleOutcome::NoSignificantEmotion => info!("cycle -> no significant emotion"),
    }
    if let Some(err) = &report.history_error {
        warn!("cycle history error: {}", err);
    }
}
