pub mod http;
pub mod synthetic;

use crate::workflow::config::DetectorConfig;
use anyhow::Context;
use feeltune_core::detector::FixtureDetector;
use feeltune_core::EmotionDetector;
use http::HttpDetector;
use std::sync::Arc;
use std::time::Duration;
use synthetic::SyntheticDetector;

/// Builds the long-lived detector handle selected by the config.
pub fn build_detector(config: &DetectorConfig) -> anyhow::Result<Arc<dyn EmotionDetector>> {
    let detector: Arc<dyn EmotionDetector> = match config {
        DetectorConfig::Http {
            endpoint,
            timeout_secs,
        } => Arc::new(HttpDetector::new(
            endpoint.clone(),
            timeout_secs.map(Duration::from_secs),
        )),
        DetectorConfig::Synthetic(settings) => Arc::new(SyntheticDetector::new(settings.clone())),
        DetectorConfig::Fixture { path } => Arc::new(
            FixtureDetector::load(path)
                .with_context(|| format!("loading detector fixture {}", path.display()))?,
        ),
    };
    Ok(detector)
}
