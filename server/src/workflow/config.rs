use crate::detector::synthetic::SyntheticConfig;
use anyhow::Context;
use feeltune_core::history::RECENT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Which detector back-end answers capture requests.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DetectorConfig {
    /// Remote model service that accepts the image bytes and answers with faces.
    Http {
        endpoint: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
    /// Seeded random faces; only used when asked for explicitly.
    Synthetic(SyntheticConfig),
    /// Canned faces read from a JSON file.
    Fixture { path: PathBuf },
}

/// Model service address assumed when nothing else is configured.
pub const DEFAULT_DETECTOR_ENDPOINT: &str = "http://127.0.0.1:5000/detect";

impl Default for DetectorConfig {
    fn default() -> Self {
        DetectorConfig::Http {
            endpoint: DEFAULT_DETECTOR_ENDPOINT.to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub history_path: PathBuf,
    pub bind: SocketAddr,
    pub recent_limit: usize,
    pub detector: DetectorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("mood_history.csv"),
            bind: SocketAddr::from(([127, 0, 0, 1], 8501)),
            recent_limit: RECENT_LIMIT,
            detector: DetectorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading app config {}", path_ref.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing app config {}", path_ref.display()))?;
        Ok(config)
    }
}
