use crate::emotion::FaceDetection;

/// A single still frame handed to the detector, still in its encoded form.
#[derive(Debug, Clone, Default)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl CapturedImage {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Failure raised by a detector back-end.
#[derive(thiserror::Error, Debug)]
pub enum DetectorError {
    #[error("detector unavailable: {0}")]
    Unavailable(String),
    #[error("invalid detector response: {0}")]
    InvalidResponse(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type DetectorResult<T> = Result<T, DetectorError>;

/// Failure while reading or rewriting the history log.
#[derive(thiserror::Error, Debug)]
pub enum HistoryError {
    #[error("history i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed history file: {0}")]
    Csv(#[from] csv::Error),
    #[error("history lock poisoned")]
    LockPoisoned,
}

pub type HistoryResult<T> = Result<T, HistoryError>;

/// Facial emotion detector boundary.
///
/// Implementations return one entry per face found in the image, each with a
/// label-to-confidence map. An empty vector means no face was found.
pub trait EmotionDetector: Send + Sync {
    fn name(&self) -> &str;
    fn detect(&self, image: &CapturedImage) -> DetectorResult<Vec<FaceDetection>>;
}
