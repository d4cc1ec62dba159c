use feeltune_core::emotion::FaceDetection;
use feeltune_core::prelude::{CapturedImage, DetectorError, DetectorResult, EmotionDetector};
use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Client for an external facial-expression model service.
///
/// The service receives the encoded frame as the request body and answers
/// with a JSON array of `{ "box": [...], "emotions": { label: score } }`.
/// Calls block until the service answers unless a timeout is configured.
pub struct HttpDetector {
    endpoint: String,
    timeout: Option<Duration>,
}

impl HttpDetector {
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Self {
        Self { endpoint, timeout }
    }

    // Built per call so the blocking client never lives on an async runtime thread.
    fn client(&self) -> DetectorResult<Client> {
        let mut builder = Client::builder();
        builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder.timeout(None::<Duration>),
        };
        builder
            .build()
            .map_err(|err| DetectorError::Internal(err.to_string()))
    }
}

impl EmotionDetector for HttpDetector {
    fn name(&self) -> &str {
        "http"
    }

    fn detect(&self, image: &CapturedImage) -> DetectorResult<Vec<FaceDetection>> {
        let content_type = image
            .content_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".into());
        let response = self
            .client()?
            .post(&self.endpoint)
            .header(CONTENT_TYPE, content_type)
            .body(image.bytes.clone())
            .send()
            .map_err(|err| DetectorError::Unavailable(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().unwrap_or_default();
            return Err(DetectorError::Unavailable(format!("{}: {}", status, text)));
        }

        let faces: Vec<FaceDetection> = response
            .json()
            .map_err(|err| DetectorError::InvalidResponse(err.to_string()))?;
        debug!("{} returned {} face(s)", self.endpoint, faces.len());
        Ok(faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::thread;
    use tokio::runtime::Builder;
    use warp::{http::StatusCode, Filter};

    fn spawn_model_service() -> SocketAddr {
        let (tx, rx) = std::sync::mpsc::channel();
        thread::spawn(move || {
            let runtime = Builder::new_current_thread().enable_all().build().unwrap();
            runtime.block_on(async move {
                let detect = warp::path("detect")
                    .and(warp::post())
                    .and(warp::header::<String>("content-type"))
                    .and(warp::body::bytes())
                    .map(|content_type: String, body: warp::hyper::body::Bytes| {
                        assert_eq!(content_type, "image/png");
                        if body.is_empty() {
                            warp::reply::with_status(
                                warp::reply::json(&"no image"),
                                StatusCode::BAD_REQUEST,
                            )
                        } else {
                            warp::reply::with_status(
                                warp::reply::json(&serde_json::json!([
                                    {"box": [1, 2, 3, 4], "emotions": {"sad": 0.6, "neutral": 0.4}}
                                ])),
                                StatusCode::OK,
                            )
                        }
                    });
                let garbage = warp::path("garbage").map(|| "<html>");
                let (addr, server) = warp::serve(detect.or(garbage))
                    .bind_ephemeral(([127, 0, 0, 1], 0));
                tx.send(addr).unwrap();
                server.await;
            });
        });
        rx.recv().unwrap()
    }

    #[test]
    fn posts_image_and_parses_faces() {
        let addr = spawn_model_service();
        let detector = HttpDetector::new(format!("http://{addr}/detect"), None);
        let image = CapturedImage::new(vec![137, 80, 78, 71], Some("image/png".into()));
        let faces = detector.detect(&image).unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].bounding_box, Some([1, 2, 3, 4]));
        assert_eq!(faces[0].emotions["sad"], 0.6);
    }

    #[test]
    fn error_status_is_unavailable() {
        let addr = spawn_model_service();
        let detector = HttpDetector::new(format!("http://{addr}/detect"), None);
        let image = CapturedImage::new(Vec::new(), Some("image/png".into()));
        let err = detector.detect(&image).unwrap_err();
        assert!(matches!(err, DetectorError::Unavailable(_)));
    }

    #[test]
    fn unparsable_body_is_invalid_response() {
        let addr = spawn_model_service();
        let detector = HttpDetector::new(format!("http://{addr}/garbage"), None);
        let image = CapturedImage::new(vec![1], Some("image/png".into()));
        let err = detector.detect(&image).unwrap_err();
        assert!(matches!(err, DetectorError::InvalidResponse(_)));
    }

    #[test]
    fn unreachable_service_is_unavailable() {
        let detector = HttpDetector::new(
            "http://127.0.0.1:9/detect".into(),
            Some(Duration::from_secs(2)),
        );
        let image = CapturedImage::new(vec![1], None);
        let err = detector.detect(&image).unwrap_err();
        assert!(matches!(err, DetectorError::Unavailable(_)));
    }
}
