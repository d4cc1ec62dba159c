use crate::web::model::{ErrorBody, HistoryPanel};
use crate::web::page::INDEX_HTML;
use crate::workflow::runner::Runner;
use anyhow::Context;
use feeltune_core::prelude::CapturedImage;
use log::{error, info, warn};
use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{mpsc, Arc},
    thread,
};
use tokio::runtime::Builder;
use warp::{http::StatusCode, hyper::body::Bytes, Filter, Rejection, Reply};

/// Largest accepted camera frame.
const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Debug)]
struct EmptyCapture;

impl warp::reject::Reject for EmptyCapture {}

#[derive(Debug)]
struct WorkerFailed(String);

impl warp::reject::Reject for WorkerFailed {}

/// All HTTP routes served for the page.
pub fn routes(
    runner: Arc<Runner>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let runner_filter = warp::any().map(move || runner.clone());

    let index_route = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(INDEX_HTML));

    let capture_route = warp::path("capture")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_IMAGE_BYTES))
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::body::bytes())
        .and(runner_filter.clone())
        .and_then(handle_capture);

    let history_route = warp::path("history")
        .and(warp::path::end())
        .and(warp::get())
        .and(runner_filter.clone())
        .and_then(handle_history);

    let metrics_route = warp::path("metrics")
        .and(warp::path::end())
        .and(warp::get())
        .and(runner_filter)
        .map(|runner: Arc<Runner>| warp::reply::json(&runner.metrics()));

    index_route
        .or(capture_route)
        .or(history_route)
        .or(metrics_route)
        .recover(handle_rejection)
}

async fn handle_capture(
    content_type: Option<String>,
    body: Bytes,
    runner: Arc<Runner>,
) -> Result<impl Reply, Rejection> {
    if body.is_empty() {
        return Err(warp::reject::custom(EmptyCapture));
    }
    let image = CapturedImage::new(body.to_vec(), content_type);
    let report = tokio::task::spawn_blocking(move || runner.execute(&image))
        .await
        .map_err(|err| {
            error!("capture worker failed: {}", err);
            warp::reject::custom(WorkerFailed(err.to_string()))
        })?;
    Ok(warp::reply::json(&report))
}

fn history_panel(runner: &Runner) -> HistoryPanel {
    match runner.history() {
        Ok(summary) => HistoryPanel::from(summary),
        Err(err) => {
            warn!("history unavailable: {}", err);
            HistoryPanel::unavailable(err.to_string())
        }
    }
}

async fn handle_history(runner: Arc<Runner>) -> Result<impl Reply, Rejection> {
    let panel = tokio::task::spawn_blocking(move || history_panel(&runner))
        .await
        .map_err(|err| {
            error!("history worker failed: {}", err);
            warp::reject::custom(WorkerFailed(err.to_string()))
        })?;
    Ok(warp::reply::json(&panel))
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not found".to_string())
    } else if err.find::<EmptyCapture>().is_some() {
        (StatusCode::BAD_REQUEST, "capture body is empty".to_string())
    } else if let Some(WorkerFailed(reason)) = err.find::<WorkerFailed>() {
        (StatusCode::INTERNAL_SERVER_ERROR, reason.clone())
    } else if let Some(too_large) = err.find::<warp::reject::PayloadTooLarge>() {
        (StatusCode::PAYLOAD_TOO_LARGE, too_large.to_string())
    } else if let Some(missing) = err.find::<warp::reject::LengthRequired>() {
        (StatusCode::LENGTH_REQUIRED, missing.to_string())
    } else if let Some(not_allowed) = err.find::<warp::reject::MethodNotAllowed>() {
        (StatusCode::METHOD_NOT_ALLOWED, not_allowed.to_string())
    } else {
        (StatusCode::BAD_REQUEST, format!("{:?}", err))
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&ErrorBody { error: message }),
        status,
    ))
}

/// Hosts the page and JSON endpoints on a dedicated runtime thread.
pub struct WebBridge {
    addr: SocketAddr,
}

impl WebBridge {
    pub fn start(runner: Arc<Runner>, bind: SocketAddr) -> anyhow::Result<Self> {
        let (ready_tx, ready_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match Builder::new_multi_thread().enable_all().build() {
                Ok(runtime) => runtime,
                Err(err) => {
                    let _ = ready_tx.send(Err(anyhow::Error::new(err)));
                    return;
                }
            };
            runtime.block_on(async move {
                match warp::serve(routes(runner)).try_bind_ephemeral(bind) {
                    Ok((addr, server)) => {
                        let _ = ready_tx.send(Ok(addr));
                        server.await;
                    }
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)));
                    }
                }
            });
        });

        let addr = ready_rx
            .recv()
            .context("web bridge thread exited before binding")?
            .with_context(|| format!("binding web bridge on {}", bind))?;
        info!("FeelTune page available at http://{}", addr);
        Ok(Self { addr })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::AppConfig;
    use feeltune_core::detector::FixtureDetector;
    use feeltune_core::emotion::FaceDetection;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn runner_with(faces: Vec<FaceDetection>) -> (TempDir, Arc<Runner>) {
        let dir = tempdir().unwrap();
        let cfg = AppConfig {
            history_path: dir.path().join("mood_history.csv"),
            ..Default::default()
        };
        let runner = Runner::with_detector(&cfg, Arc::new(FixtureDetector::new(faces)));
        (dir, Arc::new(runner))
    }

    fn json_body(body: &[u8]) -> serde_json::Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn index_serves_page() {
        let (_dir, runner) = runner_with(Vec::new());
        let res = warp::test::request()
            .method("GET")
            .path("/")
            .reply(&routes(runner))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(String::from_utf8_lossy(res.body()).contains("FeelTune AI"));
    }

    #[tokio::test]
    async fn capture_returns_mood_and_updates_history() {
        let (_dir, runner) = runner_with(vec![FaceDetection::new([
            ("surprise", 0.55),
            ("happy", 0.25),
            ("neutral", 0.2),
        ])]);
        let filter = routes(runner);

        let res = warp::test::request()
            .method("POST")
            .path("/capture")
            .header("content-type", "image/jpeg")
            .body(vec![0xff, 0xd8, 0xff, 0xe0])
            .reply(&filter)
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let report = json_body(res.body());
        assert_eq!(report["outcome"]["status"], "detected");
        assert_eq!(report["outcome"]["emotion"], "surprise");
        assert_eq!(report["outcome"]["playback"]["video_id"], "uVM5G2rfy14");

        let res = warp::test::request()
            .method("GET")
            .path("/history")
            .reply(&filter)
            .await;
        let panel = json_body(res.body());
        assert_eq!(panel["total"], 1);
        assert_eq!(panel["counts"][0]["emotion"], "surprise");
        assert_eq!(panel["counts"][0]["count"], 1);
    }

    #[tokio::test]
    async fn capture_without_face_reports_notice() {
        let (_dir, runner) = runner_with(Vec::new());
        let filter = routes(runner.clone());
        let res = warp::test::request()
            .method("POST")
            .path("/capture")
            .body(vec![1, 2, 3])
            .reply(&filter)
            .await;
        let report = json_body(res.body());
        assert_eq!(report["outcome"]["status"], "no_face");
        assert_eq!(runner.metrics().no_face, 1);
    }

    #[tokio::test]
    async fn empty_capture_is_rejected() {
        let (_dir, runner) = runner_with(Vec::new());
        let res = warp::test::request()
            .method("POST")
            .path("/capture")
            .body(Vec::<u8>::new())
            .reply(&routes(runner))
            .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(res.body())["error"], "capture body is empty");
    }

    #[tokio::test]
    async fn history_is_empty_before_first_detection() {
        let (_dir, runner) = runner_with(Vec::new());
        let res = warp::test::request()
            .method("GET")
            .path("/history")
            .reply(&routes(runner))
            .await;
        let panel = json_body(res.body());
        assert_eq!(panel["total"], 0);
        assert!(panel["recent"].as_array().unwrap().is_empty());
        assert!(panel.get("unavailable").is_none());
    }

    #[tokio::test]
    async fn unreadable_history_is_reported_not_fatal() {
        let (dir, runner) = runner_with(Vec::new());
        fs::write(dir.path().join("mood_history.csv"), "garbage\n\"unterminated").unwrap();
        let res = warp::test::request()
            .method("GET")
            .path("/history")
            .reply(&routes(runner))
            .await;
        assert_eq!(res.status(), StatusCode::OK);
        let panel = json_body(res.body());
        assert_eq!(panel["total"], 0);
        assert!(panel["unavailable"].is_string());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn history_reads_repeat_identically() {
        let (_dir, runner) = runner_with(vec![FaceDetection::new([("sad", 0.7)])]);
        let filter = routes(runner);
        warp::test::request()
            .method("POST")
            .path("/capture")
            .body(vec![1])
            .reply(&filter)
            .await;

        let mut bodies = Vec::new();
        for _ in 0..2 {
            let res = warp::test::request()
                .method("GET")
                .path("/history")
                .reply(&filter)
                .await;
            assert_eq!(res.status(), StatusCode::OK);
            bodies.push(json_body(res.body()));
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[0]["recent"][0]["emotion"], "sad");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let (_dir, runner) = runner_with(Vec::new());
        let res = warp::test::request()
            .method("GET")
            .path("/nowhere")
            .reply(&routes(runner))
            .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
