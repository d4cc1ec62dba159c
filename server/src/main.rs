use anyhow::Context;
use clap::Parser;
use detector::synthetic::SyntheticConfig;
use feeltune_core::prelude::CapturedImage;
use log::info;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use web::bridge::WebBridge;
use workflow::config::{AppConfig, DetectorConfig};
use workflow::runner::Runner;

mod detector;
mod web;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "FeelTune mood-based music player host")]
struct Args {
    /// Load the app config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// Mood history CSV location
    #[arg(long)]
    history: Option<PathBuf>,
    /// Use the model service at this URL as detector
    #[arg(long, conflicts_with_all = ["fixture", "synthetic_seed"])]
    detector_url: Option<String>,
    /// Answer every capture with the faces in this JSON file
    #[arg(long, conflicts_with = "synthetic_seed")]
    fixture: Option<PathBuf>,
    /// Use seeded synthetic faces instead of a model
    #[arg(long)]
    synthetic_seed: Option<u64>,
    /// Address for the web page
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Run a single capture cycle on an image file and print the report
    #[arg(long)]
    capture: Option<PathBuf>,
    /// Serve the web page until Ctrl+C
    #[arg(long, default_value_t = false)]
    serve: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(history) = &self.history {
            config.history_path = history.clone();
        }
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(endpoint) = &self.detector_url {
            config.detector = DetectorConfig::Http {
                endpoint: endpoint.clone(),
                timeout_secs: None,
            };
        } else if let Some(path) = &self.fixture {
            config.detector = DetectorConfig::Fixture { path: path.clone() };
        } else if let Some(seed) = self.synthetic_seed {
            config.detector = DetectorConfig::Synthetic(SyntheticConfig {
                seed,
                ..Default::default()
            });
        }
    }
}

fn content_type_for(path: &Path) -> Option<String> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => return None,
    };
    Some(mime.to_string())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = if let Some(path) = &args.config {
        AppConfig::load(path)?
    } else {
        AppConfig::default()
    };
    args.apply_overrides(&mut config);

    let runner = Runner::new(&config)?;
    info!(
        "detector {} / history {}",
        runner.detector_name(),
        config.history_path.display()
    );

    if let Some(path) = &args.capture {
        let bytes = fs::read(path)
            .with_context(|| format!("reading capture image {}", path.display()))?;
        let report = runner.execute(&CapturedImage::new(bytes, content_type_for(path)));

        println!("{}", serde_json::to_string_pretty(&report)?);
        match runner.history() {
            Ok(summary) => println!(
                "history -> {} entries, counts {:?}",
                summary.total,
                summary
                    .counts
                    .iter()
                    .map(|c| format!("{}={}", c.emotion, c.count))
                    .collect::<Vec<_>>()
            ),
            Err(err) => println!("history unavailable: {}", err),
        }
    }

    if args.serve {
        let bridge = WebBridge::start(Arc::new(runner.clone()), config.bind)?;
        println!("FeelTune running at http://{} (Ctrl+C to stop)...", bridge.addr());
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    } else if args.capture.is_none() {
        println!("Nothing to do: pass --capture <image> or --serve.");
    }

    Ok(())
}
