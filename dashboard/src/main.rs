use feeltune_core::emotion::Emotion;
use feeltune_core::history::{EmotionCount, HistoryEntry};
use feeltune_core::telemetry::MetricsSnapshot;
use iced::{
    mouse, time,
    widget::{
        button,
        canvas::{self, Canvas, Frame, Geometry, Path, Stroke},
        column, row, scrollable, text, text_input, Column, Container,
    },
    Alignment, Color, Element, Length, Point, Rectangle, Renderer, Size, Subscription, Task,
    Theme,
};
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8501";

fn main() -> iced::Result {
    iced::application(Dashboard::boot, Dashboard::update, Dashboard::view)
        .title(application_title)
        .subscription(application_subscription)
        .theme(application_theme)
        .run()
}

fn application_title(_: &Dashboard) -> String {
    "FeelTune Mood History".into()
}

fn application_subscription(_: &Dashboard) -> Subscription<Message> {
    time::every(Duration::from_secs(2)).map(|_| Message::Tick)
}

fn application_theme(_: &Dashboard) -> Theme {
    Theme::Dark
}

#[derive(Debug)]
struct Dashboard {
    server: String,
    history: Option<HistoryPayload>,
    metrics: Option<MetricsSnapshot>,
    status: String,
    activity: Vec<String>,
}

#[derive(Debug, Clone)]
enum Message {
    Tick,
    Refresh,
    ServerChanged(String),
    HistoryFetched(Result<HistoryPayload, String>),
    MetricsFetched(Result<MetricsSnapshot, String>),
}

impl Dashboard {
    fn boot() -> (Self, Task<Message>) {
        let dashboard = Dashboard {
            server: DEFAULT_SERVER.into(),
            history: None,
            metrics: None,
            status: "Waiting for mood history...".into(),
            activity: Vec::new(),
        };
        let task = dashboard.poll();
        (dashboard, task)
    }

    fn poll(&self) -> Task<Message> {
        Task::batch([
            Task::perform(fetch_history(self.server.clone()), Message::HistoryFetched),
            Task::perform(fetch_metrics(self.server.clone()), Message::MetricsFetched),
        ])
    }

    fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick | Message::Refresh => state.poll(),
            Message::ServerChanged(value) => {
                state.server = value;
                Task::none()
            }
            Message::HistoryFetched(Ok(payload)) => {
                let previous = state.history.as_ref().map(|h| h.total).unwrap_or(0);
                if payload.total > previous {
                    if let Some(latest) = payload.recent.last() {
                        state.push_activity(format!(
                            "{} -> {} ({:.2})",
                            latest.timestamp.format("%H:%M:%S"),
                            latest.emotion,
                            latest.score
                        ));
                    }
                }
                state.status = match &payload.unavailable {
                    Some(reason) => format!("History unavailable: {reason}"),
                    None => format!("{} moods recorded", payload.total),
                };
                state.history = Some(payload);
                Task::none()
            }
            Message::HistoryFetched(Err(err)) => {
                state.status = format!("History error: {err}");
                Task::none()
            }
            Message::MetricsFetched(Ok(metrics)) => {
                state.metrics = Some(metrics);
                Task::none()
            }
            Message::MetricsFetched(Err(_)) => {
                state.metrics = None;
                Task::none()
            }
        }
    }

    fn view(state: &Self) -> Element<'_, Message> {
        let counts = state
            .history
            .as_ref()
            .map(|history| history.counts.clone())
            .unwrap_or_default();
        let recent = state
            .history
            .as_ref()
            .map(|history| history.recent.clone())
            .unwrap_or_default();

        let metrics_list = match &state.metrics {
            Some(metrics) => column![
                text(format!("Cycles: {}", metrics.cycles)).size(14),
                text(format!("Detections: {}", metrics.detections)).size(14),
                text(format!("No face: {}", metrics.no_face)).size(14),
                text(format!("No emotion: {}", metrics.no_emotion)).size(14),
                text(format!("Detector errors: {}", metrics.detector_errors)).size(14),
                text(format!("History errors: {}", metrics.history_errors)).size(14),
            ]
            .spacing(4),
            None => column![text("Metrics: n/a").size(14)],
        };

        let activity_list = if state.activity.is_empty() {
            Column::new().push(text("No new moods yet").size(12))
        } else {
            state
                .activity
                .iter()
                .rev()
                .fold(Column::new().spacing(4), |col, entry| {
                    col.push(text(entry.clone()).size(12))
                })
        };

        let control_column = column![
            text("Server").size(26),
            text_input("Server URL", &state.server)
                .on_input(Message::ServerChanged)
                .padding(6),
            button("Refresh").on_press(Message::Refresh).padding(10),
            text(&state.status).size(14),
            text("Session metrics").size(18),
            metrics_list,
            text("New moods").size(16),
            Container::new(scrollable(activity_list).height(Length::Fixed(160.0))).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(320.0));

        let legend = if counts.is_empty() {
            Column::new().push(text("Mood history will appear after the first detection").size(12))
        } else {
            counts.iter().fold(Column::new().spacing(2), |col, count| {
                col.push(
                    text(format!("{}: {}", count.emotion.display_name(), count.count))
                        .size(12)
                        .color(emotion_color(&count.emotion)),
                )
            })
        };

        let recent_rows = if recent.is_empty() {
            Column::new().push(text("No entries").size(12))
        } else {
            recent.iter().fold(Column::new().spacing(4), |col, entry| {
                col.push(
                    text(format!(
                        "{} | {} | {:.2}",
                        entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                        entry.emotion,
                        entry.score
                    ))
                    .size(12),
                )
            })
        };

        let count_chart = Canvas::new(CountChart {
            counts: counts.clone(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(220.0));

        let score_trail = Canvas::new(ScoreTrail {
            scores: recent.iter().map(|entry| entry.score as f32).collect(),
        })
        .width(Length::Fill)
        .height(Length::Fixed(140.0));

        let history_column = column![
            text("Mood History").size(26),
            text("Counts by emotion").size(18),
            count_chart,
            legend,
            text("Recent confidence").size(16),
            score_trail,
            text("Last entries").size(16),
            Container::new(recent_rows).padding(6),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fill);

        let layout = row![control_column, history_column]
            .spacing(20)
            .align_y(Alignment::Start)
            .padding(20);

        Container::new(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn push_activity(&mut self, entry: String) {
        self.activity.push(entry);
        if self.activity.len() > 20 {
            self.activity.remove(0);
        }
    }
}

async fn fetch_history(server: String) -> Result<HistoryPayload, String> {
    let response = reqwest::get(format!("{}/history", server.trim_end_matches('/')))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<HistoryPayload>()
        .await
        .map_err(|e| e.to_string())
}

async fn fetch_metrics(server: String) -> Result<MetricsSnapshot, String> {
    let response = reqwest::get(format!("{}/metrics", server.trim_end_matches('/')))
        .await
        .map_err(|e| e.to_string())?;
    response
        .json::<MetricsSnapshot>()
        .await
        .map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Deserialize)]
struct HistoryPayload {
    #[serde(default)]
    total: usize,
    #[serde(default)]
    recent: Vec<HistoryEntry>,
    #[serde(default)]
    counts: Vec<EmotionCount>,
    #[serde(default)]
    unavailable: Option<String>,
}

/// Banner colours of the page, reused for the chart.
fn emotion_color(emotion: &Emotion) -> Color {
    match emotion {
        Emotion::Happy => Color::from_rgb8(0xfd, 0xdb, 0x92),
        Emotion::Sad => Color::from_rgb8(0x00, 0x82, 0xc8),
        Emotion::Angry => Color::from_rgb8(0xff, 0x41, 0x6c),
        Emotion::Surprise => Color::from_rgb8(0xf9, 0xff, 0x00),
        Emotion::Fear => Color::from_rgb8(0x30, 0x2b, 0x63),
        Emotion::Disgust => Color::from_rgb8(0x38, 0xef, 0x7d),
        Emotion::Other(_) => Color::from_rgb(0.6, 0.6, 0.6),
    }
}

/// Bar rectangles for `counts` inside a `width` x `height` area.
fn bar_layout(counts: &[EmotionCount], width: f32, height: f32) -> Vec<Rectangle> {
    let max = counts.iter().map(|c| c.count).max().unwrap_or(0);
    if max == 0 {
        return Vec::new();
    }
    let slot = width / counts.len() as f32;
    let gap = (slot * 0.2).min(16.0);
    counts
        .iter()
        .enumerate()
        .map(|(idx, count)| {
            let bar_height = height * count.count as f32 / max as f32;
            Rectangle {
                x: idx as f32 * slot + gap / 2.0,
                y: height - bar_height,
                width: slot - gap,
                height: bar_height,
            }
        })
        .collect()
}

#[derive(Clone)]
struct CountChart {
    counts: Vec<EmotionCount>,
}

impl canvas::Program<Message> for CountChart {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.08),
        );

        let bars = bar_layout(&self.counts, bounds.width, bounds.height - 4.0);
        for (bar, count) in bars.iter().zip(self.counts.iter()) {
            frame.fill_rectangle(
                Point::new(bar.x, bar.y + 4.0),
                Size::new(bar.width, bar.height),
                emotion_color(&count.emotion),
            );
        }

        vec![frame.into_geometry()]
    }
}

#[derive(Clone)]
struct ScoreTrail {
    scores: Vec<f32>,
}

impl canvas::Program<Message> for ScoreTrail {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(
            Point::ORIGIN,
            bounds.size(),
            Color::from_rgb(0.05, 0.05, 0.05),
        );

        if self.scores.len() > 1 {
            let step = bounds.width / (self.scores.len() as f32 - 1.0);
            // confidences live in [0, 1]; no rescaling
            let path = Path::new(|builder| {
                for (i, score) in self.scores.iter().enumerate() {
                    let x = i as f32 * step;
                    let y = bounds.height - score.clamp(0.0, 1.0) * bounds.height;
                    if i == 0 {
                        builder.move_to(Point::new(x, y));
                    } else {
                        builder.line_to(Point::new(x, y));
                    }
                }
            });

            frame.stroke(
                &path,
                Stroke::default()
                    .with_width(2.5)
                    .with_color(Color::from_rgb(0.0, 0.78, 1.0)),
            );
        }

        vec![frame.into_geometry()]
    }
}
