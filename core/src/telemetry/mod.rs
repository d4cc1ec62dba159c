pub mod log;
pub mod metrics;

pub use self::log::log_cycle;
pub use metrics::{CycleMetrics, MetricsSnapshot};
