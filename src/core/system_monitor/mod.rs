//! System monitoring core functionality.
//!
//! Sampling contract, rate bookkeeping, bounded history, threshold alerts
//! and the loop that drives them.

pub mod alerts;
mod collector;
mod history;
mod metrics;
mod monitor_loop;
mod sample_state;
pub mod sink;

pub use alerts::{level, Alert, AlertCategory, AlertEngine, AlertSeverity, Level};
pub use collector::{
    cpu_usage_percent, create_metrics_collector, CpuBaseline, CpuTicks, MetricsCollector,
};
pub use history::HistoryBuffer;
pub use metrics::{CpuSample, DiskSample, MemorySample, NetworkSample};
pub use monitor_loop::{Dashboard, LoopState, MonitorLoop, StopHandle, TickReport};
pub use sample_state::{rate_mbps, SampleState};
pub use sink::{AlertSink, Notifier, TerminalBell};
