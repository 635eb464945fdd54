//! The fixed-cadence monitoring loop.
//!
//! One worker runs every tick to completion: reload check, sampling, rate
//! derivation, history, alert evaluation, alert logging, rendering, then a
//! sleep for whatever is left of the interval. The only state touched from
//! outside is the running flag behind [`StopHandle`].

use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Notify;

use crate::core::config::{ConfigSnapshot, ThresholdSet};
use crate::core::config_source::ConfigSource;
use crate::error::Result;
use crate::logging::Logger;

use super::alerts::{Alert, AlertEngine};
use super::collector::MetricsCollector;
use super::history::HistoryBuffer;
use super::metrics::{CpuSample, DiskSample, MemorySample, NetworkSample};
use super::sample_state::SampleState;

/// Receiver of each tick's results (terminal dashboard, JSON writer, ...).
pub trait Dashboard: Send {
    /// Called once at construction and again after every successful reload.
    fn update_config(&mut self, snapshot: &ConfigSnapshot);

    fn render(&mut self, tick: &TickReport) -> Result<()>;
}

/// Everything produced by one tick. Disabled families are `None`/empty;
/// their histories are carried unchanged.
#[derive(Debug, Clone, Serialize)]
pub struct TickReport {
    pub tick: u64,
    pub timestamp: DateTime<Local>,
    pub cpu: Option<CpuSample>,
    pub memory: Option<MemorySample>,
    pub disks: Vec<DiskSample>,
    pub network: Vec<NetworkSample>,
    pub cpu_history: Vec<f64>,
    pub memory_history: Vec<f64>,
    pub alerts: Vec<Alert>,
    pub thresholds: ThresholdSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running,
}

/// Requests a cooperative stop from any thread. The loop finishes its
/// current tick; a pending inter-tick sleep is cut short.
#[derive(Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        self.wake.notify_one();
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

pub struct MonitorLoop {
    config: Box<dyn ConfigSource>,
    collector: Box<dyn MetricsCollector>,
    alert_engine: AlertEngine,
    dashboard: Box<dyn Dashboard>,
    network_state: SampleState,
    cpu_history: HistoryBuffer,
    memory_history: HistoryBuffer,
    active_alerts: Vec<Alert>,
    ticks: u64,
    running: Arc<AtomicBool>,
    wake: Arc<Notify>,
    logger: Logger,
}

impl MonitorLoop {
    pub fn new(
        config: Box<dyn ConfigSource>,
        collector: Box<dyn MetricsCollector>,
        mut dashboard: Box<dyn Dashboard>,
        logger: Logger,
    ) -> Self {
        let snapshot = config.current();
        logger.set_debug(snapshot.debug_logging);
        dashboard.update_config(&snapshot);

        let alert_engine =
            AlertEngine::new(snapshot.alerts.clone(), logger.scoped("sysmon::alerts"));

        Self {
            config,
            collector,
            alert_engine,
            dashboard,
            network_state: SampleState::new(),
            cpu_history: HistoryBuffer::with_capacity(snapshot.history_size),
            memory_history: HistoryBuffer::with_capacity(snapshot.history_size),
            active_alerts: Vec::new(),
            ticks: 0,
            running: Arc::new(AtomicBool::new(false)),
            wake: Arc::new(Notify::new()),
            logger: logger.scoped("sysmon::loop"),
        }
    }

    /// Replace the alert engine (e.g. to install a different notifier).
    pub fn with_alert_engine(mut self, engine: AlertEngine) -> Self {
        self.alert_engine = engine;
        self
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Arc::clone(&self.running),
            wake: Arc::clone(&self.wake),
        }
    }

    pub fn state(&self) -> LoopState {
        if self.running.load(Ordering::SeqCst) {
            LoopState::Running
        } else {
            LoopState::Stopped
        }
    }

    /// Run ticks until a [`StopHandle`] requests a stop.
    pub async fn start(&mut self) {
        self.running.store(true, Ordering::SeqCst);
        self.logger.info(format_args!(
            "monitor started on {} (interval {}s)",
            self.collector.platform(),
            self.config.current().update_interval
        ));

        while self.running.load(Ordering::SeqCst) {
            let started = Instant::now();
            self.tick(started);

            let interval = self.config.current().interval();
            let remaining = remaining_interval(interval, started.elapsed());
            if remaining.is_zero() {
                self.logger.debug(format_args!(
                    "tick {} overran the {}s interval",
                    self.ticks,
                    interval.as_secs()
                ));
            }
            self.pause(remaining).await;
        }

        self.logger
            .info(format_args!("monitor stopped after {} ticks", self.ticks));
    }

    async fn pause(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = self.wake.notified() => {}
        }
    }

    /// Run one complete iteration. `now` is the single instant used for
    /// every rate computed in this tick.
    pub fn tick(&mut self, now: Instant) -> TickReport {
        if self.config.check_and_reload() {
            let snapshot = self.config.current();
            self.apply_snapshot(&snapshot);
        }
        let snapshot = self.config.current();

        let cpu = if snapshot.cpu.enabled {
            let sample = self.collector.sample_cpu();
            self.cpu_history.push(sample.overall_usage);
            Some(sample)
        } else {
            None
        };

        let memory = if snapshot.memory.enabled {
            let sample = self.collector.sample_memory();
            self.memory_history.push(sample.usage_percent);
            Some(sample)
        } else {
            None
        };

        let disks = if snapshot.disk.enabled {
            let mut disks = self.collector.sample_disks(&snapshot.mount_paths());
            for disk in &mut disks {
                if let Some(mp) = snapshot
                    .disk
                    .mount_points
                    .iter()
                    .find(|mp| mp.path == disk.mount_point)
                {
                    disk.label = mp.label.clone();
                }
            }
            disks
        } else {
            Vec::new()
        };

        let network = if snapshot.network.enabled {
            let mut network = self.collector.sample_network(&snapshot.network.interfaces);
            self.network_state.update(&mut network, now);
            network
        } else {
            Vec::new()
        };

        let mut alerts = Vec::new();
        if let Some(ref sample) = cpu {
            alerts.extend(self.alert_engine.evaluate_cpu(sample, &snapshot.cpu));
        }
        if let Some(ref sample) = memory {
            alerts.extend(self.alert_engine.evaluate_memory(sample, &snapshot.memory));
        }
        if snapshot.disk.enabled {
            alerts.extend(self.alert_engine.evaluate_disks(&disks, &snapshot.disk));
        }
        self.active_alerts = alerts;
        self.alert_engine.record(&self.active_alerts);

        self.ticks += 1;
        let report = TickReport {
            tick: self.ticks,
            timestamp: Local::now(),
            cpu,
            memory,
            disks,
            network,
            cpu_history: self.cpu_history.values(),
            memory_history: self.memory_history.values(),
            alerts: self.active_alerts.clone(),
            thresholds: snapshot.thresholds(),
        };

        if let Err(e) = self.dashboard.render(&report) {
            self.logger
                .warn(format_args!("render failed on tick {}: {}", report.tick, e));
        }

        report
    }

    fn apply_snapshot(&mut self, snapshot: &ConfigSnapshot) {
        self.logger.set_debug(snapshot.debug_logging);
        self.alert_engine.update_config(snapshot.alerts.clone());
        self.dashboard.update_config(snapshot);

        if snapshot.history_size != self.cpu_history.capacity() {
            self.cpu_history = self.cpu_history.resized(snapshot.history_size);
            self.memory_history = self.memory_history.resized(snapshot.history_size);
        }
        self.logger.debug(format_args!(
            "applied configuration: interval {}s, history {}",
            snapshot.update_interval, snapshot.history_size
        ));
    }

    pub fn active_alerts(&self) -> &[Alert] {
        &self.active_alerts
    }

    pub fn cpu_history(&self) -> &HistoryBuffer {
        &self.cpu_history
    }

    pub fn memory_history(&self) -> &HistoryBuffer {
        &self.memory_history
    }

    pub fn alert_engine(&self) -> &AlertEngine {
        &self.alert_engine
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// Time left to sleep after a tick that took `elapsed`; zero on overrun.
fn remaining_interval(interval: Duration, elapsed: Duration) -> Duration {
    interval.saturating_sub(elapsed)
}
