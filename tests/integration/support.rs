//! Scripted collector and recording dashboard shared by the loop tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use sysmon::core::config::ConfigSnapshot;
use sysmon::core::system_monitor::{
    CpuSample, Dashboard, DiskSample, MemorySample, MetricsCollector, NetworkSample, TickReport,
};

/// Values returned by [`FakeCollector`]; change them between ticks.
#[derive(Debug, Clone)]
pub struct Readings {
    pub cpu: f64,
    pub memory_percent: f64,
    pub disk_percent: f64,
    pub net_sent: u64,
    pub net_received: u64,
}

impl Default for Readings {
    fn default() -> Self {
        Self {
            cpu: 10.0,
            memory_percent: 25.0,
            disk_percent: 40.0,
            net_sent: 0,
            net_received: 0,
        }
    }
}

#[derive(Debug, Default)]
pub struct CallCounts {
    pub cpu: AtomicUsize,
    pub memory: AtomicUsize,
    pub disks: AtomicUsize,
    pub network: AtomicUsize,
}

impl CallCounts {
    pub fn cpu(&self) -> usize {
        self.cpu.load(Ordering::SeqCst)
    }

    pub fn memory(&self) -> usize {
        self.memory.load(Ordering::SeqCst)
    }

    pub fn disks(&self) -> usize {
        self.disks.load(Ordering::SeqCst)
    }
}

pub struct FakeCollector {
    readings: Arc<Mutex<Readings>>,
    calls: Arc<CallCounts>,
}

impl FakeCollector {
    pub fn new() -> (Self, Arc<Mutex<Readings>>, Arc<CallCounts>) {
        let readings = Arc::new(Mutex::new(Readings::default()));
        let calls = Arc::new(CallCounts::default());
        let collector = Self {
            readings: Arc::clone(&readings),
            calls: Arc::clone(&calls),
        };
        (collector, readings, calls)
    }
}

const GB: u64 = 1024 * 1024 * 1024;

impl MetricsCollector for FakeCollector {
    fn sample_cpu(&mut self) -> CpuSample {
        self.calls.cpu.fetch_add(1, Ordering::SeqCst);
        let usage = self.readings.lock().unwrap().cpu;
        CpuSample {
            overall_usage: usage,
            per_core_usage: vec![10.0, 20.0],
            core_count: 2,
            model: "Fake CPU".to_string(),
        }
    }

    fn sample_memory(&mut self) -> MemorySample {
        self.calls.memory.fetch_add(1, Ordering::SeqCst);
        let percent = self.readings.lock().unwrap().memory_percent;
        let total = 16 * GB;
        let available = total - (total as f64 * percent / 100.0) as u64;
        MemorySample::from_totals(total, available, 0, 0)
    }

    fn sample_disks(&mut self, mount_points: &[String]) -> Vec<DiskSample> {
        self.calls.disks.fetch_add(1, Ordering::SeqCst);
        let percent = self.readings.lock().unwrap().disk_percent;
        mount_points
            .iter()
            .map(|mp| DiskSample::new(mp, 100 * GB, (percent as u64) * GB))
            .collect()
    }

    fn sample_network(&mut self, _interfaces: &[String]) -> Vec<NetworkSample> {
        self.calls.network.fetch_add(1, Ordering::SeqCst);
        let readings = self.readings.lock().unwrap();
        vec![NetworkSample::new(
            "eth0",
            readings.net_sent,
            readings.net_received,
        )]
    }

    fn platform(&self) -> &'static str {
        "fake"
    }
}

/// Keeps every rendered tick and every snapshot it was handed.
#[derive(Clone, Default)]
pub struct RecordingDashboard {
    pub ticks: Arc<Mutex<Vec<TickReport>>>,
    pub configs: Arc<Mutex<Vec<ConfigSnapshot>>>,
}

impl Dashboard for RecordingDashboard {
    fn update_config(&mut self, snapshot: &ConfigSnapshot) {
        self.configs.lock().unwrap().push(snapshot.clone());
    }

    fn render(&mut self, tick: &TickReport) -> sysmon::Result<()> {
        self.ticks.lock().unwrap().push(tick.clone());
        Ok(())
    }
}

/// Defaults with the alert log pointed at `log_path` and one root mount.
pub fn snapshot_with_log(log_path: &std::path::Path) -> ConfigSnapshot {
    let mut snapshot = ConfigSnapshot::default();
    snapshot.alerts.log_path = log_path.to_path_buf();
    snapshot
}

/// In-memory writer that stays readable after being boxed into a dashboard.
#[derive(Clone, Default)]
pub struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl std::io::Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
