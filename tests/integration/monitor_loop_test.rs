use std::fs;
use std::time::{Duration, Instant};

use sysmon::core::config::{ConfigSnapshot, ThresholdConfig};
use sysmon::core::config_source::StaticConfigSource;
use sysmon::core::system_monitor::{AlertCategory, AlertSeverity, LoopState, MonitorLoop};
use sysmon::logging::Logger;
use tempfile::TempDir;

use super::support::{snapshot_with_log, FakeCollector, RecordingDashboard};

fn build(snapshot: ConfigSnapshot) -> (MonitorLoop, FakeHandles) {
    let (collector, readings, calls) = FakeCollector::new();
    let dashboard = RecordingDashboard::default();
    let monitor = MonitorLoop::new(
        Box::new(StaticConfigSource::new(snapshot)),
        Box::new(collector),
        Box::new(dashboard.clone()),
        Logger::default(),
    );
    (
        monitor,
        FakeHandles {
            readings,
            calls,
            dashboard,
        },
    )
}

struct FakeHandles {
    readings: std::sync::Arc<std::sync::Mutex<super::support::Readings>>,
    calls: std::sync::Arc<super::support::CallCounts>,
    dashboard: RecordingDashboard,
}

fn cpu_snapshot(dir: &TempDir) -> ConfigSnapshot {
    let mut snapshot = snapshot_with_log(&dir.path().join("alerts.log"));
    snapshot.cpu.thresholds = ThresholdConfig::new(70.0, 90.0);
    snapshot
}

#[test]
fn test_critical_cpu_raises_one_alert() {
    let dir = TempDir::new().unwrap();
    let (mut monitor, fakes) = build(cpu_snapshot(&dir));
    fakes.readings.lock().unwrap().cpu = 92.0;

    let report = monitor.tick(Instant::now());

    let cpu_alerts: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.category == AlertCategory::Cpu)
        .collect();
    assert_eq!(cpu_alerts.len(), 1);
    assert_eq!(cpu_alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(
        cpu_alerts[0].message,
        "CPU usage: 92.0% (critical threshold: 90%)"
    );
    assert_eq!(monitor.active_alerts().len(), report.alerts.len());
}

#[test]
fn test_normal_cpu_raises_nothing() {
    let dir = TempDir::new().unwrap();
    let (mut monitor, fakes) = build(cpu_snapshot(&dir));
    fakes.readings.lock().unwrap().cpu = 55.0;

    let report = monitor.tick(Instant::now());

    assert!(report.alerts.is_empty());
    let log = fs::read_to_string(dir.path().join("alerts.log")).unwrap_or_default();
    assert!(log.is_empty());
}

#[test]
fn test_sustained_condition_logs_every_tick() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("alerts.log");
    let (mut monitor, fakes) = build(cpu_snapshot(&dir));
    fakes.readings.lock().unwrap().cpu = 92.0;

    let start = Instant::now();
    for i in 0..3 {
        let report = monitor.tick(start + Duration::from_secs(i));
        assert_eq!(report.alerts.len(), 1);
    }

    let log = fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert!(line.contains("CRITICAL - CPU: CPU usage: 92.0%"), "{}", line);
    }
    assert_eq!(fakes.dashboard.ticks.lock().unwrap().len(), 3);
}

#[test]
fn test_disabled_cpu_is_never_sampled() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = cpu_snapshot(&dir);
    snapshot.cpu.enabled = false;
    let (mut monitor, fakes) = build(snapshot);
    {
        let mut readings = fakes.readings.lock().unwrap();
        readings.cpu = 99.0;
        readings.memory_percent = 90.0;
    }

    let report = monitor.tick(Instant::now());

    assert_eq!(fakes.calls.cpu(), 0);
    assert_eq!(fakes.calls.memory(), 1);
    assert_eq!(fakes.calls.disks(), 1);
    assert!(report.cpu.is_none());
    assert!(report
        .alerts
        .iter()
        .all(|a| a.category != AlertCategory::Cpu));
    assert!(report
        .alerts
        .iter()
        .any(|a| a.category == AlertCategory::Memory && a.severity == AlertSeverity::Warning));
}

#[test]
fn test_disabled_family_history_is_frozen() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = cpu_snapshot(&dir);
    snapshot.memory.enabled = false;
    snapshot.history_size = 2;
    let (mut monitor, fakes) = build(snapshot);

    for usage in [10.0, 20.0, 30.0] {
        fakes.readings.lock().unwrap().cpu = usage;
        monitor.tick(Instant::now());
    }

    assert_eq!(monitor.cpu_history().values(), vec![20.0, 30.0]);
    assert!(monitor.memory_history().is_empty());
    assert_eq!(monitor.ticks(), 3);
}

#[test]
fn test_network_rates_from_consecutive_ticks() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = cpu_snapshot(&dir);
    snapshot.network.enabled = true;
    let (mut monitor, fakes) = build(snapshot);

    let start = Instant::now();
    fakes.readings.lock().unwrap().net_received = 1000;
    let first = monitor.tick(start);
    assert_eq!(first.network.len(), 1);
    assert_eq!(first.network[0].download_mbps, None);

    {
        let mut readings = fakes.readings.lock().unwrap();
        readings.net_received = 8_001_000;
        readings.net_sent = 125_000;
    }
    let second = monitor.tick(start + Duration::from_secs(1));
    let rate = second.network[0].download_mbps.unwrap();
    assert!((rate - 64.0).abs() < 1e-9);
    assert!((second.network[0].upload_mbps.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn test_disabled_network_is_not_sampled() {
    let dir = TempDir::new().unwrap();
    let (mut monitor, fakes) = build(cpu_snapshot(&dir));

    let report = monitor.tick(Instant::now());
    assert!(report.network.is_empty());
    assert_eq!(
        fakes.calls.network.load(std::sync::atomic::Ordering::SeqCst),
        0
    );
}

#[test]
fn test_disk_labels_and_mount_override() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = cpu_snapshot(&dir);
    snapshot.disk.mount_points = vec![
        sysmon::core::config::MountPointConfig::new("/", "Root"),
        sysmon::core::config::MountPointConfig {
            thresholds: Some(ThresholdConfig::new(50.0, 60.0)),
            ..sysmon::core::config::MountPointConfig::new("/data", "Data")
        },
    ];
    let (mut monitor, fakes) = build(snapshot);
    fakes.readings.lock().unwrap().disk_percent = 65.0;

    let report = monitor.tick(Instant::now());

    assert_eq!(report.disks[0].label, "Root");
    assert_eq!(report.disks[1].label, "Data");
    let disk_alerts: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| matches!(a.category, AlertCategory::Disk(_)))
        .collect();
    assert_eq!(disk_alerts.len(), 1);
    assert_eq!(disk_alerts[0].category, AlertCategory::Disk("/data".to_string()));
    assert_eq!(disk_alerts[0].severity, AlertSeverity::Critical);
}

#[tokio::test]
async fn test_stop_handle_ends_running_loop() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = cpu_snapshot(&dir);
    snapshot.update_interval = 60;
    let (mut monitor, fakes) = build(snapshot);
    let stop = monitor.stop_handle();
    assert_eq!(monitor.state(), LoopState::Stopped);

    let stopper = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(200));
        stop.stop();
    });

    tokio::time::timeout(Duration::from_secs(10), monitor.start())
        .await
        .expect("loop did not stop");
    stopper.join().unwrap();

    assert_eq!(monitor.state(), LoopState::Stopped);
    assert_eq!(monitor.ticks(), 1);
    assert_eq!(fakes.dashboard.ticks.lock().unwrap().len(), 1);
}
