use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use sysmon::core::config::AlertConfig;
use sysmon::core::config_source::StaticConfigSource;
use sysmon::core::system_monitor::{Alert, AlertEngine, AlertSeverity, MonitorLoop, Notifier};
use sysmon::logging::Logger;
use sysmon::ui::JsonDashboard;
use tempfile::TempDir;

use super::support::{snapshot_with_log, FakeCollector, RecordingDashboard, SharedBuffer};

struct CountingNotifier(Arc<AtomicUsize>);

impl Notifier for CountingNotifier {
    fn notify(&mut self, _alert: &Alert) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn test_unwritable_log_still_reports_alerts() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("missing").join("alerts.log");
    let snapshot = snapshot_with_log(&log_path);

    let (collector, readings, _calls) = FakeCollector::new();
    readings.lock().unwrap().cpu = 95.0;
    let dashboard = RecordingDashboard::default();
    let mut monitor = MonitorLoop::new(
        Box::new(StaticConfigSource::new(snapshot)),
        Box::new(collector),
        Box::new(dashboard.clone()),
        Logger::default(),
    );

    for _ in 0..2 {
        let report = monitor.tick(Instant::now());
        assert_eq!(report.alerts.len(), 1);
        assert_eq!(report.alerts[0].severity, AlertSeverity::Critical);
    }

    let sink = monitor.alert_engine().sink().unwrap();
    assert!(sink.is_degraded());
    assert!(!log_path.exists());
    assert_eq!(dashboard.ticks.lock().unwrap()[1].alerts.len(), 1);
}

#[test]
fn test_log_disabled_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("alerts.log");
    let mut snapshot = snapshot_with_log(&log_path);
    snapshot.alerts.log_to_file = false;

    let (collector, readings, _calls) = FakeCollector::new();
    readings.lock().unwrap().cpu = 95.0;
    let mut monitor = MonitorLoop::new(
        Box::new(StaticConfigSource::new(snapshot)),
        Box::new(collector),
        Box::new(RecordingDashboard::default()),
        Logger::default(),
    );

    let report = monitor.tick(Instant::now());
    assert_eq!(report.alerts.len(), 1);
    assert!(monitor.alert_engine().sink().is_none());
    assert!(!log_path.exists());
}

#[test]
fn test_critical_notification_only_when_enabled() {
    let dir = TempDir::new().unwrap();
    let log_path = dir.path().join("alerts.log");
    let notified = Arc::new(AtomicUsize::new(0));

    let mut snapshot = snapshot_with_log(&log_path);
    snapshot.alerts.notify_on_critical = true;
    let engine = AlertEngine::with_notifier(
        snapshot.alerts.clone(),
        Box::new(CountingNotifier(Arc::clone(&notified))),
        Logger::default(),
    );

    let (collector, readings, _calls) = FakeCollector::new();
    let mut monitor = MonitorLoop::new(
        Box::new(StaticConfigSource::new(snapshot)),
        Box::new(collector),
        Box::new(RecordingDashboard::default()),
        Logger::default(),
    )
    .with_alert_engine(engine);

    // Warning only
    readings.lock().unwrap().cpu = 75.0;
    monitor.tick(Instant::now());
    assert_eq!(notified.load(Ordering::SeqCst), 0);

    readings.lock().unwrap().cpu = 95.0;
    monitor.tick(Instant::now());
    assert_eq!(notified.load(Ordering::SeqCst), 1);

    let log = fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.lines().next().unwrap().contains("WARNING - CPU"));
}

#[test]
fn test_critical_json_lines_stay_parseable() {
    let dir = TempDir::new().unwrap();
    let mut snapshot = snapshot_with_log(&dir.path().join("alerts.log"));
    snapshot.alerts.notify_on_critical = true;

    let (collector, readings, _calls) = FakeCollector::new();
    readings.lock().unwrap().memory_percent = 99.0;
    let stdout = SharedBuffer::default();
    let mut monitor = MonitorLoop::new(
        Box::new(StaticConfigSource::new(snapshot)),
        Box::new(collector),
        Box::new(JsonDashboard::new(stdout.clone())),
        Logger::default(),
    );

    monitor.tick(Instant::now());
    monitor.tick(Instant::now());

    let output = stdout.contents();
    assert!(!output.contains('\x07'));
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let tick: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(tick["alerts"][0]["severity"], "Critical");
    }
}

#[test]
fn test_engine_reopens_log_on_path_change() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.log");
    let second = dir.path().join("second.log");

    let mut config = AlertConfig {
        log_path: first.clone(),
        ..AlertConfig::default()
    };
    let mut engine = AlertEngine::new(config.clone(), Logger::default());
    assert_eq!(engine.sink().unwrap().path(), first.as_path());

    config.log_path = second.clone();
    engine.update_config(config);
    assert_eq!(engine.sink().unwrap().path(), second.as_path());
    assert!(second.exists());
}
