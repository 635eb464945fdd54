use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, Instant, SystemTime};

use sysmon::core::config_source::{ConfigSource, FileConfigSource};
use sysmon::core::system_monitor::{AlertSeverity, MonitorLoop};
use sysmon::logging::Logger;
use tempfile::TempDir;

use super::support::{FakeCollector, RecordingDashboard};

const BASE_CONFIG: &str = r#"
version: "1.0"
update_interval: 2
history_size: 30
cpu:
  enabled: true
  thresholds: { warning: 70, critical: 90 }
"#;

/// Write `contents` and stamp the file `offset_secs` past a fixed base so
/// consecutive writes always look modified.
fn write_config(path: &Path, contents: &str, offset_secs: u64) {
    fs::write(path, contents).unwrap();
    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(stamp)
        .unwrap();
}

#[test]
fn test_unchanged_file_does_not_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(&path, BASE_CONFIG, 0);

    let mut source = FileConfigSource::load(&path, Logger::default()).unwrap();
    assert!(!source.check_and_reload());
    assert!(!source.check_and_reload());
    assert_eq!(source.current().cpu.thresholds.critical, 90.0);
}

#[test]
fn test_changed_valid_file_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(&path, BASE_CONFIG, 0);
    let mut source = FileConfigSource::load(&path, Logger::default()).unwrap();

    write_config(&path, &BASE_CONFIG.replace("critical: 90", "critical: 85"), 10);

    assert!(source.check_and_reload());
    assert_eq!(source.current().cpu.thresholds.critical, 85.0);
    assert!(!source.check_and_reload());
}

#[test]
fn test_changed_invalid_file_keeps_previous() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(&path, BASE_CONFIG, 0);
    let mut source = FileConfigSource::load(&path, Logger::default()).unwrap();
    let before = source.current();

    // warning above critical
    write_config(&path, &BASE_CONFIG.replace("warning: 70", "warning: 95"), 10);
    assert!(!source.check_and_reload());
    assert_eq!(*source.current(), *before);

    // Still rejected on the next check without re-reporting
    assert!(!source.check_and_reload());

    // A later valid edit is picked up
    write_config(&path, &BASE_CONFIG.replace("critical: 90", "critical: 80"), 20);
    assert!(source.check_and_reload());
    assert_eq!(source.current().cpu.thresholds.critical, 80.0);
}

#[test]
fn test_malformed_yaml_keeps_previous() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    write_config(&path, BASE_CONFIG, 0);
    let mut source = FileConfigSource::load(&path, Logger::default()).unwrap();

    write_config(&path, "cpu: [unclosed", 10);
    assert!(!source.check_and_reload());
    assert_eq!(source.current().update_interval, 2);
}

#[test]
fn test_missing_file_is_fatal_at_startup() {
    let dir = TempDir::new().unwrap();
    let err = FileConfigSource::load(dir.path().join("absent.yaml"), Logger::default())
        .err()
        .unwrap();
    assert!(err.is_fatal());
    assert!(matches!(err, sysmon::SysmonError::Config(_)));
}

#[test]
fn test_reload_applies_new_thresholds_to_loop() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    let config = format!(
        "{}\nalerts:\n  log_path: '{}'\n",
        BASE_CONFIG,
        dir.path().join("alerts.log").display()
    );
    write_config(&path, &config, 0);

    let source = FileConfigSource::load(&path, Logger::default()).unwrap();
    let (collector, readings, _calls) = FakeCollector::new();
    readings.lock().unwrap().cpu = 85.0;
    let dashboard = RecordingDashboard::default();
    let mut monitor = MonitorLoop::new(
        Box::new(source),
        Box::new(collector),
        Box::new(dashboard.clone()),
        Logger::default(),
    );

    let report = monitor.tick(Instant::now());
    assert_eq!(report.alerts[0].severity, AlertSeverity::Warning);

    write_config(&path, &config.replace("critical: 90", "critical: 80"), 10);
    let report = monitor.tick(Instant::now());
    assert_eq!(report.alerts[0].severity, AlertSeverity::Critical);
    assert_eq!(report.thresholds.cpu.critical, 80.0);

    // Initial snapshot plus the reloaded one
    assert_eq!(dashboard.configs.lock().unwrap().len(), 2);
}
