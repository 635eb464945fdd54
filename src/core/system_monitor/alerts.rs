//! Alert system for monitoring critical conditions.
//!
//! Evaluation is level-triggered: every tick recomputes the complete alert
//! set from the current samples, with no memory of earlier ticks. A value
//! that stays above a threshold raises (and logs) an alert on every tick.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::config::{AlertConfig, CpuConfig, DiskConfig, MemoryConfig, ThresholdConfig};
use crate::logging::Logger;

use super::metrics::{CpuSample, DiskSample, MemorySample};
use super::sink::{AlertSink, Notifier, TerminalBell};

const GB: u64 = 1024 * 1024 * 1024;

/// Band a value falls into relative to a threshold pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Normal,
    Warning,
    Critical,
}

impl Level {
    pub fn severity(self) -> Option<AlertSeverity> {
        match self {
            Level::Normal => None,
            Level::Warning => Some(AlertSeverity::Warning),
            Level::Critical => Some(AlertSeverity::Critical),
        }
    }
}

/// Critical if `value >= critical`, Warning if `value >= warning`, else Normal.
/// A value on a boundary belongs to the stricter band.
pub fn level(value: f64, thresholds: &ThresholdConfig) -> Level {
    if value >= thresholds.critical {
        Level::Critical
    } else if value >= thresholds.warning {
        Level::Warning
    } else {
        Level::Normal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertSeverity {
    Warning,
    Critical,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertSeverity::Warning => write!(f, "WARNING"),
            AlertSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertCategory {
    Cpu,
    Memory,
    Disk(String), // Mount point
}

impl fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertCategory::Cpu => write!(f, "CPU"),
            AlertCategory::Memory => write!(f, "Memory"),
            AlertCategory::Disk(_) => write!(f, "Disk"),
        }
    }
}

/// An individual alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub category: AlertCategory,
    pub message: String,
    pub severity: AlertSeverity,
    pub timestamp: DateTime<Local>,
}

impl Alert {
    pub fn new<S: Into<String>>(
        category: AlertCategory,
        severity: AlertSeverity,
        message: S,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            severity,
            timestamp: Local::now(),
        }
    }

    /// `[timestamp] SEVERITY - Category: message`
    pub fn log_line(&self) -> String {
        format!(
            "[{}] {} - {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.severity,
            self.category,
            self.message
        )
    }
}

/// Threshold evaluation plus the alert log and notifier side effects.
pub struct AlertEngine {
    config: AlertConfig,
    sink: Option<AlertSink>,
    notifier: Box<dyn Notifier>,
    logger: Logger,
}

impl AlertEngine {
    pub fn new(config: AlertConfig, logger: Logger) -> Self {
        Self::with_notifier(config, Box::new(TerminalBell::stderr()), logger)
    }

    pub fn with_notifier(config: AlertConfig, notifier: Box<dyn Notifier>, logger: Logger) -> Self {
        let sink = open_sink(&config, &logger);
        Self {
            config,
            sink,
            notifier,
            logger,
        }
    }

    /// Apply reloaded alert settings, reopening the log if needed.
    pub fn update_config(&mut self, config: AlertConfig) {
        let reopen = config.log_to_file != self.config.log_to_file
            || config.enabled != self.config.enabled
            || config.log_path != self.config.log_path;
        self.config = config;
        if reopen {
            self.sink = open_sink(&self.config, &self.logger);
        }
    }

    pub fn config(&self) -> &AlertConfig {
        &self.config
    }

    pub fn sink(&self) -> Option<&AlertSink> {
        self.sink.as_ref()
    }

    pub fn evaluate_cpu(&self, sample: &CpuSample, config: &CpuConfig) -> Vec<Alert> {
        let mut alerts = Vec::new();
        if !self.config.enabled || !config.enabled {
            return alerts;
        }

        let thresholds = &config.thresholds;
        match level(sample.overall_usage, thresholds) {
            Level::Critical => alerts.push(Alert::new(
                AlertCategory::Cpu,
                AlertSeverity::Critical,
                format!(
                    "CPU usage: {:.1}% (critical threshold: {}%)",
                    sample.overall_usage, thresholds.critical
                ),
            )),
            Level::Warning => alerts.push(Alert::new(
                AlertCategory::Cpu,
                AlertSeverity::Warning,
                format!(
                    "CPU usage: {:.1}% (warning threshold: {}%)",
                    sample.overall_usage, thresholds.warning
                ),
            )),
            Level::Normal => {}
        }

        // Individual hot cores, critical only
        if config.show_per_core {
            for (i, &usage) in sample.per_core_usage.iter().enumerate() {
                if level(usage, thresholds) == Level::Critical {
                    alerts.push(Alert::new(
                        AlertCategory::Cpu,
                        AlertSeverity::Critical,
                        format!("CPU Core {} usage: {:.1}% (critical)", i, usage),
                    ));
                }
            }
        }

        alerts
    }

    pub fn evaluate_memory(&self, sample: &MemorySample, config: &MemoryConfig) -> Vec<Alert> {
        if !self.config.enabled || !config.enabled {
            return Vec::new();
        }

        level(sample.usage_percent, &config.thresholds)
            .severity()
            .map(|severity| {
                Alert::new(
                    AlertCategory::Memory,
                    severity,
                    format!(
                        "Memory usage: {:.1}% ({} GB / {} GB)",
                        sample.usage_percent,
                        sample.used_bytes / GB,
                        sample.total_bytes / GB
                    ),
                )
            })
            .into_iter()
            .collect()
    }

    pub fn evaluate_disks(&self, samples: &[DiskSample], config: &DiskConfig) -> Vec<Alert> {
        if !self.config.enabled || !config.enabled {
            return Vec::new();
        }

        samples
            .iter()
            .filter_map(|disk| {
                let thresholds = config.thresholds_for(&disk.mount_point);
                level(disk.usage_percent, &thresholds).severity().map(|severity| {
                    Alert::new(
                        AlertCategory::Disk(disk.mount_point.clone()),
                        severity,
                        format!(
                            "{} ({}) usage: {:.1}% ({} GB / {} GB)",
                            disk.label,
                            disk.mount_point,
                            disk.usage_percent,
                            disk.used_bytes / GB,
                            disk.total_bytes / GB
                        ),
                    )
                })
            })
            .collect()
    }

    /// Persist every alert and notify on critical ones. Never fails.
    pub fn record(&mut self, alerts: &[Alert]) {
        for alert in alerts {
            self.logger.debug(format_args!("{}", alert.log_line()));
            if let Some(sink) = self.sink.as_mut() {
                sink.write(alert);
            }
            if alert.severity == AlertSeverity::Critical && self.config.notify_on_critical {
                self.notifier.notify(alert);
            }
        }
    }
}

fn open_sink(config: &AlertConfig, logger: &Logger) -> Option<AlertSink> {
    if config.enabled && config.log_to_file {
        Some(AlertSink::open(&config.log_path, logger.clone()))
    } else {
        None
    }
}
