//! Configuration snapshot.
//!
//! A [`ConfigSnapshot`] is parsed from YAML, filled with defaults for omitted
//! keys, normalized and validated as a whole. Once built it is never mutated;
//! hot reload replaces the entire snapshot (see [`super::config_source`]).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SysmonError};

/// Warning/critical percentage pair for one metric family.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub warning: f64,
    pub critical: f64,
}

impl ThresholdConfig {
    pub const fn new(warning: f64, critical: f64) -> Self {
        Self { warning, critical }
    }

    /// Holds when `0 <= warning < critical <= 100`
    pub fn validate(&self) -> bool {
        (0.0..=100.0).contains(&self.warning)
            && (0.0..=100.0).contains(&self.critical)
            && self.warning < self.critical
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self::new(70.0, 90.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuConfig {
    pub enabled: bool,
    pub thresholds: ThresholdConfig,
    pub show_per_core: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thresholds: ThresholdConfig::new(70.0, 90.0),
            show_per_core: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub enabled: bool,
    pub thresholds: ThresholdConfig,
    pub show_swap: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thresholds: ThresholdConfig::new(80.0, 95.0),
            show_swap: true,
        }
    }
}

/// A monitored mount point. `thresholds` overrides the disk family's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountPointConfig {
    pub path: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<ThresholdConfig>,
}

impl MountPointConfig {
    pub fn new<P: Into<String>, L: Into<String>>(path: P, label: L) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            thresholds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskConfig {
    pub enabled: bool,
    pub thresholds: ThresholdConfig,
    pub mount_points: Vec<MountPointConfig>,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            thresholds: ThresholdConfig::new(75.0, 90.0),
            mount_points: Vec::new(),
        }
    }
}

impl DiskConfig {
    /// Thresholds in force for `path`: the mount's own override, else the family's.
    pub fn thresholds_for(&self, path: &str) -> ThresholdConfig {
        self.mount_points
            .iter()
            .find(|mp| mp.path == path)
            .and_then(|mp| mp.thresholds)
            .unwrap_or(self.thresholds)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub enabled: bool,
    /// Upload rate shown as a full bar on the dashboard (Mbps)
    pub upload_mbps: f64,
    /// Download rate shown as a full bar on the dashboard (Mbps)
    pub download_mbps: f64,
    /// Interface filter; empty means every discoverable interface
    pub interfaces: Vec<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            upload_mbps: 10.0,
            download_mbps: 50.0,
            interfaces: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Default,
    Mono,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_scheme: ColorScheme,
    pub refresh_rate: u32,
    pub show_graphs: bool,
    pub graph_height: u16,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            refresh_rate: 1,
            show_graphs: true,
            graph_height: 10,
        }
    }
}

/// Alert evaluation and alert log settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    pub enabled: bool,
    #[serde(alias = "beep_on_critical")]
    pub notify_on_critical: bool,
    pub log_to_file: bool,
    pub log_path: PathBuf,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            notify_on_critical: false,
            log_to_file: true,
            log_path: PathBuf::from("./sysmon.log"),
        }
    }
}

/// Threshold sets handed to the dashboard alongside each tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSet {
    pub cpu: ThresholdConfig,
    pub memory: ThresholdConfig,
    pub disk: ThresholdConfig,
}

/// Complete, validated configuration in force for a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSnapshot {
    pub version: String,
    /// Seconds between ticks
    pub update_interval: u64,
    pub history_size: usize,
    pub debug_logging: bool,
    pub cpu: CpuConfig,
    pub memory: MemoryConfig,
    pub disk: DiskConfig,
    pub network: NetworkConfig,
    pub display: DisplayConfig,
    pub alerts: AlertConfig,
}

impl Default for ConfigSnapshot {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            update_interval: 2,
            history_size: 30,
            debug_logging: false,
            cpu: CpuConfig::default(),
            memory: MemoryConfig::default(),
            disk: DiskConfig::default(),
            network: NetworkConfig::default(),
            display: DisplayConfig::default(),
            alerts: AlertConfig::default(),
        }
    }
}

impl ConfigSnapshot {
    /// Parse, normalize and validate a YAML document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let mut snapshot: ConfigSnapshot = if text.trim().is_empty() {
            ConfigSnapshot::default()
        } else {
            serde_yml::from_str(text)
                .map_err(|e| SysmonError::config(format!("invalid YAML: {}", e)))?
        };
        snapshot.normalize();
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Fill in derived defaults: a platform root mount when none is listed,
    /// and labels for unlabeled mounts.
    pub fn normalize(&mut self) {
        if self.disk.mount_points.is_empty() {
            self.disk.mount_points.push(default_mount_point());
        }
        for mp in &mut self.disk.mount_points {
            if mp.label.trim().is_empty() {
                mp.label = mp.path.clone();
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.update_interval == 0 {
            return Err(SysmonError::config(
                "update_interval must be greater than zero",
            ));
        }
        if self.history_size == 0 {
            return Err(SysmonError::config("history_size must be greater than zero"));
        }
        if !self.cpu.thresholds.validate() {
            return Err(SysmonError::config(
                "CPU thresholds invalid: warning must be less than critical",
            ));
        }
        if !self.memory.thresholds.validate() {
            return Err(SysmonError::config(
                "Memory thresholds invalid: warning must be less than critical",
            ));
        }
        if !self.disk.thresholds.validate() {
            return Err(SysmonError::config(
                "Disk thresholds invalid: warning must be less than critical",
            ));
        }
        for mp in &self.disk.mount_points {
            if mp.path.trim().is_empty() {
                return Err(SysmonError::config("mount point path must not be empty"));
            }
            if let Some(t) = mp.thresholds {
                if !t.validate() {
                    return Err(SysmonError::config(format!(
                        "Thresholds for mount '{}' invalid: warning must be less than critical",
                        mp.path
                    )));
                }
            }
        }
        if self.network.upload_mbps < 0.0 || self.network.download_mbps < 0.0 {
            return Err(SysmonError::config(
                "network bandwidth scales must not be negative",
            ));
        }
        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.update_interval)
    }

    pub fn thresholds(&self) -> ThresholdSet {
        ThresholdSet {
            cpu: self.cpu.thresholds,
            memory: self.memory.thresholds,
            disk: self.disk.thresholds,
        }
    }

    pub fn mount_paths(&self) -> Vec<String> {
        self.disk
            .mount_points
            .iter()
            .map(|mp| mp.path.clone())
            .collect()
    }
}

#[cfg(windows)]
fn default_mount_point() -> MountPointConfig {
    MountPointConfig::new("C:\\", "System")
}

#[cfg(not(windows))]
fn default_mount_point() -> MountPointConfig {
    MountPointConfig::new("/", "Root")
}
