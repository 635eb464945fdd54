use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CpuSample {
    /// Overall busy percentage, 0-100
    pub overall_usage: f64,
    pub per_core_usage: Vec<f64>,
    pub core_count: usize,
    pub model: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySample {
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub available_bytes: u64,
    pub usage_percent: f64,
    pub swap_total_bytes: u64,
    pub swap_used_bytes: u64,
}

impl MemorySample {
    /// Build a sample from totals, deriving `used` and the percentage.
    pub fn from_totals(total: u64, available: u64, swap_total: u64, swap_free: u64) -> Self {
        let used = total.saturating_sub(available);
        Self {
            total_bytes: total,
            used_bytes: used,
            available_bytes: available,
            usage_percent: percent(used, total),
            swap_total_bytes: swap_total,
            swap_used_bytes: swap_total.saturating_sub(swap_free),
        }
    }
}

/// Usage of one requested mount. Zero-filled when the mount was unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiskSample {
    pub mount_point: String,
    pub label: String,
    pub total_bytes: u64,
    pub used_bytes: u64,
    pub usage_percent: f64,
}

impl DiskSample {
    pub fn new(mount_point: &str, total: u64, used: u64) -> Self {
        Self {
            mount_point: mount_point.to_string(),
            label: mount_point.to_string(),
            total_bytes: total,
            used_bytes: used,
            usage_percent: percent(used, total),
        }
    }

    pub fn unavailable(mount_point: &str) -> Self {
        Self::new(mount_point, 0, 0)
    }
}

/// Cumulative counters for one interface. Rates are filled in by the
/// monitor loop from [`super::SampleState`], never by a collector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSample {
    pub interface: String,
    pub bytes_sent: u64,
    pub bytes_received: u64,
    pub upload_mbps: Option<f64>,
    pub download_mbps: Option<f64>,
}

impl NetworkSample {
    pub fn new(interface: &str, bytes_sent: u64, bytes_received: u64) -> Self {
        Self {
            interface: interface.to_string(),
            bytes_sent,
            bytes_received,
            upload_mbps: None,
            download_mbps: None,
        }
    }
}

pub(crate) fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
