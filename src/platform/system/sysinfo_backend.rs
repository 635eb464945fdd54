//! Sampling through the `sysinfo` crate, shared by the platform
//! collectors. Each platform supplies its own mount and loopback rules.

#[cfg(target_os = "windows")]
use sysinfo::Disks;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, Networks, RefreshKind, System};

#[cfg(any(target_os = "windows", target_os = "macos"))]
use crate::core::system_monitor::CpuSample;
#[cfg(target_os = "windows")]
use crate::core::system_monitor::DiskSample;
use crate::core::system_monitor::{MemorySample, NetworkSample};

use super::interface_matches;

pub(super) struct SysinfoSampler {
    system: System,
    #[cfg(target_os = "windows")]
    disks: Disks,
    networks: Networks,
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    cpu_primed: bool,
}

impl SysinfoSampler {
    pub(super) fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());

        Self {
            system: System::new_with_specifics(refresh_kind),
            #[cfg(target_os = "windows")]
            disks: Disks::new_with_refreshed_list(),
            networks: Networks::new_with_refreshed_list(),
            #[cfg(any(target_os = "windows", target_os = "macos"))]
            cpu_primed: false,
        }
    }

    /// sysinfo derives usage from the tick delta between refreshes; the
    /// first refresh only establishes the baseline.
    #[cfg(any(target_os = "windows", target_os = "macos"))]
    pub(super) fn cpu(&mut self) -> CpuSample {
        self.system.refresh_cpu_usage();
        let cpus = self.system.cpus();
        let model = cpus
            .first()
            .map(|c| c.brand().trim().to_string())
            .unwrap_or_default();

        if !self.cpu_primed {
            self.cpu_primed = true;
            return CpuSample {
                overall_usage: 0.0,
                per_core_usage: vec![0.0; cpus.len()],
                core_count: cpus.len(),
                model,
            };
        }

        CpuSample {
            overall_usage: (self.system.global_cpu_usage() as f64).clamp(0.0, 100.0),
            per_core_usage: cpus
                .iter()
                .map(|cpu| (cpu.cpu_usage() as f64).clamp(0.0, 100.0))
                .collect(),
            core_count: cpus.len(),
            model,
        }
    }

    pub(super) fn memory(&mut self) -> MemorySample {
        self.system.refresh_memory();
        MemorySample::from_totals(
            self.system.total_memory(),
            self.system.available_memory(),
            self.system.total_swap(),
            self.system.free_swap(),
        )
    }

    /// Match requested mounts against mounted disks after `normalize`.
    #[cfg(target_os = "windows")]
    pub(super) fn disks(
        &mut self,
        mount_points: &[String],
        normalize: fn(&str) -> String,
    ) -> Vec<DiskSample> {
        self.disks.refresh(true);

        mount_points
            .iter()
            .map(|requested| {
                let wanted = normalize(requested);
                self.disks
                    .iter()
                    .find(|disk| normalize(&disk.mount_point().to_string_lossy()) == wanted)
                    .map(|disk| {
                        let total = disk.total_space();
                        let used = total.saturating_sub(disk.available_space());
                        DiskSample::new(requested, total, used)
                    })
                    .unwrap_or_else(|| DiskSample::unavailable(requested))
            })
            .collect()
    }

    pub(super) fn network(
        &mut self,
        interfaces: &[String],
        is_loopback: fn(&str) -> bool,
    ) -> Vec<NetworkSample> {
        self.networks.refresh(true);

        let mut samples: Vec<_> = self
            .networks
            .iter()
            .filter(|(name, _)| !is_loopback(name) && interface_matches(name, interfaces))
            .map(|(name, data)| {
                NetworkSample::new(name, data.total_transmitted(), data.total_received())
            })
            .collect();
        samples.sort_by(|a, b| a.interface.cmp(&b.interface));
        samples
    }
}
