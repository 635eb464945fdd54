use crate::core::system_monitor::{
    CpuSample, DiskSample, MemorySample, MetricsCollector, NetworkSample,
};
use crate::logging::Logger;

use super::sysinfo_backend::SysinfoSampler;

pub struct WindowsCollector {
    sampler: SysinfoSampler,
    logger: Logger,
}

impl WindowsCollector {
    pub fn new(logger: Logger) -> Self {
        logger.debug(format_args!("using sysinfo backend for windows"));
        Self {
            sampler: SysinfoSampler::new(),
            logger,
        }
    }
}

impl MetricsCollector for WindowsCollector {
    fn sample_cpu(&mut self) -> CpuSample {
        self.sampler.cpu()
    }

    fn sample_memory(&mut self) -> MemorySample {
        self.sampler.memory()
    }

    fn sample_disks(&mut self, mount_points: &[String]) -> Vec<DiskSample> {
        let disks = self.sampler.disks(mount_points, normalize_drive);
        for disk in disks.iter().filter(|d| d.total_bytes == 0) {
            self.logger
                .debug(format_args!("drive {} unavailable", disk.mount_point));
        }
        disks
    }

    fn sample_network(&mut self, interfaces: &[String]) -> Vec<NetworkSample> {
        self.sampler.network(interfaces, is_loopback)
    }

    fn platform(&self) -> &'static str {
        "windows"
    }
}

/// `c:`, `C:\` and `c:/` all name the same drive root.
fn normalize_drive(path: &str) -> String {
    let mut drive = path.trim().replace('/', "\\").to_uppercase();
    if !drive.ends_with('\\') {
        drive.push('\\');
    }
    drive
}

fn is_loopback(name: &str) -> bool {
    name.contains("Loopback")
}
