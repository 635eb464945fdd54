use crate::core::system_monitor::{
    CpuSample, DiskSample, MemorySample, MetricsCollector, NetworkSample,
};
use crate::logging::Logger;

use super::statvfs::sample_paths;
use super::sysinfo_backend::SysinfoSampler;

pub struct MacosCollector {
    sampler: SysinfoSampler,
    logger: Logger,
}

impl MacosCollector {
    pub fn new(logger: Logger) -> Self {
        logger.debug(format_args!("using sysinfo backend for macos"));
        Self {
            sampler: SysinfoSampler::new(),
            logger,
        }
    }
}

impl MetricsCollector for MacosCollector {
    fn sample_cpu(&mut self) -> CpuSample {
        self.sampler.cpu()
    }

    fn sample_memory(&mut self) -> MemorySample {
        self.sampler.memory()
    }

    /// Any path works, not only volume roots; `statfs` resolves the
    /// volume that holds it.
    fn sample_disks(&mut self, mount_points: &[String]) -> Vec<DiskSample> {
        sample_paths(mount_points, &self.logger)
    }

    fn sample_network(&mut self, interfaces: &[String]) -> Vec<NetworkSample> {
        self.sampler.network(interfaces, is_loopback)
    }

    fn platform(&self) -> &'static str {
        "macos"
    }
}

// lo0, plus any extra loopback clones
fn is_loopback(name: &str) -> bool {
    name.starts_with("lo") && name[2..].chars().all(|c| c.is_ascii_digit())
}
