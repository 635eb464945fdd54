use std::fs;

use crate::core::system_monitor::{
    CpuBaseline, CpuSample, DiskSample, MemorySample, MetricsCollector, NetworkSample,
};
use crate::error::{Result, SysmonError};
use crate::logging::Logger;

use super::procfs::{parse_cpu_model, parse_proc_stat};
use super::statvfs::sample_paths;
use super::sysinfo_backend::SysinfoSampler;

const PROC_STAT: &str = "/proc/stat";
const PROC_CPUINFO: &str = "/proc/cpuinfo";

/// CPU ticks from `/proc/stat`, disks from `statvfs(3)`, memory and
/// network counters through sysinfo.
pub struct LinuxCollector {
    sampler: SysinfoSampler,
    cpu_baseline: CpuBaseline,
    model: String,
    logger: Logger,
}

impl LinuxCollector {
    pub fn new(logger: Logger) -> Result<Self> {
        let stat = fs::read_to_string(PROC_STAT)
            .map_err(|e| SysmonError::fatal_init(format!("cannot read {}: {}", PROC_STAT, e)))?;
        if parse_proc_stat(&stat).is_none() {
            return Err(SysmonError::fatal_init(format!(
                "unrecognized format in {}",
                PROC_STAT
            )));
        }

        let model = fs::read_to_string(PROC_CPUINFO)
            .ok()
            .and_then(|text| parse_cpu_model(&text))
            .unwrap_or_default();

        Ok(Self {
            sampler: SysinfoSampler::new(),
            cpu_baseline: CpuBaseline::default(),
            model,
            logger,
        })
    }
}

impl MetricsCollector for LinuxCollector {
    fn sample_cpu(&mut self) -> CpuSample {
        let stat = match fs::read_to_string(PROC_STAT) {
            Ok(text) => parse_proc_stat(&text),
            Err(e) => {
                self.logger
                    .debug(format_args!("cannot read {}: {}", PROC_STAT, e));
                None
            }
        };
        let Some((overall, per_core)) = stat else {
            return CpuSample {
                model: self.model.clone(),
                ..Default::default()
            };
        };

        let (overall_usage, per_core_usage) = self.cpu_baseline.advance(overall, &per_core);
        CpuSample {
            overall_usage,
            core_count: per_core_usage.len(),
            per_core_usage,
            model: self.model.clone(),
        }
    }

    fn sample_memory(&mut self) -> MemorySample {
        self.sampler.memory()
    }

    fn sample_disks(&mut self, mount_points: &[String]) -> Vec<DiskSample> {
        sample_paths(mount_points, &self.logger)
    }

    fn sample_network(&mut self, interfaces: &[String]) -> Vec<NetworkSample> {
        self.sampler.network(interfaces, is_loopback)
    }

    fn platform(&self) -> &'static str {
        "linux"
    }
}

fn is_loopback(name: &str) -> bool {
    name == "lo"
}
