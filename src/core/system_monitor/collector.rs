use crate::error::Result;
use crate::logging::Logger;
use crate::platform::system::new_platform_collector;

use super::metrics::*;

/// Per-platform source of raw samples.
///
/// Implementations must be best-effort per entry: a mount or interface that
/// cannot be read degrades to a zero-valued entry instead of failing the
/// batch. Network samples carry cumulative counters only; rates need state
/// across ticks and are derived by the caller.
pub trait MetricsCollector: Send {
    fn sample_cpu(&mut self) -> CpuSample;

    fn sample_memory(&mut self) -> MemorySample;

    /// One entry per requested mount, in request order.
    fn sample_disks(&mut self, mount_points: &[String]) -> Vec<DiskSample>;

    /// Empty `interfaces` means every discoverable non-loopback interface.
    fn sample_network(&mut self, interfaces: &[String]) -> Vec<NetworkSample>;

    /// Short platform name for diagnostics
    fn platform(&self) -> &'static str;
}

/// Select the collector for the running platform.
///
/// Fails with a fatal init error on platforms without an implementation.
pub fn create_metrics_collector(logger: &Logger) -> Result<Box<dyn MetricsCollector>> {
    let collector = new_platform_collector(logger.scoped("sysmon::collector"))?;
    logger.debug(format_args!(
        "using {} metrics collector",
        collector.platform()
    ));
    Ok(collector)
}

/// Cumulative busy/idle tick counters from one read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CpuTicks {
    pub total: u64,
    pub idle: u64,
}

impl CpuTicks {
    pub fn new(total: u64, idle: u64) -> Self {
        Self { total, idle }
    }
}

/// `100 * (1 - idle_delta / total_delta)` between two reads.
///
/// A non-positive total delta (counter anomaly, or the same read twice)
/// yields 0. The result is clamped to [0, 100].
pub fn cpu_usage_percent(previous: CpuTicks, current: CpuTicks) -> f64 {
    if current.total <= previous.total {
        return 0.0;
    }
    let total_delta = (current.total - previous.total) as f64;
    let idle_delta = current.idle.saturating_sub(previous.idle) as f64;

    (100.0 * (1.0 - idle_delta / total_delta)).clamp(0.0, 100.0)
}

/// Keeps the previous tick counters for the overall CPU and each core.
#[derive(Debug, Default)]
pub struct CpuBaseline {
    overall: Option<CpuTicks>,
    per_core: Vec<CpuTicks>,
}

impl CpuBaseline {
    /// Usage since the last call. The first call only records a baseline
    /// and reports 0 for everything.
    pub fn advance(&mut self, overall: CpuTicks, per_core: &[CpuTicks]) -> (f64, Vec<f64>) {
        let overall_usage = self
            .overall
            .map(|prev| cpu_usage_percent(prev, overall))
            .unwrap_or(0.0);

        let core_usage = per_core
            .iter()
            .enumerate()
            .map(|(i, &now)| {
                self.per_core
                    .get(i)
                    .map(|&prev| cpu_usage_percent(prev, now))
                    .unwrap_or(0.0)
            })
            .collect();

        self.overall = Some(overall);
        self.per_core = per_core.to_vec();

        (overall_usage, core_usage)
    }
}
