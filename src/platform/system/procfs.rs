//! Parsers for the Linux `/proc/stat` and `/proc/cpuinfo` text.
//!
//! Kept free of I/O so they can be exercised against fixture text on any
//! platform.

use crate::core::system_monitor::CpuTicks;

/// Aggregate and per-core tick counters from `/proc/stat`.
///
/// `total` sums user, nice, system, idle, iowait, irq, softirq and steal
/// (guest time is already part of user); `idle` is idle + iowait.
pub fn parse_proc_stat(text: &str) -> Option<(CpuTicks, Vec<CpuTicks>)> {
    let mut overall = None;
    let mut per_core = Vec::new();

    for line in text.lines() {
        let mut fields = line.split_whitespace();
        let Some(label) = fields.next() else {
            continue;
        };
        if !label.starts_with("cpu") {
            // cpu lines come first; anything else ends the block
            if overall.is_some() {
                break;
            }
            continue;
        }

        let values: Vec<u64> = fields.take(8).filter_map(|v| v.parse().ok()).collect();
        if values.len() < 4 {
            continue;
        }
        let total: u64 = values.iter().sum();
        let idle = values[3] + values.get(4).copied().unwrap_or(0);
        let ticks = CpuTicks::new(total, idle);

        if label == "cpu" {
            overall = Some(ticks);
        } else {
            per_core.push(ticks);
        }
    }

    overall.map(|o| (o, per_core))
}

/// Processor model from `/proc/cpuinfo`.
pub fn parse_cpu_model(text: &str) -> Option<String> {
    text.lines()
        .find(|line| line.starts_with("model name"))
        .and_then(|line| line.split_once(':'))
        .map(|(_, model)| model.trim().to_string())
        .filter(|model| !model.is_empty())
}
