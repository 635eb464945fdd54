//! Differential state for network counters.
//!
//! Collectors report cumulative byte counters. Turning them into bandwidth
//! needs the previous reading of the same interface, which lives here for
//! the lifetime of the monitor loop.

use std::collections::HashMap;
use std::time::Instant;

use super::metrics::NetworkSample;

/// `(bytes_delta * 8) / (seconds * 1_000_000)`, in megabits per second.
///
/// Returns `None` when `seconds <= 0`. A counter that went backwards
/// (adapter reset) is treated as a fresh baseline counted from zero.
pub fn rate_mbps(previous_bytes: u64, current_bytes: u64, seconds: f64) -> Option<f64> {
    if seconds <= 0.0 {
        return None;
    }
    let delta = if current_bytes < previous_bytes {
        current_bytes
    } else {
        current_bytes - previous_bytes
    };
    Some((delta as f64 * 8.0) / (seconds * 1_000_000.0))
}

#[derive(Debug, Clone, Copy)]
struct InterfaceState {
    bytes_sent: u64,
    bytes_received: u64,
    observed_at: Instant,
    upload_mbps: Option<f64>,
    download_mbps: Option<f64>,
}

/// Last observation per interface name. Entries are never pruned.
#[derive(Debug, Default)]
pub struct SampleState {
    interfaces: HashMap<String, InterfaceState>,
}

impl SampleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill in `upload_mbps`/`download_mbps` for each sample observed at `now`.
    ///
    /// - first sighting: record the baseline, report no rate
    /// - no time elapsed: keep the prior rate (0 if none) and the old baseline
    /// - otherwise: derive the rate and advance the baseline
    pub fn update(&mut self, samples: &mut [NetworkSample], now: Instant) {
        for sample in samples.iter_mut() {
            match self.interfaces.get_mut(&sample.interface) {
                None => {
                    self.interfaces.insert(
                        sample.interface.clone(),
                        InterfaceState {
                            bytes_sent: sample.bytes_sent,
                            bytes_received: sample.bytes_received,
                            observed_at: now,
                            upload_mbps: None,
                            download_mbps: None,
                        },
                    );
                    sample.upload_mbps = None;
                    sample.download_mbps = None;
                }
                Some(state) => {
                    let seconds = now
                        .checked_duration_since(state.observed_at)
                        .map(|d| d.as_secs_f64())
                        .unwrap_or(0.0);

                    let upload = rate_mbps(state.bytes_sent, sample.bytes_sent, seconds);
                    let download =
                        rate_mbps(state.bytes_received, sample.bytes_received, seconds);

                    match (upload, download) {
                        (Some(up), Some(down)) => {
                            *state = InterfaceState {
                                bytes_sent: sample.bytes_sent,
                                bytes_received: sample.bytes_received,
                                observed_at: now,
                                upload_mbps: Some(up),
                                download_mbps: Some(down),
                            };
                        }
                        _ => {
                            state.upload_mbps = Some(state.upload_mbps.unwrap_or(0.0));
                            state.download_mbps = Some(state.download_mbps.unwrap_or(0.0));
                        }
                    }

                    sample.upload_mbps = state.upload_mbps;
                    sample.download_mbps = state.download_mbps;
                }
            }
        }
    }

    pub fn tracked_interfaces(&self) -> usize {
        self.interfaces.len()
    }
}
