//! Plain colored text report, used for single-shot runs.

use std::io::{self, Stdout, Write};

use colored::*;

use crate::core::config::{ConfigSnapshot, ThresholdConfig};
use crate::core::system_monitor::{level, AlertSeverity, Dashboard, Level, TickReport};
use crate::error::Result;

use super::formatters::{format_bytes, format_rate};

pub struct SummaryDashboard<W: Write + Send> {
    out: W,
    config: ConfigSnapshot,
}

impl SummaryDashboard<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> SummaryDashboard<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            config: ConfigSnapshot::default(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn colored_percent(value: f64, thresholds: &ThresholdConfig) -> ColoredString {
    let text = format!("{:.1}%", value);
    match level(value, thresholds) {
        Level::Critical => text.red().bold(),
        Level::Warning => text.yellow(),
        Level::Normal => text.green(),
    }
}

impl<W: Write + Send> Dashboard for SummaryDashboard<W> {
    fn update_config(&mut self, snapshot: &ConfigSnapshot) {
        self.config = snapshot.clone();
    }

    fn render(&mut self, tick: &TickReport) -> Result<()> {
        let config = &self.config;
        let out = &mut self.out;

        writeln!(
            out,
            "{} {}",
            "System Monitor".bold(),
            tick.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
        )?;

        if let Some(cpu) = &tick.cpu {
            writeln!(out)?;
            writeln!(out, "{}", "CPU".cyan().bold())?;
            if !cpu.model.is_empty() {
                writeln!(out, "  Model: {}", cpu.model)?;
            }
            writeln!(
                out,
                "  Usage: {} ({} cores)",
                colored_percent(cpu.overall_usage, &config.cpu.thresholds),
                cpu.core_count
            )?;
            if config.cpu.show_per_core {
                let cores: Vec<String> = cpu
                    .per_core_usage
                    .iter()
                    .enumerate()
                    .map(|(i, u)| format!("C{}: {}", i, colored_percent(*u, &config.cpu.thresholds)))
                    .collect();
                writeln!(out, "  {}", cores.join("  "))?;
            }
        }

        if let Some(mem) = &tick.memory {
            writeln!(out)?;
            writeln!(out, "{}", "Memory".cyan().bold())?;
            writeln!(
                out,
                "  Used: {} / {} ({})",
                format_bytes(mem.used_bytes),
                format_bytes(mem.total_bytes),
                colored_percent(mem.usage_percent, &config.memory.thresholds)
            )?;
            if config.memory.show_swap && mem.swap_total_bytes > 0 {
                writeln!(
                    out,
                    "  Swap: {} / {}",
                    format_bytes(mem.swap_used_bytes),
                    format_bytes(mem.swap_total_bytes)
                )?;
            }
        }

        if !tick.disks.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Disks".cyan().bold())?;
            for disk in &tick.disks {
                if disk.total_bytes == 0 {
                    writeln!(
                        out,
                        "  {} ({}): {}",
                        disk.label,
                        disk.mount_point,
                        "unavailable".dimmed()
                    )?;
                    continue;
                }
                let thresholds = config.disk.thresholds_for(&disk.mount_point);
                writeln!(
                    out,
                    "  {} ({}): {} / {} ({})",
                    disk.label,
                    disk.mount_point,
                    format_bytes(disk.used_bytes),
                    format_bytes(disk.total_bytes),
                    colored_percent(disk.usage_percent, &thresholds)
                )?;
            }
        }

        if config.network.enabled {
            writeln!(out)?;
            writeln!(out, "{}", "Network".cyan().bold())?;
            for net in &tick.network {
                writeln!(
                    out,
                    "  {}: up {} down {}",
                    net.interface,
                    format_rate(net.upload_mbps),
                    format_rate(net.download_mbps)
                )?;
            }
        }

        if !tick.alerts.is_empty() {
            writeln!(out)?;
            writeln!(out, "{}", "Alerts".bold())?;
            for alert in &tick.alerts {
                let line = format!("  [{}] {}: {}", alert.severity, alert.category, alert.message);
                let line = match alert.severity {
                    AlertSeverity::Critical => line.red().bold(),
                    AlertSeverity::Warning => line.yellow(),
                };
                writeln!(out, "{}", line)?;
            }
        }

        out.flush()?;
        Ok(())
    }
}
