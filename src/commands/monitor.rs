//! System monitor command handler.
//!
//! Wires configuration, the platform collector and a dashboard into a
//! [`MonitorLoop`] and runs it until Ctrl+C.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::*;

use crate::core::config_source::FileConfigSource;
use crate::core::system_monitor::{create_metrics_collector, Dashboard, MonitorLoop};
use crate::logging::Logger;
use crate::ui::{JsonDashboard, SummaryDashboard, TuiDashboard};
use crate::{init_logging, LogOutput};

pub const DEFAULT_CONFIG_PATH: &str = "config/default_config.yaml";
pub const TUI_LOG_FILE: &str = "sysmon-debug.log";

/// Output mode selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Tui,
    Json,
    Summary,
}

impl OutputMode {
    pub fn from_flags(json: bool, once: bool) -> Self {
        match (json, once) {
            (true, _) => OutputMode::Json,
            (false, true) => OutputMode::Summary,
            (false, false) => OutputMode::Tui,
        }
    }
}

/// Explicit path, else `config/default_config.yaml` if present, else the
/// per-user config file if present. Falls back to the default path so the
/// load error names it.
pub fn resolve_config_path(explicit: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.clone();
    }

    let local = PathBuf::from(DEFAULT_CONFIG_PATH);
    if local.exists() {
        return local;
    }

    dirs::config_dir()
        .map(|dir| dir.join("sysmon").join("config.yaml"))
        .filter(|path| path.exists())
        .unwrap_or(local)
}

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let json = matches.get_flag("json");
    let once = matches.get_flag("once");
    let mode = OutputMode::from_flags(json, once);

    let level = matches
        .get_one::<log::LevelFilter>("log-level")
        .copied()
        .unwrap_or(log::LevelFilter::Info);
    let log_output = match mode {
        OutputMode::Tui => LogOutput::File(PathBuf::from(TUI_LOG_FILE)),
        _ => LogOutput::Stderr,
    };
    init_logging(level, log_output).context("Failed to initialize logging")?;

    let config_path = resolve_config_path(matches.get_one::<PathBuf>("config"));
    let mut monitor = build_monitor(&config_path, mode)?;

    if once {
        monitor.tick(Instant::now());
        return Ok(());
    }

    let stop = monitor.stop_handle();
    let quiet = mode == OutputMode::Tui;
    ctrlc::set_handler(move || {
        if !quiet {
            eprintln!("{}", "Received shutdown signal. Stopping monitor...".yellow());
        }
        stop.stop();
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Failed to start async runtime")?;
    runtime.block_on(monitor.start());

    // Dropping the loop restores the terminal before the final message
    drop(monitor);
    if mode != OutputMode::Json {
        println!("{}", "sysmon stopped.".dimmed());
    }
    Ok(())
}

fn build_monitor(config_path: &Path, mode: OutputMode) -> Result<MonitorLoop> {
    let logger = Logger::new(false);

    let source = FileConfigSource::load(config_path, logger.scoped("sysmon::config"))
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))?;

    let mut collector =
        create_metrics_collector(&logger).context("Failed to initialize metrics collector")?;

    // CPU usage needs two readings; take the first one now so the first
    // tick shows a real value.
    collector.sample_cpu();
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);

    let dashboard: Box<dyn Dashboard> = match mode {
        OutputMode::Tui => Box::new(TuiDashboard::new().context("Failed to start dashboard")?),
        OutputMode::Json => Box::new(JsonDashboard::stdout()),
        OutputMode::Summary => Box::new(SummaryDashboard::stdout()),
    };

    Ok(MonitorLoop::new(
        Box::new(source),
        collector,
        dashboard,
        logger,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Tui);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Json);
        assert_eq!(OutputMode::from_flags(false, true), OutputMode::Summary);
    }

    #[test]
    fn test_explicit_config_path_wins() {
        let path = PathBuf::from("/tmp/custom.yaml");
        assert_eq!(resolve_config_path(Some(&path)), path);
    }
}
