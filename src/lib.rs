// sysmon library - public API

// Re-export error types
pub mod error;
pub use error::{Result, SysmonError};

// Module declarations
pub mod commands;
pub mod core;
pub mod logging;
pub mod platform;
pub mod ui;

// Re-export commonly used types
pub use core::config::ConfigSnapshot;
pub use core::system_monitor::{MonitorLoop, StopHandle};
pub use logging::Logger;

use std::fs::OpenOptions;
use std::path::PathBuf;

/// Where diagnostic log records go.
#[derive(Debug, Clone)]
pub enum LogOutput {
    Stderr,
    /// Appended to a file; used while the dashboard owns the terminal
    File(PathBuf),
}

/// Initialize logging.
///
/// `RUST_LOG` wins when set. Otherwise `level` applies, and records from
/// sysmon's own targets are let through down to debug whenever `level`
/// is info or more verbose, so the `debug_logging` switch in the
/// configuration can turn them on at runtime.
pub fn init_logging(level: log::LevelFilter, output: LogOutput) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();

    if std::env::var_os("RUST_LOG").is_none() {
        let own_level = if level >= log::LevelFilter::Info {
            log::LevelFilter::Debug
        } else {
            level
        };
        builder.filter_level(level).filter_module("sysmon", own_level);
    }

    if let LogOutput::File(path) = output {
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .map_err(|e| SysmonError::fatal_init(format!("failed to initialize logging: {}", e)))
}
