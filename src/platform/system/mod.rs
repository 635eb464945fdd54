//! Per-OS metrics collectors.
//!
//! CPU ticks come from procfs on Linux; everything else goes through
//! `sysinfo`, with `statvfs(3)` for disk paths on unix.

pub mod procfs;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(any(target_os = "linux", target_os = "macos"))]
mod statvfs;
#[cfg(any(target_os = "linux", target_os = "windows", target_os = "macos"))]
mod sysinfo_backend;
#[cfg(target_os = "windows")]
mod windows;

use crate::core::system_monitor::MetricsCollector;
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
use crate::error::SysmonError;
use crate::error::Result;
use crate::logging::Logger;

#[cfg(target_os = "linux")]
pub fn new_platform_collector(logger: Logger) -> Result<Box<dyn MetricsCollector>> {
    Ok(Box::new(linux::LinuxCollector::new(logger)?))
}

#[cfg(target_os = "windows")]
pub fn new_platform_collector(logger: Logger) -> Result<Box<dyn MetricsCollector>> {
    Ok(Box::new(windows::WindowsCollector::new(logger)))
}

#[cfg(target_os = "macos")]
pub fn new_platform_collector(logger: Logger) -> Result<Box<dyn MetricsCollector>> {
    Ok(Box::new(macos::MacosCollector::new(logger)))
}

#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub fn new_platform_collector(_logger: Logger) -> Result<Box<dyn MetricsCollector>> {
    Err(SysmonError::fatal_init(format!(
        "no metrics collector for platform '{}'",
        std::env::consts::OS
    )))
}

/// An empty filter admits every interface; otherwise a name matches when
/// it equals or contains one of the filter entries.
pub fn interface_matches(name: &str, filters: &[String]) -> bool {
    filters.is_empty()
        || filters
            .iter()
            .any(|f| name == f || (!f.is_empty() && name.contains(f.as_str())))
}
