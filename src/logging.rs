//! Component loggers.
//!
//! Every component receives a [`Logger`] in its constructor instead of
//! consulting a process-wide debug switch. All loggers created from the same
//! root share one debug flag, so a config reload can turn verbose output on
//! or off for the whole monitor at once.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Handle over the `log` facade, scoped to one component.
#[derive(Clone)]
pub struct Logger {
    target: &'static str,
    debug: Arc<AtomicBool>,
}

impl Logger {
    /// Root logger for the monitor.
    pub fn new(debug: bool) -> Self {
        Self {
            target: "sysmon",
            debug: Arc::new(AtomicBool::new(debug)),
        }
    }

    /// Logger for a sub-component, sharing the root's debug flag.
    pub fn scoped(&self, target: &'static str) -> Self {
        Self {
            target,
            debug: Arc::clone(&self.debug),
        }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn set_debug(&self, enabled: bool) {
        self.debug.store(enabled, Ordering::Relaxed);
    }

    pub fn debug_enabled(&self) -> bool {
        self.debug.load(Ordering::Relaxed)
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.debug_enabled() {
            log::debug!(target: self.target, "{}", args);
        }
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        log::info!(target: self.target, "{}", args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        log::warn!(target: self.target, "{}", args);
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        log::error!(target: self.target, "{}", args);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("target", &self.target)
            .field("debug", &self.debug_enabled())
            .finish()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}
