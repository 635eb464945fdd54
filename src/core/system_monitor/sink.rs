//! Alert log file and critical-alert notification.

use std::fs::{File, OpenOptions};
use std::io::{self, Stderr, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SysmonError};
use crate::logging::Logger;

use super::alerts::Alert;

/// Append-only alert log, one line per alert.
///
/// Write failures never propagate to the monitor loop: the first failure is
/// logged as a warning, later ones are dropped silently.
pub struct AlertSink {
    path: PathBuf,
    file: Option<File>,
    warned: bool,
    logger: Logger,
}

impl AlertSink {
    pub fn open<P: AsRef<Path>>(path: P, logger: Logger) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut sink = Self {
            path,
            file: None,
            warned: false,
            logger,
        };
        match OpenOptions::new().create(true).append(true).open(&sink.path) {
            Ok(file) => sink.file = Some(file),
            Err(e) => sink.warn_once(&SysmonError::from(e)),
        }
        sink
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True once a write or open has failed.
    pub fn is_degraded(&self) -> bool {
        self.warned
    }

    pub fn write(&mut self, alert: &Alert) {
        if let Err(e) = self.append(alert) {
            self.warn_once(&e);
        }
    }

    fn append(&mut self, alert: &Alert) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| SysmonError::sink("log file is not open"))?;
        writeln!(file, "{}", alert.log_line())?;
        file.flush()?;
        Ok(())
    }

    fn warn_once(&mut self, error: &SysmonError) {
        if !self.warned {
            self.warned = true;
            self.logger.warn(format_args!(
                "cannot write alert log {}: {}; alerts will not be persisted",
                self.path.display(),
                error
            ));
        }
    }
}

/// Audible/visual signal for critical alerts.
pub trait Notifier: Send {
    fn notify(&mut self, alert: &Alert);
}

/// Rings the terminal bell.
///
/// Goes to stderr by default so stdout stays clean for `--json` lines.
#[derive(Debug)]
pub struct TerminalBell<W: Write + Send = Stderr> {
    out: W,
}

impl TerminalBell<Stderr> {
    pub fn stderr() -> Self {
        Self { out: io::stderr() }
    }
}

impl Default for TerminalBell<Stderr> {
    fn default() -> Self {
        Self::stderr()
    }
}

impl<W: Write + Send> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Notifier for TerminalBell<W> {
    fn notify(&mut self, _alert: &Alert) {
        let _ = self.out.write_all(b"\x07");
        let _ = self.out.flush();
    }
}
