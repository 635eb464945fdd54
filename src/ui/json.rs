//! JSON-lines output, one object per tick (for scripting).

use std::io::{self, Stdout, Write};

use crate::core::config::ConfigSnapshot;
use crate::core::system_monitor::{Dashboard, TickReport};
use crate::error::{Result, SysmonError};

pub struct JsonDashboard<W: Write + Send> {
    out: W,
}

impl JsonDashboard<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> JsonDashboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Dashboard for JsonDashboard<W> {
    fn update_config(&mut self, _snapshot: &ConfigSnapshot) {}

    fn render(&mut self, tick: &TickReport) -> Result<()> {
        let line = serde_json::to_string(tick)
            .map_err(|e| SysmonError::tui(format!("failed to encode tick: {}", e)))?;
        writeln!(self.out, "{}", line)?;
        self.out.flush()?;
        Ok(())
    }
}
