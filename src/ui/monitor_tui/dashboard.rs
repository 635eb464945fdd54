use std::io::{self, Stdout};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::config::ConfigSnapshot;
use crate::core::system_monitor::{Dashboard, TickReport};
use crate::error::{Result, SysmonError};

use super::render::render_dashboard;

/// Full-screen dashboard on the alternate screen.
///
/// Raw mode stays off so Ctrl+C still reaches the process as SIGINT and
/// goes through the stop handle.
pub struct TuiDashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    config: ConfigSnapshot,
}

impl TuiDashboard {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide)
            .map_err(|e| SysmonError::tui(format!("failed to enter alternate screen: {}", e)))?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| SysmonError::tui(format!("failed to create terminal: {}", e)))?;

        Ok(Self {
            terminal,
            config: ConfigSnapshot::default(),
        })
    }
}

impl Dashboard for TuiDashboard {
    fn update_config(&mut self, snapshot: &ConfigSnapshot) {
        self.config = snapshot.clone();
    }

    fn render(&mut self, tick: &TickReport) -> Result<()> {
        let config = &self.config;
        self.terminal
            .draw(|frame| render_dashboard(frame, tick, config))
            .map_err(|e| SysmonError::tui(format!("draw failed: {}", e)))?;
        Ok(())
    }
}

impl Drop for TuiDashboard {
    fn drop(&mut self) {
        // Best effort; nothing useful to do if the terminal is gone
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen, Show);
    }
}
