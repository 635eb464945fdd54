//! Terminal User Interface for system monitoring.
//!
//! Provides a real-time dashboard using ratatui.

mod dashboard;
mod render;
mod widgets;

pub use dashboard::TuiDashboard;
pub use render::render_dashboard;
pub use widgets::Palette;
