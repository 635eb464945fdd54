// UI and formatting module

pub mod formatters;
pub mod json;
pub mod monitor_tui;
pub mod summary;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_bytes, format_rate};
pub use json::JsonDashboard;
pub use monitor_tui::TuiDashboard;
pub use summary::SummaryDashboard;
