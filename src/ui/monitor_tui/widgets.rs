use ratatui::{prelude::*, widgets::Gauge};

use crate::core::config::{ColorScheme, ThresholdConfig};
use crate::core::system_monitor::{level, AlertSeverity, Level};

/// Colors for one color scheme. `mono` leaves everything at the terminal
/// default.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub normal: Color,
    pub warning: Color,
    pub critical: Color,
    pub accent: Color,
    pub dim: Color,
}

impl Palette {
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Default => Self {
                normal: Color::Cyan,
                warning: Color::LightYellow,
                critical: Color::Red,
                accent: Color::Cyan,
                dim: Color::DarkGray,
            },
            ColorScheme::Mono => Self {
                normal: Color::Reset,
                warning: Color::Reset,
                critical: Color::Reset,
                accent: Color::Reset,
                dim: Color::Reset,
            },
        }
    }

    pub fn level(&self, level: Level) -> Color {
        match level {
            Level::Normal => self.normal,
            Level::Warning => self.warning,
            Level::Critical => self.critical,
        }
    }

    pub fn severity(&self, severity: AlertSeverity) -> Color {
        match severity {
            AlertSeverity::Warning => self.warning,
            AlertSeverity::Critical => self.critical,
        }
    }
}

/// Gauge colored by where `value` falls against its thresholds
pub fn threshold_gauge<'a>(
    value: f64,
    thresholds: &ThresholdConfig,
    label: String,
    palette: &Palette,
) -> Gauge<'a> {
    let color = palette.level(level(value, thresholds));

    Gauge::default()
        .gauge_style(Style::default().fg(color))
        .ratio((value / 100.0).clamp(0.0, 1.0))
        .label(label)
}

/// Mark levels that need attention, so they stay visible without color
pub fn level_marker(level: Level) -> &'static str {
    match level {
        Level::Normal => "",
        Level::Warning => " !",
        Level::Critical => " !!",
    }
}
