use humansize::{format_size, DECIMAL};

/// Format a byte count in human-readable decimal units (kB, MB, GB)
pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, DECIMAL)
}

/// Format a network rate; `None` means no rate is known yet
pub fn format_rate(mbps: Option<f64>) -> String {
    match mbps {
        Some(rate) if rate >= 1000.0 => format!("{:.2} Gbps", rate / 1000.0),
        Some(rate) => format!("{:.2} Mbps", rate),
        None => "--".to_string(),
    }
}

/// Shorten long labels for narrow columns
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
