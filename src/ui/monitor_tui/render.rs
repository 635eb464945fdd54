use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Sparkline},
};

use super::widgets::{level_marker, threshold_gauge, Palette};
use crate::core::config::ConfigSnapshot;
use crate::core::system_monitor::{level, Alert, TickReport};
use crate::ui::formatters::{format_bytes, format_rate, truncate};

const MAX_BANNER_ALERTS: usize = 4;

/// Main render function
pub fn render_dashboard(frame: &mut Frame, tick: &TickReport, config: &ConfigSnapshot) {
    let palette = Palette::for_scheme(config.display.color_scheme);
    let area = frame.area();

    let mut sections: Vec<(Constraint, Section)> = vec![(Constraint::Length(3), Section::Header)];

    if !tick.alerts.is_empty() {
        let rows = tick.alerts.len().min(MAX_BANNER_ALERTS) as u16;
        sections.push((Constraint::Length(boxed(rows)), Section::Alerts));
    }
    if let Some(cpu) = &tick.cpu {
        let core_rows = if config.cpu.show_per_core {
            row_count(cpu.per_core_usage.len())
        } else {
            0
        };
        let graph_rows = if config.display.show_graphs {
            config.display.graph_height
        } else {
            0
        };
        sections.push((
            Constraint::Length(boxed(core_rows.max(graph_rows)).saturating_add(1)),
            Section::Cpu,
        ));
    }
    if tick.memory.is_some() {
        // usage gauge, swap line, history line
        sections.push((Constraint::Length(5), Section::Memory));
    }
    if !tick.disks.is_empty() {
        sections.push((
            Constraint::Length(boxed(row_count(tick.disks.len()))),
            Section::Disks,
        ));
    }
    if config.network.enabled {
        let rows = row_count(tick.network.len().max(1));
        sections.push((Constraint::Length(boxed(rows)), Section::Network));
    }
    sections.push((Constraint::Min(0), Section::Spacer));
    sections.push((Constraint::Length(1), Section::Footer));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(sections.iter().map(|(c, _)| *c).collect::<Vec<_>>())
        .split(area);

    for (chunk, (_, section)) in chunks.iter().zip(sections.iter()) {
        match section {
            Section::Header => render_header(frame, *chunk, tick, config, &palette),
            Section::Alerts => render_alerts_banner(frame, *chunk, &tick.alerts, &palette),
            Section::Cpu => render_cpu_section(frame, *chunk, tick, config, &palette),
            Section::Memory => render_memory_section(frame, *chunk, tick, config, &palette),
            Section::Disks => render_disk_section(frame, *chunk, tick, config, &palette),
            Section::Network => render_network_section(frame, *chunk, tick, config, &palette),
            Section::Spacer => {}
            Section::Footer => render_footer(frame, *chunk, config, &palette),
        }
    }
}

fn row_count(len: usize) -> u16 {
    u16::try_from(len).unwrap_or(u16::MAX)
}

/// Height of a bordered block holding `rows` lines.
fn boxed(rows: u16) -> u16 {
    rows.saturating_add(2)
}

#[derive(Debug, Clone, Copy)]
enum Section {
    Header,
    Alerts,
    Cpu,
    Memory,
    Disks,
    Network,
    Spacer,
    Footer,
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    tick: &TickReport,
    config: &ConfigSnapshot,
    palette: &Palette,
) {
    let worst = tick
        .alerts
        .iter()
        .map(|a| a.severity)
        .max()
        .map(|s| palette.severity(s))
        .unwrap_or(palette.accent);

    let title = format!(
        " sysmon {} │ {} │ tick {} │ every {}s ",
        config.version,
        tick.timestamp.format("%Y-%m-%d %H:%M:%S"),
        tick.tick,
        config.update_interval
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(worst));

    frame.render_widget(block, area);
}

/// Render alerts banner, most severe first
fn render_alerts_banner(frame: &mut Frame, area: Rect, alerts: &[Alert], palette: &Palette) {
    let block = Block::default()
        .title(format!(" ALERTS ({}) ", alerts.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.critical));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut shown: Vec<&Alert> = alerts.iter().collect();
    shown.sort_by(|a, b| b.severity.cmp(&a.severity));
    shown.truncate(MAX_BANNER_ALERTS);

    let lines: Vec<Line> = shown
        .iter()
        .map(|alert| {
            Line::from(Span::styled(
                format!("[{}] {}: {}", alert.severity, alert.category, alert.message),
                Style::default()
                    .fg(palette.severity(alert.severity))
                    .add_modifier(Modifier::BOLD),
            ))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_cpu_section(
    frame: &mut Frame,
    area: Rect,
    tick: &TickReport,
    config: &ConfigSnapshot,
    palette: &Palette,
) {
    let Some(cpu) = &tick.cpu else {
        return;
    };
    let thresholds = &config.cpu.thresholds;

    let title = if cpu.model.is_empty() {
        format!(" CPU ({} cores) ", cpu.core_count)
    } else {
        format!(" CPU: {} ({} cores) ", cpu.model, cpu.core_count)
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let overall = format!(
        "Total [{:>5.1}%]{}",
        cpu.overall_usage,
        level_marker(level(cpu.overall_usage, thresholds))
    );
    frame.render_widget(
        threshold_gauge(cpu.overall_usage, thresholds, overall, palette),
        rows[0],
    );

    // Left: per-core gauges, right: usage history
    let columns = match (config.cpu.show_per_core, config.display.show_graphs) {
        (true, true) => Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1])
            .to_vec(),
        _ => vec![rows[1], rows[1]],
    };

    if config.cpu.show_per_core {
        let cores_to_show = (columns[0].height as usize).min(cpu.per_core_usage.len());
        if cores_to_show > 0 {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![Constraint::Length(1); cores_to_show])
                .split(columns[0]);

            for (i, usage) in cpu.per_core_usage.iter().take(cores_to_show).enumerate() {
                let label = format!(
                    "C{:02} [{:>5.1}%]{}",
                    i,
                    usage,
                    level_marker(level(*usage, thresholds))
                );
                frame.render_widget(threshold_gauge(*usage, thresholds, label, palette), layout[i]);
            }
        }
    }

    if config.display.show_graphs {
        render_history(frame, columns[1], "History", &tick.cpu_history, palette);
    }
}

fn render_history(frame: &mut Frame, area: Rect, title: &str, values: &[f64], palette: &Palette) {
    if area.width < 4 || area.height < 3 || values.is_empty() {
        return;
    }

    // Sparkline takes integers; keep one decimal of precision
    let inner_width = area.width.saturating_sub(2) as usize;
    let start = values.len().saturating_sub(inner_width);
    let data: Vec<u64> = values[start..]
        .iter()
        .map(|v| (v.clamp(0.0, 100.0) * 10.0) as u64)
        .collect();

    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .title(format!("{} ({} samples)", title, values.len()))
                .borders(Borders::ALL),
        )
        .data(&data)
        .max(1000)
        .style(Style::default().fg(palette.accent));

    frame.render_widget(sparkline, area);
}

fn render_memory_section(
    frame: &mut Frame,
    area: Rect,
    tick: &TickReport,
    config: &ConfigSnapshot,
    palette: &Palette,
) {
    let Some(mem) = &tick.memory else {
        return;
    };

    let block = Block::default().title(" Memory ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let thresholds = &config.memory.thresholds;
    let ram_text = format!(
        "Used:  {} / {} ({:.1}%){}",
        format_bytes(mem.used_bytes),
        format_bytes(mem.total_bytes),
        mem.usage_percent,
        level_marker(level(mem.usage_percent, thresholds))
    );
    frame.render_widget(
        threshold_gauge(mem.usage_percent, thresholds, ram_text, palette),
        rows[0],
    );

    if config.memory.show_swap {
        let swap_text = if mem.swap_total_bytes == 0 {
            "Swap:  none".to_string()
        } else {
            let swap_percent = mem.swap_used_bytes as f64 / mem.swap_total_bytes as f64 * 100.0;
            format!(
                "Swap:  {} / {} ({:.1}%)",
                format_bytes(mem.swap_used_bytes),
                format_bytes(mem.swap_total_bytes),
                swap_percent
            )
        };
        frame.render_widget(
            Paragraph::new(swap_text).style(Style::default().fg(palette.dim)),
            rows[1],
        );
    }

    if config.display.show_graphs && !tick.memory_history.is_empty() {
        let history = format!(
            "History: {} samples, latest {:.1}%",
            tick.memory_history.len(),
            tick.memory_history.last().copied().unwrap_or_default()
        );
        frame.render_widget(
            Paragraph::new(history).style(Style::default().fg(palette.dim)),
            rows[2],
        );
    }
}

fn render_disk_section(
    frame: &mut Frame,
    area: Rect,
    tick: &TickReport,
    config: &ConfigSnapshot,
    palette: &Palette,
) {
    let block = Block::default().title(" Disks ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = (inner.height as usize).min(tick.disks.len());
    if rows == 0 {
        return;
    }
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(1); rows])
        .split(inner);

    for (disk, row) in tick.disks.iter().zip(layout.iter()) {
        if disk.total_bytes == 0 {
            let text = format!("{} ({}): unavailable", disk.label, disk.mount_point);
            frame.render_widget(
                Paragraph::new(text).style(Style::default().fg(palette.dim)),
                *row,
            );
            continue;
        }

        let thresholds = config.disk.thresholds_for(&disk.mount_point);
        let label = format!(
            "{} ({}): {} / {} ({:.1}%){}",
            truncate(&disk.label, 16),
            disk.mount_point,
            format_bytes(disk.used_bytes),
            format_bytes(disk.total_bytes),
            disk.usage_percent,
            level_marker(level(disk.usage_percent, &thresholds))
        );
        frame.render_widget(
            threshold_gauge(disk.usage_percent, &thresholds, label, palette),
            *row,
        );
    }
}

fn render_network_section(
    frame: &mut Frame,
    area: Rect,
    tick: &TickReport,
    config: &ConfigSnapshot,
    palette: &Palette,
) {
    let block = Block::default().title(" Network ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if tick.network.is_empty() {
        let empty =
            Paragraph::new("No network interfaces").style(Style::default().fg(palette.dim));
        frame.render_widget(empty, inner);
        return;
    }

    let rate_style = |rate: Option<f64>, limit: f64| {
        let over = rate.is_some_and(|r| r > limit);
        if over {
            Style::default().fg(palette.warning).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.normal)
        }
    };

    let lines: Vec<Line> = tick
        .network
        .iter()
        .map(|net| {
            Line::from(vec![
                Span::styled(
                    format!("{:<12}", truncate(&net.interface, 12)),
                    Style::default().fg(palette.accent),
                ),
                Span::raw(" up "),
                Span::styled(
                    format!("{:>12}", format_rate(net.upload_mbps)),
                    rate_style(net.upload_mbps, config.network.upload_mbps),
                ),
                Span::raw("  down "),
                Span::styled(
                    format!("{:>12}", format_rate(net.download_mbps)),
                    rate_style(net.download_mbps, config.network.download_mbps),
                ),
                Span::styled(
                    format!(
                        "  total {} / {}",
                        format_bytes(net.bytes_sent),
                        format_bytes(net.bytes_received)
                    ),
                    Style::default().fg(palette.dim),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_footer(frame: &mut Frame, area: Rect, config: &ConfigSnapshot, palette: &Palette) {
    let alerts = if config.alerts.enabled && config.alerts.log_to_file {
        format!("alerts → {}", config.alerts.log_path.display())
    } else if config.alerts.enabled {
        "alerts on".to_string()
    } else {
        "alerts off".to_string()
    };
    let help = format!(" Ctrl+C: quit │ {} │ history {} ", alerts, config.history_size);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(palette.dim)),
        area,
    );
}
