//! Activity log panel
//!
//! Newest entry on top; poller and transition entries are told apart by colour.

use super::super::state::DashboardState;
use super::super::utils::{clean_http_error_message, format_compact_timestamp, get_source_color};
use crate::events::{Event, EventType};
use crate::logging::LogLevel;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render_logs_panel(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Two border rows plus one spare.
    let visible_rows = usize::from(area.height.saturating_sub(3)).max(1);

    let shown: Vec<&Event> = state
        .activity_logs
        .iter()
        .filter(|event| event.should_display())
        .collect();
    let lines: Vec<Line> = shown.iter().rev().take(visible_rows).map(|e| log_line(e)).collect();

    let body = if lines.is_empty() {
        Paragraph::new(Line::styled(
            "No activity yet",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Paragraph::new(lines)
    };

    let block = Block::default()
        .title(format!("ACTIVITY LOG ({})", shown.len()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));

    f.render_widget(body.block(block).wrap(Wrap { trim: true }), area);
}

fn log_line(event: &Event) -> Line<'static> {
    let message_style = match event.log_level {
        LogLevel::Error => Style::default().fg(Color::LightRed),
        LogLevel::Warn => Style::default().fg(Color::LightYellow),
        _ => Style::default().fg(get_source_color(&event.source)),
    };

    Line::from(vec![
        Span::raw(marker(event)),
        Span::styled(
            format!("{} ", format_compact_timestamp(&event.timestamp)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:<12} ", event.origin()),
            Style::default().add_modifier(Modifier::DIM),
        ),
        Span::styled(clean_http_error_message(&event.msg), message_style),
    ])
}

fn marker(event: &Event) -> &'static str {
    match event.event_type {
        EventType::Success => "✓ ",
        EventType::Error => "✗ ",
        EventType::Refresh => "↻ ",
        EventType::Waiting => "… ",
        EventType::Transition => "→ ",
        EventType::StateChange => "  ",
    }
}
