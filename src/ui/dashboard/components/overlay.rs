//! Transition overlay
//!
//! Covers the screen with the destination's gradient while a transition runs

use super::super::utils::stop_color;
use crate::transition::{TransitionKind, TransitionState};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

pub fn render_overlay(f: &mut Frame, area: Rect, overlay: &TransitionState) {
    let (Some(kind), Some(gradient)) = (overlay.transition_type, overlay.target_gradient) else {
        return;
    };

    f.render_widget(Clear, area);
    let bands = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);
    for (band, stop) in bands.iter().zip(gradient) {
        f.render_widget(
            Block::default().style(Style::default().bg(stop_color(stop))),
            *band,
        );
    }

    let label = match kind {
        TransitionKind::Email => "Opening email campaigns",
        TransitionKind::Linkedin => "Opening LinkedIn",
    };
    let mut lines = vec![Line::styled(
        label,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(asset) = overlay.source_asset {
        lines.push(Line::styled(asset, Style::default().fg(Color::White)));
    }
    let text = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(Style::default().bg(stop_color(gradient[1])));
    f.render_widget(text, centered_rows(bands[1], 2));
}

fn centered_rows(area: Rect, height: u16) -> Rect {
    let top = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        y: top,
        height: height.min(area.height),
        ..area
    }
}
