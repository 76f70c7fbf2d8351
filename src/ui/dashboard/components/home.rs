//! Home view: one tile per outreach channel

use super::super::state::{DashboardState, ViewState};
use super::super::utils::accent_color;
use crate::transition::TransitionKind;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

pub fn render_home(f: &mut Frame, area: Rect, state: &DashboardState) {
    let selected = match &state.view {
        ViewState::Home { selected } => *selected,
        _ => return,
    };

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(area);

    for (kind, tile_area) in [TransitionKind::Email, TransitionKind::Linkedin]
        .into_iter()
        .zip(tiles.iter())
    {
        let exit_progress = exit_progress(state, kind);
        if exit_progress >= 1.0 {
            continue;
        }
        render_tile(f, *tile_area, kind, kind == selected, exit_progress);
    }
}

/// How far the tile's exit animation has run, 0.0 to 1.0.
fn exit_progress(state: &DashboardState, kind: TransitionKind) -> f64 {
    match state.exit_animation {
        Some(exit) if exit.kind == kind => {
            let duration = state.transition.motion().exit_duration;
            if duration.is_zero() {
                1.0
            } else {
                (exit.started_at.elapsed().as_secs_f64() / duration.as_secs_f64()).min(1.0)
            }
        }
        _ => 0.0,
    }
}

fn render_tile(f: &mut Frame, area: Rect, kind: TransitionKind, selected: bool, exit: f64) {
    // The exiting tile shrinks towards its centre.
    let area = area.inner(Margin {
        horizontal: (area.width as f64 / 2.0 * exit) as u16,
        vertical: (area.height as f64 / 2.0 * exit) as u16,
    });

    let accent = accent_color(kind);
    let (title, blurb) = match kind {
        TransitionKind::Email => (
            "EMAIL",
            "Campaign analytics from Instantly: opens, replies, clicks and bounces.",
        ),
        TransitionKind::Linkedin => ("LINKEDIN", "LinkedIn outreach performance."),
    };
    let border_style = if selected {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let lines = vec![
        Line::from(""),
        Line::styled(
            title,
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(blurb, Style::default().fg(Color::Gray)),
    ];
    let tile = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(if selected {
                    BorderType::Thick
                } else {
                    BorderType::Rounded
                })
                .border_style(border_style),
        );
    f.render_widget(tile, area);
}
