//! Dashboard footer component
//!
//! Renders the key hints of the current view

use super::super::state::{DashboardState, ViewState};
use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

/// Render footer with the keys the mounted view understands.
pub fn render_footer(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let hints = match &state.view {
        ViewState::Home { .. } => "[E] Email | [L] LinkedIn | [←→] Select | [Enter] Open | [Q] Quit",
        ViewState::Campaigns { .. } => "[↑↓] Select | [Enter] Open | [B] Back | [Q] Quit",
        ViewState::CampaignDashboard { .. } | ViewState::Linkedin => "[B] Back | [Q] Quit",
    };
    let footer_text = if state.transition.motion().is_reduced() {
        format!("{} | reduced motion", hints)
    } else {
        hints.to_string()
    };

    let footer = Paragraph::new(footer_text)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}
