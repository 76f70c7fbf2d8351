//! Dashboard main renderer

use super::components::{campaign_list, footer, header, home, logs, metrics, overlay};
use super::state::{DashboardState, ViewState};
use super::utils::accent_color;
use crate::transition::TransitionKind;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Style};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

pub fn render_dashboard(f: &mut Frame, state: &DashboardState) {
    if state.with_background_color {
        f.render_widget(
            Block::default().style(Style::default().bg(Color::Rgb(16, 20, 24))),
            f.area(),
        );
    }

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(25),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    header::render_header(f, main_chunks[0], state);
    render_body(f, main_chunks[1], state);
    logs::render_logs_panel(f, main_chunks[2], state);
    footer::render_footer(f, main_chunks[3], state);

    if state.overlay.is_transitioning {
        overlay::render_overlay(f, f.area(), &state.overlay);
    }
}

fn render_body(f: &mut Frame, area: Rect, state: &DashboardState) {
    match &state.view {
        ViewState::Home { .. } => home::render_home(f, area, state),
        ViewState::Campaigns { poll, selected } => {
            campaign_list::render_campaign_list(f, area, &poll.snapshot(), *selected)
        }
        ViewState::CampaignDashboard { poll, .. } => {
            metrics::render_campaign_metrics(f, area, &poll.snapshot())
        }
        ViewState::Linkedin => render_linkedin(f, area),
    }
}

fn render_linkedin(f: &mut Frame, area: Rect) {
    let placeholder = Paragraph::new("LinkedIn campaign analytics are coming soon.")
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(accent_color(TransitionKind::Linkedin))),
        );
    f.render_widget(placeholder, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::events::EventSender;
    use crate::gateway::MockCampaignGateway;
    use crate::route::Route;
    use crate::transition::{MotionProfile, TransitionContext, TransitionState};
    use crate::ui::UIConfig;
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use tokio::sync::mpsc;

    fn state(route: Route) -> DashboardState {
        let mut gateway = MockCampaignGateway::new();
        gateway.expect_fetch_analytics().returning(|| Ok(Vec::new()));
        let (event_tx, _) = mpsc::channel(8);
        let (transition_tx, _) = mpsc::channel(8);
        DashboardState::new(
            Environment::Proxy,
            Instant::now(),
            UIConfig {
                with_background_color: true,
                poll_interval: Duration::from_secs(30),
                initial_route: route,
            },
            Arc::new(gateway),
            EventSender::new(event_tx),
            TransitionContext::new(MotionProfile::standard(), transition_tx),
        )
    }

    fn screen_text(state: &DashboardState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_dashboard(f, state)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[tokio::test]
    async fn home_shows_both_channels() {
        let text = screen_text(&state(Route::Home));
        assert!(text.contains("EMAIL"));
        assert!(text.contains("LINKEDIN"));
        assert!(text.contains("PROSPECTING HUB"));
    }

    #[tokio::test]
    async fn campaign_dashboard_starts_loading() {
        let text = screen_text(&state(Route::EmailDashboard("c1".into())));
        assert!(text.contains("EMAIL CAMPAIGN DASHBOARD"));
        assert!(text.contains("Loading..."));
    }

    #[tokio::test]
    async fn overlay_covers_the_screen() {
        let mut dashboard = state(Route::Home);
        dashboard.overlay = TransitionState::active(TransitionKind::Linkedin);
        let text = screen_text(&dashboard);
        assert!(text.contains("Opening LinkedIn"));
        assert!(!text.contains("ACTIVITY LOG"));
    }
}
