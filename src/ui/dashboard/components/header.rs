//! Dashboard header component
//!
//! Renders the title and the refresh countdown gauge

use super::super::state::{DashboardState, ViewState};
use super::super::utils::{accent_color, status_color};
use crate::polling::sources::short_id;
use crate::polling::{PollSnapshot, PollState, Visibility};
use crate::view::{LOADING_TEXT, header_title, status_text};

use chrono::Local;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};

/// Render header with title and refresh progress.
pub fn render_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let title_color = state.accent_kind().map_or(Color::Cyan, accent_color);
    let version = env!("CARGO_PKG_VERSION");
    let title = match &state.view {
        ViewState::Home { .. } => Line::from(format!("PROSPECTING HUB v{}", version)),
        ViewState::Campaigns { .. } => Line::from("EMAIL CAMPAIGNS"),
        ViewState::CampaignDashboard { poll, campaign_id } => {
            let snapshot = poll.snapshot();
            let data = snapshot.data.as_deref();
            let status_style = match data {
                Some(data) => Style::default().fg(status_color(data.status())),
                None => Style::default().fg(Color::DarkGray),
            };
            let mut spans = vec![
                Span::raw(header_title(data).to_uppercase()),
                Span::raw("  "),
                Span::styled(format!("[{}]", status_text(data)), status_style),
            ];
            if let Some(id) = campaign_id {
                spans.push(Span::styled(
                    format!("  {}", short_id(id)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            Line::from(spans)
        }
        ViewState::Linkedin => Line::from("LINKEDIN CAMPAIGNS"),
    };

    let title = Paragraph::new(title)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let (progress_text, gauge_color, progress_percent) = match &state.view {
        ViewState::Campaigns { poll, .. } => refresh_gauge(&poll.snapshot(), state),
        ViewState::CampaignDashboard { poll, .. } => refresh_gauge(&poll.snapshot(), state),
        ViewState::Home { .. } => (
            format!(
                "Choose a channel to open - {} mode - up {}",
                state.environment,
                format_uptime(state.start_time.elapsed().as_secs())
            ),
            Color::LightBlue,
            100,
        ),
        ViewState::Linkedin => ("No live data yet".to_string(), Color::DarkGray, 0),
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .gauge_style(
            Style::default()
                .fg(gauge_color)
                .add_modifier(Modifier::BOLD),
        )
        .percent(progress_percent)
        .label(progress_text);

    f.render_widget(gauge, header_chunks[1]);
}

fn format_uptime(secs: u64) -> String {
    if secs >= 3600 {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    } else {
        format!("{}m {:02}s", secs / 60, secs % 60)
    }
}

/// Label, colour and fill of the gauge for a polled view.
fn refresh_gauge<T>(snapshot: &PollSnapshot<T>, state: &DashboardState) -> (String, Color, u16) {
    if state.visibility == Visibility::Hidden {
        return (
            "PAUSED - terminal unfocused".to_string(),
            Color::DarkGray,
            0,
        );
    }

    let interval_secs = state.poll_interval.as_secs().max(1);
    let elapsed_secs = snapshot
        .last_success
        .map(|at| (Local::now() - at).num_seconds().max(0) as u64)
        .unwrap_or(0);
    let remaining_secs = interval_secs.saturating_sub(elapsed_secs % interval_secs);
    let progress = ((elapsed_secs % interval_secs) * 100 / interval_secs) as u16;

    match snapshot.state {
        PollState::Idle | PollState::Fetching if snapshot.is_loading() => {
            // Animated loading gauge - loops every 20 ticks
            let progress = ((state.tick % 20) as f64 / 20.0 * 100.0) as u16;
            (LOADING_TEXT.to_uppercase(), Color::LightBlue, progress)
        }
        PollState::Idle | PollState::Fetching => {
            ("REFRESHING...".to_string(), Color::LightBlue, 100)
        }
        PollState::Loaded => (
            format!("UP TO DATE - next refresh in {}s", remaining_secs),
            Color::LightGreen,
            progress.min(100),
        ),
        PollState::Errored => (failure_label(snapshot), Color::LightRed, 100),
    }
}

fn failure_label<T>(snapshot: &PollSnapshot<T>) -> String {
    format!(
        "REFRESH FAILED ({} in a row, fetch #{}) - retrying on the next tick",
        snapshot.consecutive_failures, snapshot.attempts
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_switches_to_hours() {
        assert_eq!(format_uptime(65), "1m 05s");
        assert_eq!(format_uptime(3_720), "1h 02m");
    }

    #[test]
    fn failure_label_counts_fetches() {
        let snapshot: PollSnapshot<()> = PollSnapshot {
            state: PollState::Errored,
            data: None,
            error: Some("HTTP 503".into()),
            attempts: 4,
            consecutive_failures: 3,
            last_success: None,
        };
        assert_eq!(
            failure_label(&snapshot),
            "REFRESH FAILED (3 in a row, fetch #4) - retrying on the next tick"
        );
    }
}
