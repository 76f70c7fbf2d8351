//! Campaign metrics components
//!
//! Renders the count grid and the rate gauges of one campaign

use super::super::utils::accent_color;
use crate::models::CampaignData;
use crate::polling::PollSnapshot;
use crate::transition::TransitionKind;
use crate::view::format::rate;
use crate::view::{CampaignMetrics, MetricSlot, Presentation};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Padding, Paragraph, Wrap};

/// Render the campaign dashboard body.
pub fn render_campaign_metrics(f: &mut Frame, area: Rect, snapshot: &PollSnapshot<CampaignData>) {
    match Presentation::from_snapshot(snapshot) {
        Presentation::Loading => f.render_widget(
            Paragraph::new("Loading campaign data...").block(panel("CAMPAIGN")),
            area,
        ),
        Presentation::Failed(message) => render_error(f, area, &message),
        Presentation::Loaded { data, warning } => {
            // Keep showing the last good data under a one-line warning.
            let area = match warning {
                Some(warning) => {
                    let chunks = Layout::default()
                        .direction(Direction::Vertical)
                        .constraints([Constraint::Length(1), Constraint::Fill(1)])
                        .split(area);
                    f.render_widget(
                        Paragraph::new(warning).style(Style::default().fg(Color::LightRed)),
                        chunks[0],
                    );
                    chunks[1]
                }
                None => area,
            };
            render_loaded(f, area, &data);
        }
    }
}

fn render_loaded(f: &mut Frame, area: Rect, data: &CampaignData) {
    let metrics = CampaignMetrics::from_analytics(&data.analytics);
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_counts(f, chunks[0], &metrics.counts, data);
    render_rates(f, chunks[1], &metrics.rates, data);
}

fn render_counts(f: &mut Frame, area: Rect, counts: &[MetricSlot], data: &CampaignData) {
    let mut lines: Vec<Line> = counts
        .chunks(2)
        .map(|pair| {
            let mut spans = Vec::new();
            for slot in pair {
                spans.push(Span::styled(
                    format!("{:<18}", format!("{}:", slot.label)),
                    Style::default().fg(Color::Gray),
                ));
                spans.push(Span::styled(
                    format!("{:<12}", slot.value),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ));
            }
            Line::from(spans)
        })
        .collect();

    if let Some(limit) = data.details.daily_limit {
        lines.push(Line::from(""));
        lines.push(Line::styled(
            format!("Daily limit: {}", limit),
            Style::default().fg(Color::Gray),
        ));
    }
    if let Some(list) = &data.details.email_list {
        lines.push(Line::styled(
            format!("Sending from: {}", list.addresses().join(", ")),
            Style::default().fg(Color::Gray),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(panel("COUNTS"));
    f.render_widget(paragraph, area);
}

fn render_rates(f: &mut Frame, area: Rect, rates: &[MetricSlot], data: &CampaignData) {
    let a = &data.analytics;
    let sent = a.emails_sent_count;
    let numerators = [a.open_count, a.reply_count, a.link_click_count, a.bounced_count];
    let colors = [
        Color::LightGreen,
        Color::LightCyan,
        Color::LightBlue,
        Color::LightRed,
    ];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for (i, slot) in rates.iter().enumerate().take(rows.len()) {
        let percent = rate(numerators[i], sent).clamp(0.0, 100.0) as u16;
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .title(slot.label)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(colors[i])),
            )
            .gauge_style(
                Style::default()
                    .fg(colors[i])
                    .add_modifier(Modifier::BOLD),
            )
            .percent(percent)
            .label(format!("{}%", slot.value));
        f.render_widget(gauge, rows[i]);
    }
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let error = Paragraph::new(vec![
        Line::styled(
            message.to_string(),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::styled(
            "The dashboard keeps retrying on every refresh tick.",
            Style::default().fg(Color::Gray),
        ),
    ])
    .wrap(Wrap { trim: true })
    .block(panel("ERROR"));
    f.render_widget(error, area);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent_color(TransitionKind::Email)))
        .padding(Padding::uniform(1))
}
