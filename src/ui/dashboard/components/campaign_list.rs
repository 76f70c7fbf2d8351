//! Email campaign list

use super::super::utils::{accent_color, status_color};
use crate::models::CampaignData;
use crate::polling::PollSnapshot;
use crate::transition::TransitionKind;
use crate::view::{CampaignCard, Presentation};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph, Wrap};

pub fn render_campaign_list(
    f: &mut Frame,
    area: Rect,
    snapshot: &PollSnapshot<Vec<CampaignData>>,
    selected: usize,
) {
    let accent = accent_color(TransitionKind::Email);
    let block = Block::default()
        .title("CAMPAIGNS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent));

    let (campaigns, warning) = match Presentation::from_snapshot(snapshot) {
        Presentation::Loading => {
            f.render_widget(Paragraph::new("Loading campaigns...").block(block), area);
            return;
        }
        Presentation::Failed(message) => {
            let error = Paragraph::new(message)
                .style(Style::default().fg(Color::LightRed))
                .wrap(Wrap { trim: true })
                .block(block);
            f.render_widget(error, area);
            return;
        }
        Presentation::Loaded { data, warning } => (data, warning),
    };

    if campaigns.is_empty() {
        f.render_widget(Paragraph::new("No campaigns found.").block(block), area);
        return;
    }

    let items: Vec<ListItem> = campaigns
        .iter()
        .map(CampaignCard::from_data)
        .map(|card| card_item(&card))
        .collect();

    let block = match warning {
        Some(warning) => block.title_bottom(Line::styled(warning, Style::default().fg(Color::LightRed))),
        None => block,
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(40, 44, 52)))
        .highlight_symbol("▶ ");

    let mut list_state = ListState::default().with_selected(Some(selected.min(campaigns.len() - 1)));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn card_item(card: &CampaignCard) -> ListItem<'static> {
    let title = Line::from(vec![
        Span::styled(
            card.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", card.status),
            Style::default().fg(status_color(card.status)),
        ),
        Span::styled(
            format!("  {} · {}", card.kind_label, card.short_id),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let stats = Line::from(
        card.quick_stats
            .iter()
            .map(|slot| format!("{}: {}", slot.label, slot.value))
            .collect::<Vec<_>>()
            .join("   "),
    )
    .style(Style::default().fg(Color::Gray));

    ListItem::new(vec![title, stats, Line::from("")])
}
