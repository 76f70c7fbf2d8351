//! Dashboard utility functions
//!
//! Contains helper functions used across dashboard components

use crate::events::EventSource;
use crate::models::CampaignStatus;
use crate::transition::{GradientStop, TransitionKind};
use ratatui::prelude::Color;

/// Get a ratatui color for the component an event came from
pub fn get_source_color(source: &EventSource) -> Color {
    match source {
        EventSource::Poller(_) => Color::Cyan,
        EventSource::Choreographer => Color::Magenta,
    }
}

pub fn stop_color(stop: GradientStop) -> Color {
    Color::Rgb(stop.0, stop.1, stop.2)
}

/// Middle stop of a channel's gradient, used for borders and titles.
pub fn accent_color(kind: TransitionKind) -> Color {
    stop_color(kind.target_gradient()[1])
}

pub fn status_color(status: CampaignStatus) -> Color {
    match status {
        CampaignStatus::Running => Color::LightGreen,
        CampaignStatus::Paused => Color::LightYellow,
        CampaignStatus::Completed => Color::LightBlue,
        CampaignStatus::Draft | CampaignStatus::Unknown(_) => Color::Gray,
    }
}

/// Format compact timestamp with date and time from full timestamp
pub fn format_compact_timestamp(timestamp: &str) -> String {
    // Extract from "YYYY-MM-DD HH:MM:SS" format
    let mut parts = timestamp.split(' ');
    if let (Some(date_part), Some(time_part)) = (parts.next(), parts.next()) {
        if let (Some(month_day), Some(hour_min)) = (date_part.get(5..10), time_part.get(0..5)) {
            return format!("{} {}", month_day, hour_min);
        }
    }
    // Fallback to original timestamp if parsing fails
    timestamp.to_string()
}

/// Clean HTTP error messages
pub fn clean_http_error_message(msg: &str) -> String {
    // Replace verbose reqwest error chains with short messages
    if msg.contains("Network error") && msg.contains("timed out") {
        return format!("{}: request timed out", prefix(msg));
    }
    if msg.contains("Network error") {
        return format!("{}: network error", prefix(msg));
    }
    msg.to_string()
}

fn prefix(msg: &str) -> &str {
    msg.split(": ").next().unwrap_or(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_timestamp() {
        assert_eq!(format_compact_timestamp("2025-03-14 09:26:53"), "03-14 09:26");
        assert_eq!(format_compact_timestamp("garbage"), "garbage");
    }

    #[test]
    fn network_errors_are_shortened() {
        assert_eq!(
            clean_http_error_message(
                "Failed to refresh Campaigns: Network error: error sending request: operation timed out"
            ),
            "Failed to refresh Campaigns: request timed out"
        );
        assert_eq!(
            clean_http_error_message("Refreshed Campaigns"),
            "Refreshed Campaigns"
        );
    }
}
