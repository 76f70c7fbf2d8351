//! View composition
//!
//! Turns a poll snapshot into what a screen shows: metric slots, status text,
//! list cards. Nothing here touches the network or the terminal.

pub mod format;

use crate::models::{CampaignAnalytics, CampaignData, CampaignStatus};
use crate::polling::PollSnapshot;
use crate::polling::sources::short_id;
use format::{format_count, format_currency, format_rate};
use std::sync::Arc;

pub const DEFAULT_TITLE: &str = "Email Campaign Dashboard";
pub const LOADING_TEXT: &str = "Loading...";

/// A labelled value ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSlot {
    pub label: &'static str,
    pub value: String,
}

impl MetricSlot {
    fn new(label: &'static str, value: String) -> Self {
        Self { label, value }
    }
}

/// Count and rate slots of one campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignMetrics {
    pub counts: Vec<MetricSlot>,
    /// Percentages without the `%` sign.
    pub rates: Vec<MetricSlot>,
}

impl CampaignMetrics {
    pub fn from_analytics(a: &CampaignAnalytics) -> Self {
        let sent = a.emails_sent_count;
        let counts = vec![
            MetricSlot::new("Leads", format_count(a.leads_count)),
            MetricSlot::new("Emails Sent", format_count(sent)),
            MetricSlot::new("Opens", format_count(a.open_count)),
            MetricSlot::new("Replies", format_count(a.reply_count)),
            MetricSlot::new("Contacted", format_count(a.contacted_count)),
            MetricSlot::new("New Contacted", format_count(a.new_leads_contacted_count)),
            MetricSlot::new("Link Clicks", format_count(a.link_click_count)),
            MetricSlot::new("Completed", format_count(a.completed_count)),
            MetricSlot::new("Bounced", format_count(a.bounced_count)),
            MetricSlot::new("Unsubscribed", format_count(a.unsubscribed_count)),
            MetricSlot::new("Opportunities", format_count(a.total_opportunities)),
            MetricSlot::new(
                "Opportunity Value",
                format_currency(a.total_opportunity_value),
            ),
        ];
        let rates = vec![
            MetricSlot::new("Open Rate", format_rate(a.open_count, sent)),
            MetricSlot::new("Reply Rate", format_rate(a.reply_count, sent)),
            MetricSlot::new("Click Rate", format_rate(a.link_click_count, sent)),
            MetricSlot::new("Bounce Rate", format_rate(a.bounced_count, sent)),
        ];
        Self { counts, rates }
    }
}

/// Header title: the campaign name once loaded.
pub fn header_title(data: Option<&CampaignData>) -> String {
    match data {
        Some(data) if !data.analytics.campaign_name.is_empty() => {
            data.analytics.campaign_name.clone()
        }
        _ => DEFAULT_TITLE.to_string(),
    }
}

pub fn status_text(data: Option<&CampaignData>) -> String {
    match data {
        Some(data) => data.status().to_string(),
        None => LOADING_TEXT.to_string(),
    }
}

pub fn error_message(error: &str) -> String {
    format!("Failed to load campaign data: {}", error)
}

/// What a data screen should render for its current snapshot.
#[derive(Debug, Clone)]
pub enum Presentation<T> {
    Loading,
    /// Failed before any data arrived.
    Failed(String),
    /// `warning` is set when the latest refresh failed but older data remains.
    Loaded { data: Arc<T>, warning: Option<String> },
}

impl<T> Presentation<T> {
    pub fn from_snapshot(snapshot: &PollSnapshot<T>) -> Self {
        match (&snapshot.data, &snapshot.error) {
            (Some(data), error) => Presentation::Loaded {
                data: data.clone(),
                warning: error.as_deref().map(error_message),
            },
            (None, Some(error)) => Presentation::Failed(error_message(error)),
            (None, None) => Presentation::Loading,
        }
    }
}

/// One entry of the campaign list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignCard {
    pub campaign_id: String,
    pub name: String,
    pub status: CampaignStatus,
    pub kind_label: &'static str,
    pub short_id: String,
    pub quick_stats: [MetricSlot; 4],
}

impl CampaignCard {
    pub fn from_data(data: &CampaignData) -> Self {
        let a = &data.analytics;
        let name = if a.campaign_name.is_empty() {
            "Untitled campaign".to_string()
        } else {
            a.campaign_name.clone()
        };
        Self {
            campaign_id: a.campaign_id.clone(),
            name,
            status: data.status(),
            kind_label: if a.campaign_is_evergreen {
                "Evergreen"
            } else {
                "Standard"
            },
            short_id: format!("{}...", short_id(&a.campaign_id)),
            quick_stats: [
                MetricSlot::new("Leads", format_count(a.leads_count)),
                MetricSlot::new("Sent", format_count(a.emails_sent_count)),
                MetricSlot::new("Opens", format_count(a.open_count)),
                MetricSlot::new("Replies", format_count(a.reply_count)),
            ],
        }
    }
}
