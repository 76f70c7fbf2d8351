//! Campaign records
//!
//! Wire types returned by the Instantly analytics and campaign endpoints, and the
//! composite the dashboard views work with.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

/// Aggregate counters for one campaign.
///
/// A snapshot is immutable; a later poll replaces it wholesale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignAnalytics {
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_status: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub campaign_is_evergreen: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub leads_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub contacted_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub open_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub reply_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub link_click_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub bounced_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub unsubscribed_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub completed_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub emails_sent_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub new_leads_contacted_count: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_opportunities: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub total_opportunity_value: f64,
}

/// Explicit `null` decodes like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sender accounts attached to a campaign; the API returns either form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmailList {
    One(String),
    Many(Vec<String>),
}

impl EmailList {
    pub fn addresses(&self) -> Vec<&str> {
        match self {
            EmailList::One(address) => vec![address.as_str()],
            EmailList::Many(addresses) => addresses.iter().map(String::as_str).collect(),
        }
    }
}

/// Supplementary campaign configuration with an open schema.
///
/// Keys the dashboard does not know about are kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_list: Option<EmailList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_status: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CampaignDetails {
    pub fn is_empty(&self) -> bool {
        *self == CampaignDetails::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// One analytics record joined with its details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignData {
    pub analytics: CampaignAnalytics,
    pub details: CampaignDetails,
}

impl CampaignData {
    pub fn new(analytics: CampaignAnalytics, details: CampaignDetails) -> Self {
        Self { analytics, details }
    }

    /// Analytics-only composite, used when the details lookup failed.
    pub fn without_details(analytics: CampaignAnalytics) -> Self {
        Self::new(analytics, CampaignDetails::default())
    }

    pub fn campaign_id(&self) -> &str {
        &self.analytics.campaign_id
    }

    /// Resolved status; see [`resolve_status`].
    pub fn status(&self) -> CampaignStatus {
        resolve_status(&self.details, &self.analytics)
    }
}

/// Lifecycle of a campaign as reported by the API.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CampaignStatus {
    Draft,
    Running,
    Paused,
    Completed,
    Unknown(i64),
}

impl From<i64> for CampaignStatus {
    fn from(code: i64) -> Self {
        match code {
            0 => CampaignStatus::Draft,
            1 => CampaignStatus::Running,
            2 => CampaignStatus::Paused,
            3 => CampaignStatus::Completed,
            other => CampaignStatus::Unknown(other),
        }
    }
}

impl Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            CampaignStatus::Draft => "Draft",
            CampaignStatus::Running => "Running",
            CampaignStatus::Paused => "Paused",
            CampaignStatus::Completed => "Completed",
            CampaignStatus::Unknown(_) => "Unknown",
        };
        f.write_str(text)
    }
}

/// Status precedence: the details record is fresher than analytics, and within
/// details `campaign_status` wins over `status`.
pub fn resolve_status(details: &CampaignDetails, analytics: &CampaignAnalytics) -> CampaignStatus {
    details
        .campaign_status
        .or(details.status)
        .unwrap_or(analytics.campaign_status)
        .into()
}
