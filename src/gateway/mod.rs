use crate::gateway::error::GatewayError;
use crate::models::{CampaignAnalytics, CampaignData, CampaignDetails};
use futures::future::join_all;

pub(crate) mod client;
pub use client::InstantlyClient;
pub mod error;

#[cfg(test)]
use mockall::automock;

/// Read access to the campaign analytics provider.
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CampaignGateway: Send + Sync {
    /// Fetch analytics for every campaign visible to this account.
    ///
    /// A single object in the response is returned as a one-element list.
    async fn fetch_analytics(&self) -> Result<Vec<CampaignAnalytics>, GatewayError>;

    /// Fetch the details record of one campaign.
    async fn fetch_details(&self, campaign_id: &str) -> Result<CampaignDetails, GatewayError>;
}

/// Assemble the composite for one campaign.
///
/// Analytics are fetched first because the details lookup needs the id they
/// carry. With `campaign_id` set, a missing record is [`GatewayError::NotFound`];
/// without it the first record is used. Details are enrichment: when their
/// lookup fails the composite carries an empty details object instead.
pub async fn fetch_campaign_data(
    gateway: &dyn CampaignGateway,
    campaign_id: Option<&str>,
) -> Result<CampaignData, GatewayError> {
    let analytics = gateway.fetch_analytics().await?;
    if analytics.is_empty() {
        return Err(GatewayError::EmptyResult);
    }

    let selected = match campaign_id {
        Some(id) => analytics
            .into_iter()
            .find(|campaign| campaign.campaign_id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?,
        None => analytics
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResult)?,
    };

    Ok(attach_details(gateway, selected).await)
}

/// Assemble composites for every campaign in one analytics response.
///
/// Details lookups run concurrently; each one that fails falls back to an
/// analytics-only composite. An empty analytics list is an empty result here,
/// since the list view renders "no campaigns" rather than an error.
pub async fn fetch_all_campaign_data(
    gateway: &dyn CampaignGateway,
) -> Result<Vec<CampaignData>, GatewayError> {
    let analytics = gateway.fetch_analytics().await?;
    let lookups = analytics
        .into_iter()
        .map(|campaign| attach_details(gateway, campaign));
    Ok(join_all(lookups).await)
}

async fn attach_details(
    gateway: &dyn CampaignGateway,
    analytics: CampaignAnalytics,
) -> CampaignData {
    match gateway.fetch_details(&analytics.campaign_id).await {
        Ok(details) => CampaignData::new(analytics, details),
        Err(e) => {
            log::warn!(
                "Details for campaign {} unavailable, showing analytics only: {}",
                analytics.campaign_id,
                e
            );
            CampaignData::without_details(analytics)
        }
    }
}
