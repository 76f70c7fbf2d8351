//! What each polled view fetches

use crate::gateway::error::GatewayError;
use crate::gateway::{CampaignGateway, fetch_all_campaign_data, fetch_campaign_data};
use crate::models::CampaignData;
use std::sync::Arc;

/// A loader the polling controller calls once per refresh.
#[async_trait::async_trait]
pub trait ViewSource: Send + Sync + 'static {
    type Output: Send + Sync + 'static;

    /// Short name used in activity log messages.
    fn label(&self) -> String;

    async fn load(&self) -> Result<Self::Output, GatewayError>;
}

/// Every campaign with its details, for the campaign list view.
pub struct CampaignListSource {
    gateway: Arc<dyn CampaignGateway>,
}

impl CampaignListSource {
    pub fn new(gateway: Arc<dyn CampaignGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl ViewSource for CampaignListSource {
    type Output = Vec<CampaignData>;

    fn label(&self) -> String {
        "Campaigns".to_string()
    }

    async fn load(&self) -> Result<Self::Output, GatewayError> {
        fetch_all_campaign_data(self.gateway.as_ref()).await
    }
}

/// One campaign composite, for the campaign dashboard view.
///
/// Without an id the first campaign in the analytics list is shown.
pub struct CampaignDashboardSource {
    gateway: Arc<dyn CampaignGateway>,
    campaign_id: Option<String>,
}

impl CampaignDashboardSource {
    pub fn new(gateway: Arc<dyn CampaignGateway>, campaign_id: Option<String>) -> Self {
        Self {
            gateway,
            campaign_id,
        }
    }
}

#[async_trait::async_trait]
impl ViewSource for CampaignDashboardSource {
    type Output = CampaignData;

    fn label(&self) -> String {
        match &self.campaign_id {
            Some(id) => format!("Campaign {}", short_id(id)),
            None => "Campaign".to_string(),
        }
    }

    async fn load(&self) -> Result<Self::Output, GatewayError> {
        fetch_campaign_data(self.gateway.as_ref(), self.campaign_id.as_deref()).await
    }
}

/// First eight characters of an id, for labels.
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::MockCampaignGateway;
    use crate::models::CampaignAnalytics;

    #[test]
    fn short_id_truncates_long_ids_only() {
        assert_eq!(short_id("ce377a89-a781-474f"), "ce377a89");
        assert_eq!(short_id("abc"), "abc");
    }

    #[tokio::test]
    async fn dashboard_source_requests_its_campaign() {
        let mut gateway = MockCampaignGateway::new();
        gateway.expect_fetch_analytics().returning(|| {
            Ok(vec![CampaignAnalytics {
                campaign_id: "ce377a89-a781".into(),
                ..Default::default()
            }])
        });
        gateway
            .expect_fetch_details()
            .returning(|_| Ok(Default::default()));

        let source = CampaignDashboardSource::new(Arc::new(gateway), Some("ce377a89-a781".into()));
        assert_eq!(source.label(), "Campaign ce377a89");
        let data = source.load().await.unwrap();
        assert_eq!(data.campaign_id(), "ce377a89-a781");
    }
}
