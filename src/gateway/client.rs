//! Instantly API Client
//!
//! A reqwest client for the campaign analytics and campaign details endpoints,
//! either through the local proxy or straight to the upstream API.

use crate::consts::cli_consts::network::request_timeout;
use crate::gateway::CampaignGateway;
use crate::gateway::error::GatewayError;
use crate::models::{CampaignAnalytics, CampaignDetails};
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Client, ClientBuilder, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("prospecting-hub/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct InstantlyClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    analytics_scope: Option<String>,
}

impl InstantlyClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// `api_key` is attached as a bearer credential when present; the local proxy
    /// injects its own, so proxy mode usually passes `None`.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self, GatewayError> {
        let client = ClientBuilder::new()
            .connect_timeout(request_timeout())
            .timeout(request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key,
            analytics_scope: None,
        })
    }

    /// Scope analytics requests with `?id=<campaign>`.
    pub fn with_analytics_scope(mut self, campaign_id: Option<String>) -> Self {
        self.analytics_scope = campaign_id.filter(|id| !id.trim().is_empty());
        self
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(AUTHORIZATION, format!("Bearer {}", key)),
            None => request,
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, GatewayError> {
        if !response.status().is_success() {
            return Err(GatewayError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, GatewayError> {
        let url = self.build_url(endpoint);
        log::debug!("GET {}", url);
        let request = self
            .client
            .get(&url)
            .query(query)
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(ACCEPT, "application/json");
        let response = self.authorize(request).send().await?;

        let response = Self::handle_response_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

/// The analytics endpoint answers with either a list or a lone object.
pub(crate) fn normalize_analytics(value: Value) -> Result<Vec<CampaignAnalytics>, GatewayError> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(_) => Ok(serde_json::from_value(value)?),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

#[async_trait::async_trait]
impl CampaignGateway for InstantlyClient {
    async fn fetch_analytics(&self) -> Result<Vec<CampaignAnalytics>, GatewayError> {
        let query: Vec<(&str, &str)> = match &self.analytics_scope {
            Some(id) => vec![("id", id.as_str())],
            None => Vec::new(),
        };
        let value: Value = self.get_json("campaigns/analytics", &query).await?;
        let campaigns = normalize_analytics(value)?;
        log::debug!("Fetched analytics for {} campaign(s)", campaigns.len());
        Ok(campaigns)
    }

    async fn fetch_details(&self, campaign_id: &str) -> Result<CampaignDetails, GatewayError> {
        let endpoint = format!("campaigns/{}", urlencoding::encode(campaign_id));
        let value: Value = self.get_json(&endpoint, &[]).await?;
        if value.is_null() {
            return Ok(CampaignDetails::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn analytics_json(id: &str) -> Value {
        json!({
            "campaign_id": id,
            "campaign_name": "Spring outreach",
            "campaign_status": 1,
            "emails_sent_count": 200,
            "open_count": 50,
        })
    }

    #[test]
    fn single_object_is_wrapped_in_a_list() {
        let campaigns = normalize_analytics(analytics_json("c1")).unwrap();
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].campaign_id, "c1");

        assert!(normalize_analytics(Value::Null).unwrap().is_empty());
        assert!(normalize_analytics(json!("nonsense")).is_err());
    }

    #[test]
    fn urls_join_without_duplicate_slashes() {
        let client = InstantlyClient::new("http://localhost:3000/api/instantly/", None).unwrap();
        assert_eq!(
            client.build_url("/campaigns/analytics"),
            "http://localhost:3000/api/instantly/campaigns/analytics"
        );
    }

    #[tokio::test]
    async fn analytics_request_carries_scope_and_credential() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/campaigns/analytics")
                    .query_param("id", "c1")
                    .header("authorization", "Bearer secret");
                then.status(200).json_body(json!([analytics_json("c1")]));
            })
            .await;

        let client = InstantlyClient::new(server.base_url(), Some("secret".into()))
            .unwrap()
            .with_analytics_scope(Some("c1".into()));
        let campaigns = client.fetch_analytics().await.unwrap();

        mock.assert_async().await;
        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].open_count, 50);
    }

    #[tokio::test]
    async fn lone_analytics_object_is_normalized() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/campaigns/analytics");
                then.status(200).json_body(analytics_json("solo"));
            })
            .await;

        let client = InstantlyClient::new(server.base_url(), None).unwrap();
        let campaigns = client.fetch_analytics().await.unwrap();
        assert_eq!(campaigns[0].campaign_id, "solo");
    }

    #[tokio::test]
    async fn non_success_status_becomes_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/campaigns/c9");
                then.status(404).body("missing");
            })
            .await;

        let client = InstantlyClient::new(server.base_url(), None).unwrap();
        let err = client.fetch_details("c9").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains("missing"));
    }

    #[tokio::test]
    async fn details_keep_open_schema_fields() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/campaigns/c1");
                then.status(200).json_body(json!({
                    "email_list": ["a@x.io"],
                    "daily_limit": 30,
                    "status": 2,
                    "name": "Spring outreach",
                }));
            })
            .await;

        let client = InstantlyClient::new(server.base_url(), None).unwrap();
        let details = client.fetch_details("c1").await.unwrap();
        assert_eq!(details.daily_limit, Some(30));
        assert_eq!(details.status, Some(2));
        assert_eq!(details.get("name"), Some(&json!("Spring outreach")));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        // Port 9 (discard) is closed on test hosts.
        let client = InstantlyClient::new("http://127.0.0.1:9", None).unwrap();
        let err = client.fetch_analytics().await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }
}
