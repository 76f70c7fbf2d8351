use crate::proxy::config::ProxyConfig;
use crate::proxy::error::ProxyError;
use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::Method,
};
use chrono::{SecondsFormat, Utc};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Clone)]
pub struct ProxyState {
    pub client: reqwest::Client,
    pub config: Arc<ProxyConfig>,
}

impl ProxyState {
    pub fn new(config: ProxyConfig) -> Result<Self, ProxyError> {
        let client = reqwest::Client::builder()
            .timeout(crate::consts::cli_consts::network::request_timeout())
            .build()
            .map_err(|e| ProxyError::Config {
                key: "http client",
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// GET `{upstream}/{path}` with the credential attached.
    async fn forward(
        &self,
        resource: &'static str,
        path: &str,
        query: Option<&str>,
    ) -> Result<Value, ProxyError> {
        let mut url = format!("{}/{}", self.config.upstream_url.trim_end_matches('/'), path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }
        debug!(%url, has_api_key = self.config.has_api_key(), "Forwarding request");

        let mut request = self.client.get(&url).header(CONTENT_TYPE, "application/json");
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let upstream_error = |details: String| {
            error!(resource, %details, "Upstream request failed");
            ProxyError::Upstream { resource, details }
        };

        let response = request
            .send()
            .await
            .map_err(|e| upstream_error(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(upstream_error(format!(
                "Instantly API responded with status: {}",
                status.as_u16()
            )));
        }
        response
            .json::<Value>()
            .await
            .map_err(|e| upstream_error(e.to_string()))
    }
}

pub async fn analytics_handler(
    State(state): State<ProxyState>,
    RawQuery(query): RawQuery,
) -> Result<Json<Value>, ProxyError> {
    info!(query = query.as_deref().unwrap_or(""), "Campaign analytics request");
    let body = state
        .forward("campaign analytics", "campaigns/analytics", query.as_deref())
        .await?;
    Ok(Json(body))
}

pub async fn campaign_handler(
    State(state): State<ProxyState>,
    method: Method,
    Path(id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    if method != Method::GET {
        return Err(ProxyError::MethodNotAllowed);
    }
    let id = id.trim();
    if id.is_empty() {
        return Err(ProxyError::MissingCampaignId);
    }
    info!(campaign_id = id, "Campaign details request");

    let path = format!("campaigns/{}", urlencoding::encode(id));
    let body = state.forward("campaign details", &path, None).await?;
    Ok(Json(body))
}

/// `/api/instantly/campaigns/` with nothing after the slash.
pub async fn missing_campaign_handler(method: Method) -> ProxyError {
    if method != Method::GET {
        return ProxyError::MethodNotAllowed;
    }
    ProxyError::MissingCampaignId
}

pub async fn test_handler(State(state): State<ProxyState>) -> Json<Value> {
    Json(json!({
        "message": "API is working!",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        "environment": state.config.environment.to_string(),
        "hasApiKey": state.config.has_api_key(),
    }))
}
