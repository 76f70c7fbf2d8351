//! Credential-injecting proxy in front of the Instantly API
//!
//! The dashboard in proxy mode never holds the API key; it calls these routes
//! and the proxy adds `Authorization: Bearer <key>` on the way upstream.

pub mod config;
pub mod error;
pub mod routes;

use axum::{
    Router,
    body::Body,
    extract::Request,
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{any, get},
};
use config::ProxyConfig;
use error::ProxyError;
use routes::{
    ProxyState, analytics_handler, campaign_handler, missing_campaign_handler, test_handler,
};
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::consts::cli_consts::proxy::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};

/// Every preflight succeeds with an empty body before reaching a handler.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, Body::empty()).into_response();
    }
    next.run(request).await
}

pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/instantly/campaigns/analytics", get(analytics_handler))
        .route("/api/instantly/campaigns/", any(missing_campaign_handler))
        .route("/api/instantly/campaigns/{id}", any(campaign_handler))
        .route("/api/test", get(test_handler))
        .with_state(state)
        .layer(middleware::from_fn(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOW_HEADERS),
        ))
        .layer(TraceLayer::new_for_http())
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: ProxyConfig) -> Result<(), ProxyError> {
    let address = format!("0.0.0.0:{}", config.port);
    let upstream = config.upstream_url.clone();
    let app = router(ProxyState::new(config)?);

    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!("Proxy running on {address}, forwarding to {upstream}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Proxy shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received SIGTERM, shutting down");
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use axum::body::to_bytes;
    use axum::http::Method;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app(upstream: &str, api_key: Option<&str>) -> Router {
        let config = ProxyConfig {
            port: 0,
            upstream_url: upstream.to_string(),
            api_key: api_key.map(str::to_string),
            environment: Environment::Proxy,
        };
        router(ProxyState::new(config).unwrap())
    }

    fn request(method: Method, uri: &str) -> Request {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_cors(response: &Response) {
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_HEADERS],
            "Content-Type, Authorization"
        );
    }

    #[tokio::test]
    async fn details_are_forwarded_with_the_credential() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/campaigns/c1")
                    .header("authorization", "Bearer secret");
                then.status(200).json_body(json!({ "daily_limit": 30 }));
            })
            .await;

        let response = app(&server.base_url(), Some("secret"))
            .oneshot(request(Method::GET, "/api/instantly/campaigns/c1"))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response);
        assert_eq!(json_body(response).await, json!({ "daily_limit": 30 }));
    }

    #[tokio::test]
    async fn analytics_query_string_is_passed_through() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/campaigns/analytics")
                    .query_param("id", "c1");
                then.status(200).json_body(json!([{ "campaign_id": "c1" }]));
            })
            .await;

        let response = app(&server.base_url(), Some("secret"))
            .oneshot(request(
                Method::GET,
                "/api/instantly/campaigns/analytics?id=c1",
            ))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn preflight_is_empty_and_carries_cors() {
        let app = app("http://127.0.0.1:9", None);
        for uri in [
            "/api/instantly/campaigns/c1",
            "/api/instantly/campaigns/analytics",
            "/api/test",
        ] {
            let response = app
                .clone()
                .oneshot(request(Method::OPTIONS, uri))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert_cors(&response);
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            assert!(bytes.is_empty());
        }
    }

    #[tokio::test]
    async fn non_get_details_request_is_rejected() {
        let response = app("http://127.0.0.1:9", None)
            .oneshot(request(Method::POST, "/api/instantly/campaigns/c1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({ "error": "Method not allowed" })
        );
    }

    #[tokio::test]
    async fn missing_or_blank_id_is_a_bad_request() {
        let app = app("http://127.0.0.1:9", None);
        for uri in ["/api/instantly/campaigns/", "/api/instantly/campaigns/%20"] {
            let response = app.clone().oneshot(request(Method::GET, uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(
                json_body(response).await,
                json!({ "error": "Campaign ID is required" })
            );
        }
    }

    #[tokio::test]
    async fn upstream_failure_becomes_500_with_details() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/campaigns/c1");
                then.status(401);
            })
            .await;

        let response = app(&server.base_url(), None)
            .oneshot(request(Method::GET, "/api/instantly/campaigns/c1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors(&response);
        assert_eq!(
            json_body(response).await,
            json!({
                "error": "Failed to fetch campaign details",
                "details": "Instantly API responded with status: 401",
            })
        );
    }

    #[tokio::test]
    async fn test_endpoint_reports_key_presence() {
        let response = app("http://127.0.0.1:9", Some("secret"))
            .oneshot(request(Method::GET, "/api/test"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["message"], "API is working!");
        assert_eq!(body["hasApiKey"], true);
        assert_eq!(body["environment"], "Proxy");
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
