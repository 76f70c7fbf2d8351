use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Campaign ID is required")]
    MissingCampaignId,

    /// The upstream call failed or answered with a non-success status.
    #[error("Failed to fetch {resource}")]
    Upstream {
        resource: &'static str,
        details: String,
    },

    #[error("Invalid {key} value: {message}")]
    Config { key: &'static str, message: String },

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ProxyError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                json!({ "error": self.to_string() }),
            ),
            ProxyError::MissingCampaignId => {
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ProxyError::Upstream { details, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string(), "details": details }),
            ),
            ProxyError::Config { .. } | ProxyError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": self.to_string() }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
