//! Error handling for the gateway module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Reqwest error, typically related to network issues or request failures.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body was not the JSON shape we expect.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// An explicitly requested campaign is absent from the analytics list.
    #[error("Campaign with ID {0} not found")]
    NotFound(String),

    /// The analytics endpoint returned no campaigns at all.
    #[error("No campaign analytics found")]
    EmptyResult,
}

impl GatewayError {
    pub async fn from_response(response: reqwest::Response) -> GatewayError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        GatewayError::Http { status, message }
    }

    /// HTTP status carried by the failure, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            GatewayError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
