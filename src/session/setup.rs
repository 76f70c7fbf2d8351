//! Session setup and initialization

use crate::config::{Config, resolve_api_key};
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::environment::Environment;
use crate::events::{Event, EventSender};
use crate::gateway::{CampaignGateway, InstantlyClient};
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};

/// Session data for both TUI and watch modes
pub struct SessionData {
    pub environment: Environment,
    pub config: Config,
    /// Base URL every campaign request goes to
    pub api_base_url: String,
    pub gateway: Arc<dyn CampaignGateway>,
    /// Pollers report through clones of this sender
    pub event_sender: EventSender,
    pub event_receiver: mpsc::Receiver<Event>,
    /// Shutdown sender to stop all background tasks
    pub shutdown_sender: broadcast::Sender<()>,
}

impl SessionData {
    pub fn poll_interval(&self) -> Duration {
        self.config.poll_interval()
    }
}

/// Sets up a session
///
/// This function handles the setup shared by the TUI and watch modes:
/// 1. Resolves the API base URL and credential for the environment
/// 2. Builds the campaign gateway
/// 3. Creates the event and shutdown channels
///
/// # Returns
/// * `Ok(SessionData)` - Successfully set up session
/// * `Err` - Direct mode without an API key, or the HTTP client failed to build
pub fn setup_session(config: Config, env: Environment) -> Result<SessionData, Box<dyn Error>> {
    let api_base_url = config
        .api_base_url
        .clone()
        .unwrap_or_else(|| env.api_base_url());

    // The proxy attaches its own credential; only direct mode sends one.
    let api_key = if env.requires_api_key() {
        let key = resolve_api_key().ok_or_else(|| {
            format!(
                "{} mode needs an API key. Set {} or {}.",
                env,
                crate::config::API_KEY_VAR,
                crate::config::API_KEY_FILE_VAR
            )
        })?;
        Some(key)
    } else {
        None
    };

    let client = InstantlyClient::new(api_base_url.clone(), api_key)?
        .with_analytics_scope(config.analytics_scope_id.clone());

    let (event_sender, event_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
    // Create shutdown channel - only one shutdown signal needed
    let (shutdown_sender, _) = broadcast::channel(1);

    Ok(SessionData {
        environment: env,
        config,
        api_base_url,
        gateway: Arc::new(client),
        event_sender: EventSender::new(event_sender),
        event_receiver,
        shutdown_sender,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn proxy_mode_needs_no_key() {
        let session = setup_session(Config::default(), Environment::Proxy).unwrap();
        assert_eq!(session.api_base_url, "http://localhost:3000/api/instantly");
        assert_eq!(session.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn configured_base_url_wins() {
        let config = Config {
            api_base_url: Some("http://127.0.0.1:8080/api/instantly".into()),
            ..Config::default()
        };
        let session = setup_session(config, Environment::Proxy).unwrap();
        assert_eq!(session.api_base_url, "http://127.0.0.1:8080/api/instantly");
    }
}
