use crate::config::resolve_api_key;
use crate::consts::cli_consts::network::UPSTREAM_BASE_URL;
use crate::consts::cli_consts::proxy::DEFAULT_PORT;
use crate::environment::Environment;
use crate::proxy::error::ProxyError;
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

pub const PORT_VAR: &str = "PROXY_PORT";
pub const UPSTREAM_VAR: &str = "INSTANTLY_UPSTREAM_URL";
pub const ENVIRONMENT_VAR: &str = "PROSPECTING_HUB_ENVIRONMENT";

#[derive(Clone)]
pub struct ProxyConfig {
    pub port: u16,
    pub upstream_url: String,
    pub api_key: Option<String>,
    pub environment: Environment,
}

impl ProxyConfig {
    pub fn load() -> Result<Self, ProxyError> {
        let api_key = resolve_api_key();
        if api_key.is_none() {
            warn!("No Instantly API key configured; upstream requests will be unauthenticated");
        }
        Ok(Self {
            port: try_load(PORT_VAR, DEFAULT_PORT)?,
            upstream_url: try_load(UPSTREAM_VAR, UPSTREAM_BASE_URL)?,
            api_key,
            environment: try_load(ENVIRONMENT_VAR, "proxy")?,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for ProxyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyConfig")
            .field("port", &self.port)
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .finish()
    }
}

fn try_load<T: FromStr>(key: &'static str, default: &str) -> Result<T, ProxyError>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e: T::Err| ProxyError::Config {
            key,
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_the_key() {
        let config = ProxyConfig {
            port: 3000,
            upstream_url: UPSTREAM_BASE_URL.into(),
            api_key: Some("super-secret".into()),
            environment: Environment::Proxy,
        };
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn unset_variable_uses_the_default() {
        let port: u16 = try_load("PROSPECTING_HUB_TEST_UNSET_PORT", "3000").unwrap();
        assert_eq!(port, 3000);
    }

    #[test]
    fn unparsable_default_is_a_config_error() {
        let err = try_load::<u16>("PROSPECTING_HUB_TEST_UNSET_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, ProxyError::Config { key: "PROSPECTING_HUB_TEST_UNSET_PORT", .. }));
    }
}
