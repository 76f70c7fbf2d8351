use crate::consts::cli_consts::network::{LOCAL_PROXY_URL, UPSTREAM_BASE_URL};
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// Represents where the dashboard sends its campaign requests.
#[derive(Clone, Default, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Through the local credential proxy started with `serve`.
    #[default]
    Proxy,
    /// Straight to the Instantly API. Requires an API key on this machine.
    Direct,
}

impl Environment {
    /// Returns the campaign API base URL associated with the environment.
    pub fn api_base_url(&self) -> String {
        match self {
            Environment::Proxy => LOCAL_PROXY_URL.to_string(),
            Environment::Direct => UPSTREAM_BASE_URL.to_string(),
        }
    }

    /// Whether requests must carry the bearer credential themselves.
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Environment::Direct)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "proxy" | "local" => Ok(Environment::Proxy),
            "direct" | "production" => Ok(Environment::Direct),
            _ => Err(format!("unknown environment '{}', expected proxy or direct", s)),
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Proxy => write!(f, "Proxy"),
            Environment::Direct => write!(f, "Direct"),
        }
    }
}

impl Debug for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Environment::{}, URL: {}", self, self.api_base_url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_case_insensitively() {
        assert_eq!("Proxy".parse::<Environment>(), Ok(Environment::Proxy));
        assert_eq!("local".parse::<Environment>(), Ok(Environment::Proxy));
        assert_eq!("DIRECT".parse::<Environment>(), Ok(Environment::Direct));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn only_direct_requires_a_key() {
        assert!(Environment::Direct.requires_api_key());
        assert!(!Environment::Proxy.requires_api_key());
        assert!(Environment::Direct.api_base_url().starts_with("https://"));
    }
}
