use crate::gateway::error::GatewayError;

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

#[derive(Debug, Clone)]
pub struct ErrorClassifier;

impl ErrorClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify_fetch_error(&self, error: &GatewayError) -> LogLevel {
        match error {
            // Non-critical: Temporary server issues
            GatewayError::Http { status, .. } if *status == 429 => LogLevel::Debug,
            GatewayError::Http { status, .. } if (500..=599).contains(status) => LogLevel::Warn,

            // Critical: Auth, malformed responses, missing campaigns
            GatewayError::Http { status, .. } if *status == 401 => LogLevel::Error,
            GatewayError::Http { status, .. } if *status == 403 => LogLevel::Error,
            GatewayError::Decode(_) => LogLevel::Error,
            GatewayError::NotFound(_) | GatewayError::EmptyResult => LogLevel::Error,

            // Network issues - usually temporary
            _ => LogLevel::Warn,
        }
    }
}

impl Default for ErrorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> GatewayError {
        GatewayError::Http {
            status,
            message: String::new(),
        }
    }

    #[test]
    fn auth_failures_are_errors() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_fetch_error(&http(401)), LogLevel::Error);
        assert_eq!(classifier.classify_fetch_error(&http(403)), LogLevel::Error);
    }

    #[test]
    fn transient_failures_are_quieter() {
        let classifier = ErrorClassifier::new();
        assert_eq!(classifier.classify_fetch_error(&http(429)), LogLevel::Debug);
        assert_eq!(classifier.classify_fetch_error(&http(503)), LogLevel::Warn);
        assert_eq!(classifier.classify_fetch_error(&http(404)), LogLevel::Warn);
    }

    #[test]
    fn missing_campaigns_are_errors() {
        let classifier = ErrorClassifier::new();
        assert_eq!(
            classifier.classify_fetch_error(&GatewayError::NotFound("abc".into())),
            LogLevel::Error
        );
        assert_eq!(
            classifier.classify_fetch_error(&GatewayError::EmptyResult),
            LogLevel::Error
        );
    }
}
