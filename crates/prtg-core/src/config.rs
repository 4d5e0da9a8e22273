//! Configuration structures for PRTG clients.
//!
//! This module provides the validated configuration used to connect to a
//! PRTG instance: base URL, TLS settings, and request timeout.

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a PRTG client instance.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PrtgClientConfig {
    /// Base URL of the PRTG instance (e.g. `https://prtg.example.com`)
    #[validate(url)]
    pub server_url: String,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to a custom CA certificate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<std::path::PathBuf>,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl PrtgClientConfig {
    /// Create a new client configuration with required parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or validation fails.
    pub fn new(server_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            server_url: server_url.into(),
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: default_request_timeout_secs(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set a custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: std::path::PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set the request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Parse the configured server URL.
    ///
    /// A trailing slash is appended when missing so that joining endpoint
    /// paths keeps any path prefix the instance is served under.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEndpoint`] when the URL cannot be parsed.
    pub fn parse_server_url(&self) -> Result<Url, Error> {
        let raw = if self.server_url.ends_with('/') {
            self.server_url.clone()
        } else {
            format!("{}/", self.server_url)
        };
        Url::parse(&raw).map_err(Error::from)
    }

    /// The request timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_valid() {
        let config = PrtgClientConfig::new("https://prtg.example.com").unwrap();
        assert_eq!(config.server_url, "https://prtg.example.com");
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_config_new_invalid_url() {
        let err = PrtgClientConfig::new("not a url").unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn test_config_builder_methods() {
        let config = PrtgClientConfig::new("https://prtg.example.com")
            .unwrap()
            .with_tls_verify(false)
            .with_timeout(60);

        assert!(!config.tls_verify);
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_parse_server_url_appends_slash() {
        let config = PrtgClientConfig::new("https://prtg.example.com/prtg").unwrap();
        let url = config.parse_server_url().unwrap();
        assert_eq!(url.as_str(), "https://prtg.example.com/prtg/");
    }

    #[test]
    fn test_parse_server_url_keeps_slash() {
        let config = PrtgClientConfig::new("https://prtg.example.com/").unwrap();
        let url = config.parse_server_url().unwrap();
        assert_eq!(url.as_str(), "https://prtg.example.com/");
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: PrtgClientConfig =
            serde_json::from_str(r#"{"server_url": "https://prtg.example.com"}"#).unwrap();
        assert!(config.tls_verify);
        assert_eq!(config.request_timeout_secs, 30);
        assert!(config.tls_ca_cert.is_none());
    }
}
