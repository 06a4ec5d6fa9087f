//! Client configuration
//!
//! The backend base URL is resolved once at start-up and never changes.
//! `FOLIO_API_URL` overrides the local development default.

use crate::error::{ClientError, Result};
use folio_content::MediaResolver;
use reqwest::Url;
use std::sync::OnceLock;

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "FOLIO_API_URL";

/// Environment variable holding the contact inbox endpoint
pub const CONTACT_ENDPOINT_ENV: &str = "FOLIO_CONTACT_ENDPOINT";

/// Backend used when nothing is configured
pub const DEFAULT_API_URL: &str = "http://localhost:1337";

static GLOBAL: OnceLock<ContentConfig> = OnceLock::new();

/// Content backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentConfig {
    base_url: String,
    /// Request timeout in seconds (`None` keeps the transport default)
    pub timeout_secs: Option<u64>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl ContentConfig {
    /// Create a config for `base_url`. Trailing slashes are stripped.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let base_url = base_url.as_ref().trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config("base URL is empty".to_string()));
        }
        Url::parse(base_url)
            .map_err(|e| ClientError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;

        Ok(Self {
            base_url: base_url.to_string(),
            timeout_secs: None,
        })
    }

    /// Read `FOLIO_API_URL`, falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup (environment, `.env`, tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        match lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Backend host, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// REST root (`{base}/api`)
    pub fn api_root(&self) -> String {
        format!("{}/api", self.base_url)
    }

    /// Media resolver bound to the backend host
    pub fn media(&self) -> MediaResolver {
        MediaResolver::new(self.base_url.clone())
    }

    /// Install the process-wide config. Fails if one is already installed.
    pub fn init_global(config: Self) -> Result<&'static Self> {
        GLOBAL
            .set(config)
            .map_err(|_| ClientError::Config("global config already initialized".to_string()))?;
        Ok(Self::global())
    }

    /// The process-wide config, initialized from the environment on first use.
    ///
    /// An unparsable `FOLIO_API_URL` falls back to the default here; call
    /// [`ContentConfig::init_global`] at start-up to surface that error.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            Self::from_env().unwrap_or_else(|e| {
                tracing::warn!("{}, using {}", e, DEFAULT_API_URL);
                Self::default()
            })
        })
    }
}

/// Contact inbox configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactConfig {
    /// Form endpoint of the inbox service (e.g. `https://formspree.io/f/{id}`)
    pub endpoint: Option<String>,
}

impl ContactConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            endpoint: lookup(CONTACT_ENDPOINT_ENV).filter(|v| !v.trim().is_empty()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_local_backend() {
        let config = ContentConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.base_url(), "http://localhost:1337");
        assert_eq!(config.api_root(), "http://localhost:1337/api");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn test_env_override_strips_trailing_slash() {
        let config = ContentConfig::from_lookup(|key| {
            (key == API_URL_ENV).then(|| "https://cms.example.com/".to_string())
        })
        .unwrap();
        assert_eq!(config.base_url(), "https://cms.example.com");
        assert_eq!(config.media().base(), "https://cms.example.com");
    }

    #[test]
    fn test_blank_env_uses_default() {
        let config = ContentConfig::from_lookup(|_| Some("  ".to_string())).unwrap();
        assert_eq!(config, ContentConfig::default());
    }

    #[test]
    fn test_invalid_url_rejected() {
        assert!(matches!(
            ContentConfig::new("not a url"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_contact_endpoint_optional() {
        assert_eq!(ContactConfig::from_lookup(|_| None).endpoint, None);
        let config = ContactConfig::from_lookup(|key| {
            (key == CONTACT_ENDPOINT_ENV).then(|| "https://formspree.io/f/abc".to_string())
        });
        assert_eq!(config.endpoint.as_deref(), Some("https://formspree.io/f/abc"));
    }
}
