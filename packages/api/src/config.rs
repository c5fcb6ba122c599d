//! # Client configuration
//!
//! [`ClientConfig`] selects the backend adapter and where it lives. It can be
//! read from a TOML file:
//!
//! ```toml
//! api_url = "https://docs.example.com/api"
//! backend = "graphql"      # "rest", "graphql" or "memory"
//! graphql_path = "/graphql"
//! min_password_len = 6
//! ```
//!
//! or baked in at build time from `DOCDESK_API_URL` / `DOCDESK_BACKEND`
//! ([`ClientConfig::from_env`]). A browser bundle has no runtime environment,
//! so the variables are captured when the crate is compiled.
//!
//! Every field has a default, so an empty file is the default configuration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which protocol binding talks to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Rest,
    #[default]
    Graphql,
    /// In-process fake backend, for demos and tests.
    Memory,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" => Ok(BackendKind::Rest),
            "graphql" => Ok(BackendKind::Graphql),
            "memory" => Ok(BackendKind::Memory),
            other => Err(format!("Unknown backend: {other}")),
        }
    }
}

/// Top-level client configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_graphql_path")]
    pub graphql_path: String,
    /// Minimum password length enforced before registration is sent.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

fn default_api_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_graphql_path() -> String {
    "/graphql".to_string()
}

fn default_min_password_len() -> usize {
    6
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            backend: BackendKind::default(),
            graphql_path: default_graphql_path(),
            min_password_len: default_min_password_len(),
        }
    }
}

impl ClientConfig {
    /// Create a config for the given API base URL and backend.
    pub fn new(api_url: impl Into<String>, backend: BackendKind) -> Self {
        Self {
            api_url: api_url.into(),
            backend,
            ..Self::default()
        }
    }

    /// Build from `DOCDESK_API_URL` and `DOCDESK_BACKEND` as set at compile time.
    pub fn from_env() -> Self {
        Self::from_vars(option_env!("DOCDESK_API_URL"), option_env!("DOCDESK_BACKEND"))
    }

    fn from_vars(api_url: Option<&str>, backend: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(kind) = backend {
            match kind.parse() {
                Ok(kind) => config.backend = kind,
                Err(e) => tracing::warn!("{e}, falling back to {:?}", config.backend),
            }
        }
        config
    }

    /// Builder method to pick the backend.
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    /// The base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Full URL of the GraphQL endpoint.
    pub fn graphql_endpoint(&self) -> String {
        let path = self.graphql_path.trim_start_matches('/');
        format!("{}/{path}", self.base_url())
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_url, "http://localhost:3000");
        assert_eq!(config.backend, BackendKind::Graphql);
        assert_eq!(config.min_password_len, 6);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::new("https://docs.example.com/api/", BackendKind::Rest);
        let text = config.to_toml().unwrap();
        assert!(text.contains("backend = \"rest\""));
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_graphql_endpoint_joins_cleanly() {
        let config = ClientConfig::new("https://docs.example.com/api/", BackendKind::Graphql);
        assert_eq!(config.base_url(), "https://docs.example.com/api");
        assert_eq!(config.graphql_endpoint(), "https://docs.example.com/api/graphql");
    }

    #[test]
    fn test_from_vars() {
        let config = ClientConfig::from_vars(Some("https://api.test"), Some("REST"));
        assert_eq!(config.api_url, "https://api.test");
        assert_eq!(config.backend, BackendKind::Rest);

        let config = ClientConfig::from_vars(Some("  "), Some("carrier-pigeon"));
        assert_eq!(config, ClientConfig::default());
    }
}
