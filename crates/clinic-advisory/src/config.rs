//! Advisory client configuration.
//!
//! Resolved once at startup and handed to the client; nothing reads the
//! process environment while a request is in flight.

use std::fmt;

/// Credential gating every network call. Empty counts as absent.
pub const API_KEY_VAR: &str = "API_KEY";
pub const MODEL_VAR: &str = "CLINIC_AI_MODEL";
pub const BASE_URL_VAR: &str = "CLINIC_AI_BASE_URL";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Settings for the generative text service.
#[derive(Clone, PartialEq, Eq)]
pub struct AdvisoryConfig {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl AdvisoryConfig {
    /// Default model and endpoint with the given credential.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Configuration with no credential; every request short-circuits.
    pub fn unconfigured() -> Self {
        Self::new(None)
    }

    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup(API_KEY_VAR));
        if let Some(model) = lookup(MODEL_VAR).filter(|m| !m.trim().is_empty()) {
            config.model = model;
        }
        if let Some(url) = lookup(BASE_URL_VAR).filter(|u| !u.trim().is_empty()) {
            config = config.with_base_url(&url);
        }
        config
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = AdvisoryConfig::from_lookup(lookup_from(&[]));
        assert!(!config.has_credential());
        assert_eq!(config.model(), DEFAULT_MODEL);
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_empty_key_counts_as_absent() {
        let config = AdvisoryConfig::from_lookup(lookup_from(&[(API_KEY_VAR, "")]));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_overrides() {
        let config = AdvisoryConfig::from_lookup(lookup_from(&[
            (API_KEY_VAR, "secret"),
            (MODEL_VAR, "gemini-2.0-pro"),
            (BASE_URL_VAR, "http://localhost:8080/"),
        ]));
        assert_eq!(config.api_key(), Some("secret"));
        assert_eq!(config.model(), "gemini-2.0-pro");
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AdvisoryConfig::new(Some("secret".into()));
        let debug = format!("{:?}", config);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
