use serde::{Deserialize, Serialize};

pub const DEFAULT_NOMICS_API_URL: &str = "https://api.nomics.com/v1";

/// Configuration for the Nomics pricing API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NomicsConfig {
    /// Base URL, without the `/currencies/ticker` path
    pub base_url: String,
    /// API key sent as the `key` query parameter
    pub api_key: String,
}

impl Default for NomicsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_NOMICS_API_URL.to_string(),
            api_key: String::new(),
        }
    }
}

impl NomicsConfig {
    /// Reads `API_KEY` and `NOMICS_API_URL`. A missing key is left empty;
    /// the upstream rejects it with its own authentication error.
    pub fn from_env() -> Self {
        let api_key = std::env::var("API_KEY").unwrap_or_default();
        let base_url = std::env::var("NOMICS_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_NOMICS_API_URL.to_string());

        Self { base_url, api_key }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}
