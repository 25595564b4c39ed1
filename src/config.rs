//! Application settings persisted next to the history log.

use log::warn;
use url::Url;

use crate::error::AuralisError;
use crate::storage::{KeyValueStore, STORAGE_BACKEND_URL};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    backend_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Validated config for `backend_url`. Only http(s) URLs are accepted and
    /// trailing slashes are dropped.
    pub fn with_backend_url(backend_url: &str) -> Result<Self, AuralisError> {
        let trimmed = backend_url.trim();
        let parsed = Url::parse(trimmed)
            .map_err(|e| AuralisError::Config(format!("Invalid backend URL '{}': {}", trimmed, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AuralisError::Config(format!(
                "Backend URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            backend_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    /// Load the saved config, falling back to defaults when nothing usable is stored.
    pub fn load(storage: &impl KeyValueStore) -> Self {
        let saved = match storage.get_raw(STORAGE_BACKEND_URL) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Self::default(),
            Err(e) => {
                warn!("Failed to read backend URL: {}", e);
                return Self::default();
            }
        };

        serde_json::from_str::<String>(&saved)
            .map_err(AuralisError::from)
            .and_then(|url| Self::with_backend_url(&url))
            .unwrap_or_else(|e| {
                warn!("Ignoring saved backend URL: {}", e);
                Self::default()
            })
    }

    pub fn save(&self, storage: &impl KeyValueStore) -> Result<(), AuralisError> {
        let json = serde_json::to_string(&self.backend_url)?;
        storage.set_raw(STORAGE_BACKEND_URL, &json)
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    pub fn analyze_endpoint(&self) -> String {
        format!("{}/analyze", self.backend_url)
    }
}
