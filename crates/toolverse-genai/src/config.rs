//! Generative service configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::GenAIStatus;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_WELLNESS_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_HEADLINE_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_TOP_P: f64 = 0.95;

/// Environment variables consulted for the API key, in order.
const API_KEY_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

/// Generative configuration (read from genai-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenAIConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_wellness_model")]
    pub wellness_model: String,
    #[serde(default = "default_headline_model")]
    pub headline_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_wellness_model() -> String {
    DEFAULT_WELLNESS_MODEL.into()
}
fn default_headline_model() -> String {
    DEFAULT_HEADLINE_MODEL.into()
}
fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}
fn default_top_p() -> f64 {
    DEFAULT_TOP_P
}

impl Default for GenAIConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.into(),
            wellness_model: DEFAULT_WELLNESS_MODEL.into(),
            headline_model: DEFAULT_HEADLINE_MODEL.into(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
        }
    }
}

impl GenAIConfig {
    /// Load config from file, falling back to env vars and defaults.
    pub fn load(config_path: &Path) -> Self {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// Load config from file, resolving a missing API key through `lookup`.
    /// Blank values are skipped so the next variable still gets a chance.
    pub fn load_with<F>(config_path: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config: GenAIConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        if config.api_key.is_none() {
            config.api_key = API_KEY_VARS
                .iter()
                .find_map(|&var| lookup(var).filter(|k| !k.trim().is_empty()));
        }

        config
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build the public status response (no API key exposed).
    pub fn to_status(&self) -> GenAIStatus {
        GenAIStatus {
            api_key_configured: self.has_api_key(),
            wellness_model: self.wellness_model.clone(),
            headline_model: self.headline_model.clone(),
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}
