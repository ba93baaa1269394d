//! Pipeline types matching the front end's API surface.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use toolverse_core::Error;

/// Optional capability requested from the generative service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolDirective {
    /// Ground the answer in live web search and return source references.
    SearchGrounding,
}

/// One call to the generative service. Built per invocation, never retried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerativeRequest {
    pub prompt: String,
    pub model: String,
    pub temperature: f64,
    #[serde(rename = "topP")]
    pub top_p: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDirective>,
}

impl GenerativeRequest {
    pub fn wants_grounding(&self) -> bool {
        self.tools.contains(&ToolDirective::SearchGrounding)
    }
}

/// Supporting source returned alongside generated text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingReference {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl GroundingReference {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: None,
        }
    }
}

/// Classified result of a gateway call.
#[derive(Debug)]
pub enum GenerativeOutcome {
    Success {
        text: String,
        references: Vec<GroundingReference>,
    },
    /// The call completed but produced no text.
    Empty,
    Failure(Error),
}

impl GenerativeOutcome {
    /// Classify raw service text: blank text is `Empty`.
    pub fn from_text(text: Option<String>, references: Vec<GroundingReference>) -> Self {
        match text {
            Some(text) if !text.trim().is_empty() => GenerativeOutcome::Success { text, references },
            _ => GenerativeOutcome::Empty,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerativeOutcome::Success { .. } => "success",
            GenerativeOutcome::Empty => "empty",
            GenerativeOutcome::Failure(_) => "failure",
        }
    }
}

/// Daily wellness plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WellnessPlan {
    pub summary: String,
    pub habits: Vec<String>,
    pub mindfulness: String,
    pub nutrition: String,
}

/// One headline and the source it is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineItem {
    pub title: String,
    pub url: String,
}

/// Headlines from one refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlineList {
    pub items: Vec<HeadlineItem>,
    #[serde(rename = "generatedAt")]
    pub generated_at: DateTime<Utc>,
}

/// Generative config response (key masked).
#[derive(Debug, Clone, Serialize)]
pub struct GenAIStatus {
    #[serde(rename = "apiKeyConfigured")]
    pub api_key_configured: bool,
    #[serde(rename = "wellnessModel")]
    pub wellness_model: String,
    #[serde(rename = "headlineModel")]
    pub headline_model: String,
    pub temperature: f64,
    #[serde(rename = "topP")]
    pub top_p: f64,
}
