//! Search-grounded news headlines.

use chrono::Utc;
use serde::Deserialize;

use crate::assembler::{Feature, Retention};
use crate::config::GenAIConfig;
use crate::extract::extract_repeated;
use crate::grounding::{correlate, MAX_HEADLINES};
use crate::types::{GenerativeRequest, GroundingReference, HeadlineList, ToolDirective};

const TITLE: &str = "TITLE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeadlineInput {
    #[serde(default)]
    pub topic: Option<String>,
}

impl HeadlineInput {
    fn topic(&self) -> Option<&str> {
        self.topic.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Headline refresh. Keeps the last list visible through refresh and failure.
pub struct HeadlineFeature {
    model: String,
    temperature: f64,
    top_p: f64,
}

impl HeadlineFeature {
    pub fn new(config: &GenAIConfig) -> Self {
        Self {
            model: config.headline_model.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }
}

pub fn build_prompt(input: &HeadlineInput) -> String {
    let subject = match input.topic() {
        Some(topic) => format!("about \"{}\"", topic),
        None => "from around the world".to_string(),
    };
    format!(
        "Search the web for the {MAX_HEADLINES} most important news stories today {subject}.\n\
         Respond with one line per story and nothing else, formatted exactly like this:\n\
         {TITLE}: [concise headline]"
    )
}

impl Feature for HeadlineFeature {
    type Input = HeadlineInput;
    type Output = HeadlineList;

    fn name(&self) -> &'static str {
        "headlines"
    }

    fn retention(&self) -> Retention {
        Retention::KeepPrevious
    }

    fn failure_notice(&self) -> &'static str {
        "Couldn't refresh headlines. Please try again."
    }

    fn request(&self, input: &HeadlineInput) -> GenerativeRequest {
        GenerativeRequest {
            prompt: build_prompt(input),
            model: self.model.clone(),
            temperature: self.temperature,
            top_p: self.top_p,
            tools: vec![ToolDirective::SearchGrounding],
        }
    }

    fn assemble(&self, text: &str, references: &[GroundingReference]) -> HeadlineList {
        let titles = extract_repeated(text, TITLE);
        HeadlineList {
            items: correlate(&titles, references),
            generated_at: Utc::now(),
        }
    }
}
