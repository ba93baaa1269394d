//! Generative call gateway.
//!
//! One request, one attempt. The outcome is classified into success, empty
//! or failure; nothing here retries or enforces a timeout, so a hung call
//! keeps its caller in `Generating` until the service answers.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use toolverse_core::Error;
use tracing::{debug, warn};

use crate::config::GenAIConfig;
use crate::types::{GenerativeOutcome, GenerativeRequest, GroundingReference};

/// External text-generation service.
#[async_trait]
pub trait GenerativeGateway: Send + Sync {
    /// Issue the request once and classify the result.
    async fn invoke(&self, request: &GenerativeRequest) -> GenerativeOutcome;
}

/// Google Generative Language `generateContent` endpoint.
pub struct GeminiGateway {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiGateway {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(client: Client, config: &GenAIConfig) -> Self {
        Self::new(client, config.base_url.clone(), config.api_key.clone())
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerativeGateway for GeminiGateway {
    async fn invoke(&self, request: &GenerativeRequest) -> GenerativeOutcome {
        let Some(api_key) = &self.api_key else {
            return GenerativeOutcome::Failure(Error::Config("no API key configured".into()));
        };

        let url = self.endpoint(&request.model);
        debug!(
            "Generating with model {} (grounding={})",
            request.model,
            request.wants_grounding()
        );

        let response = match self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&build_payload(request))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Generative request failed: {}", e);
                return GenerativeOutcome::Failure(Error::Http(format!("Request failed: {}", e)));
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return GenerativeOutcome::Failure(Error::Http(format!(
                    "Failed to read response: {}",
                    e
                )))
            }
        };

        if !status.is_success() {
            let message = service_error_message(&body)
                .unwrap_or_else(|| format!("HTTP {}: {}", status, body));
            warn!("Generative service error: {}", message);
            return GenerativeOutcome::Failure(Error::Service(message));
        }

        classify_response(&body)
    }
}

/// Request body for `generateContent`.
pub fn build_payload(request: &GenerativeRequest) -> Value {
    let mut body = json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": request.prompt }],
        }],
        "generationConfig": {
            "temperature": request.temperature,
            "topP": request.top_p,
        },
    });

    if request.wants_grounding() {
        body["tools"] = json!([{ "googleSearch": {} }]);
    }

    body
}

/// Classify a successful HTTP body into an outcome.
pub fn classify_response(body: &str) -> GenerativeOutcome {
    let v: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            return GenerativeOutcome::Failure(Error::Decode(format!(
                "Failed to parse response JSON: {}",
                e
            )))
        }
    };

    if v.get("error").is_some() {
        let message = service_error_message(body).unwrap_or_else(|| "Unknown error".into());
        return GenerativeOutcome::Failure(Error::Service(message));
    }

    let candidate = &v["candidates"][0];

    let text = candidate["content"]["parts"].as_array().map(|parts| {
        parts
            .iter()
            .filter_map(|part| part["text"].as_str())
            .collect::<String>()
    });

    let references = candidate["groundingMetadata"]["groundingChunks"]
        .as_array()
        .map(|chunks| {
            chunks
                .iter()
                .filter_map(|chunk| {
                    let web = &chunk["web"];
                    web["uri"].as_str().map(|uri| GroundingReference {
                        uri: uri.to_string(),
                        title: web["title"].as_str().map(str::to_string),
                    })
                })
                .collect()
        })
        .unwrap_or_default();

    GenerativeOutcome::from_text(text, references)
}

fn service_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ToolDirective;

    fn request(tools: Vec<ToolDirective>) -> GenerativeRequest {
        GenerativeRequest {
            prompt: "Hello".into(),
            model: "gemini-test".into(),
            temperature: 0.7,
            top_p: 0.95,
            tools,
        }
    }

    #[test]
    fn test_payload_without_grounding() {
        let payload = build_payload(&request(Vec::new()));
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "Hello");
        assert_eq!(payload["generationConfig"]["temperature"], 0.7);
        assert_eq!(payload["generationConfig"]["topP"], 0.95);
        assert!(payload.get("tools").is_none());
    }

    #[test]
    fn test_payload_with_grounding() {
        let payload = build_payload(&request(vec![ToolDirective::SearchGrounding]));
        let tools = payload["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert!(tools[0]["googleSearch"].is_object());
    }

    #[test]
    fn test_classify_success_with_references_in_order() {
        let body = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "TITLE: One\n" }, { "text": "TITLE: Two" }] },
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://a", "title": "a.com" } },
                        { "retrievedContext": {} },
                        { "web": { "uri": "https://b" } }
                    ]
                }
            }]
        })
        .to_string();

        match classify_response(&body) {
            GenerativeOutcome::Success { text, references } => {
                assert_eq!(text, "TITLE: One\nTITLE: Two");
                assert_eq!(
                    references,
                    vec![
                        GroundingReference {
                            uri: "https://a".into(),
                            title: Some("a.com".into())
                        },
                        GroundingReference::new("https://b"),
                    ]
                );
            }
            other => panic!("expected success, got {}", other.kind()),
        }
    }

    #[test]
    fn test_classify_empty() {
        for body in [
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#,
            r#"{"candidates":[{"finishReason":"SAFETY"}]}"#,
        ] {
            assert!(matches!(classify_response(body), GenerativeOutcome::Empty), "{}", body);
        }
    }

    #[test]
    fn test_classify_failures() {
        assert!(matches!(
            classify_response("<html>oops</html>"),
            GenerativeOutcome::Failure(Error::Decode(_))
        ));
        match classify_response(r#"{"error":{"code":429,"message":"quota"}}"#) {
            GenerativeOutcome::Failure(Error::Service(msg)) => assert_eq!(msg, "quota"),
            other => panic!("expected service failure, got {}", other.kind()),
        }
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_network() {
        let gateway = GeminiGateway::new(Client::new(), crate::config::DEFAULT_BASE_URL, None);
        let outcome = gateway.invoke(&request(Vec::new())).await;
        assert!(matches!(outcome, GenerativeOutcome::Failure(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_classified() {
        // Reserve a local port, then release it so nothing is listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let client = Client::builder().no_proxy().build().unwrap();
        let gateway =
            GeminiGateway::new(client, format!("http://127.0.0.1:{}", port), Some("k".into()));
        let outcome = gateway.invoke(&request(Vec::new())).await;
        assert!(matches!(outcome, GenerativeOutcome::Failure(Error::Http(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let gateway = GeminiGateway::new(Client::new(), "http://host/v1beta/", None);
        assert_eq!(
            gateway.endpoint("m"),
            "http://host/v1beta/models/m:generateContent"
        );
    }
}
