use serde::{Deserialize, Serialize};

use crate::error::{CompletionError, CompletionResult};
use crate::GeminiConfig;

#[derive(Debug, Clone, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key: config.api_key,
            model: config.model,
            base_url: config.base_url,
        }
    }

    /// Generate a completion for a single prompt.
    ///
    /// HTTP 429 maps to `CompletionError::RateLimited` so the caller can
    /// tell a quota condition apart from other failures.
    pub async fn complete(&self, prompt: &str) -> CompletionResult<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        tracing::debug!("Sending completion request ({} prompt bytes)", prompt.len());

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.as_u16() == 429 {
            return Err(CompletionError::RateLimited);
        }
        if !status.is_success() {
            return Err(CompletionError::ServiceUnavailable(format!(
                "Status: {}",
                status
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = extract_text(body);
        if text.is_empty() {
            return Err(CompletionError::InvalidResponse(
                "no candidate text in response".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Concatenate the part texts of the first candidate.
fn extract_text(body: GenerateContentResponse) -> String {
    body.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| {
            c.parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hello".to_string(),
                }],
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
    }

    #[test]
    fn extracts_first_candidate_text() {
        let body: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "part one"}, {"text": " part two"}], "role": "model"}},
                    {"content": {"parts": [{"text": "ignored"}], "role": "model"}}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(extract_text(body), "part one part two");
    }

    #[test]
    fn empty_candidates_yield_empty_text() {
        let body: GenerateContentResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert_eq!(extract_text(body), "");
    }
}
