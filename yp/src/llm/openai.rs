//! OpenAI API client implementation
//!
//! Implements the LlmClient trait for OpenAI's Chat Completions API. One
//! request per call; failures are returned to the caller without retrying.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Fallback wait reported for a 429 without a usable `retry-after` header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// OpenAI API client
pub struct OpenAIClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
}

impl OpenAIClient {
    /// Create a new client for the configured model and a session credential
    pub fn new(config: &LlmConfig, api_key: &str) -> Result<Self, LlmError> {
        debug!(model = %config.model, base_url = %config.base_url, "OpenAIClient::new: called");
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(LlmError::Init("API key is empty".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(LlmError::Init("model identifier is empty".to_string()));
        }

        let http = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| LlmError::Init(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            model: config.model.clone(),
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for the OpenAI API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");

        let mut messages = vec![serde_json::json!({
            "role": "system",
            "content": request.system_prompt,
        })];

        messages.extend(request.messages.iter().map(|msg| {
            serde_json::json!({
                "role": msg.role.as_str(),
                "content": msg.content,
            })
        }));

        let max_tokens = request.max_tokens.min(self.max_tokens);

        // GPT-5.x and o1/o3 models use max_completion_tokens instead of max_tokens
        let uses_completion_tokens =
            self.model.starts_with("gpt-5") || self.model.starts_with("o1") || self.model.starts_with("o3");

        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
        });

        if uses_completion_tokens {
            body["max_completion_tokens"] = serde_json::json!(max_tokens);
        } else {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        body
    }

    /// Parse the OpenAI API response
    fn parse_response(&self, api_response: OpenAIResponse) -> CompletionResponse {
        debug!(choices = api_response.choices.len(), "parse_response: called");
        let (content, stop_reason) = match api_response.choices.into_iter().next() {
            Some(c) => {
                let stop_reason = c
                    .finish_reason
                    .as_deref()
                    .map(StopReason::from_openai)
                    .unwrap_or(StopReason::EndTurn);
                (c.message.content, stop_reason)
            }
            None => {
                debug!("parse_response: no choices");
                (None, StopReason::EndTurn)
            }
        };

        let usage = api_response
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        CompletionResponse {
            content,
            stop_reason,
            usage,
        }
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "complete: called");
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();

        if status == 429 {
            debug!("complete: rate limited (429)");
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

            return Err(LlmError::RateLimited {
                retry_after: Duration::from_secs(retry_after),
            });
        }

        if !response.status().is_success() {
            debug!(%status, "complete: API error");
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, message: text });
        }

        let text = response.text().await?;
        let api_response: OpenAIResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("unexpected response body: {e}")))?;

        debug!("complete: success");
        Ok(self.parse_response(api_response))
    }
}

// OpenAI API response types

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;

    fn test_client(model: &str, max_tokens: u32) -> OpenAIClient {
        let config = LlmConfig {
            model: model.to_string(),
            max_tokens,
            ..LlmConfig::default()
        };
        OpenAIClient::new(&config, "test-key").unwrap()
    }

    #[test]
    fn test_new_rejects_empty_key() {
        let err = OpenAIClient::new(&LlmConfig::default(), "  ").err().unwrap();
        assert!(err.is_init());
    }

    #[test]
    fn test_new_rejects_empty_model() {
        let config = LlmConfig {
            model: String::new(),
            ..LlmConfig::default()
        };
        let err = OpenAIClient::new(&config, "sk-test").err().unwrap();
        assert!(err.is_init());
    }

    #[test]
    fn test_new_trims_base_url() {
        let config = LlmConfig {
            base_url: "https://proxy.example.com/".to_string(),
            ..LlmConfig::default()
        };
        let client = OpenAIClient::new(&config, "sk-test").unwrap();
        assert_eq!(client.base_url, "https://proxy.example.com");
        assert_eq!(client.model(), "gpt-4o");
    }

    #[test]
    fn test_build_request_body_basic() {
        let client = test_client("gpt-4o", 8192);

        let request = CompletionRequest {
            system_prompt: "You are Yoga Planner.".to_string(),
            messages: vec![Message::user("- Age: 25")],
            max_tokens: 1000,
        };

        let body = client.build_request_body(&request);

        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "You are Yoga Planner.");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "- Age: 25");
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_max_tokens_capped() {
        let client = test_client("gpt-4o", 1000);

        let request = CompletionRequest {
            system_prompt: "Test".to_string(),
            messages: vec![],
            max_tokens: 5000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["max_tokens"], 1000);
    }

    #[test]
    fn test_reasoning_models_use_completion_tokens() {
        let client = test_client("o3-mini", 4096);

        let request = CompletionRequest {
            system_prompt: "Test".to_string(),
            messages: vec![],
            max_tokens: 2000,
        };

        let body = client.build_request_body(&request);
        assert_eq!(body["max_completion_tokens"], 2000);
        assert!(body.get("max_tokens").is_none());
    }

    #[test]
    fn test_parse_response() {
        let client = test_client("gpt-4o", 4096);
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}, "finish_reason": "length"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 20, "total_tokens": 30}
        }"#;

        let api_response: OpenAIResponse = serde_json::from_str(json).unwrap();
        let response = client.parse_response(api_response);

        assert_eq!(response.content.as_deref(), Some("{\"a\": 1}"));
        assert_eq!(response.stop_reason, StopReason::MaxTokens);
        assert_eq!(response.usage.total(), 30);
    }

    #[test]
    fn test_parse_response_without_choices() {
        let client = test_client("gpt-4o", 4096);
        let api_response: OpenAIResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();

        let response = client.parse_response(api_response);
        assert!(response.content.is_none());
        assert_eq!(response.usage, TokenUsage::default());
    }
}
