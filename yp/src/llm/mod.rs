//! LLM client module
//!
//! Provides the completion trait, the OpenAI implementation and client
//! construction from configuration.

use std::sync::Arc;

use tracing::debug;

pub mod client;
mod error;
mod openai;
mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use openai::OpenAIClient;
pub use types::{CompletionRequest, CompletionResponse, Message, Role, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client for the configured provider and a session credential
///
/// Any failure here is an [`LlmError::Init`]; callers must not attempt generation.
pub fn create_client(config: &LlmConfig, api_key: &str) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "openai" => {
            debug!("create_client: creating OpenAI client");
            Ok(Arc::new(OpenAIClient::new(config, api_key)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::Init(format!("Unknown LLM provider: '{}'. Supported: openai", other)))
        }
    }
}
