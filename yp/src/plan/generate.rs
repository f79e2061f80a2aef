//! Profile to plan pipeline
//!
//! Composes the instructions, makes one completion call and extracts the plan.
//! Transport failures propagate untouched; extraction failures never do.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::YogaPlan;
use super::extract::{ExtractionError, extract_plan_or_fallback};
use crate::llm::{CompletionRequest, LlmClient, LlmError, Message, StopReason, TokenUsage};
use crate::prompts::{PromptComposer, PromptError};

/// Default response budget for one plan
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Transport(#[from] LlmError),
}

/// Outcome of one generation request
#[derive(Debug)]
pub struct Generation {
    /// Extracted plan, or the fallback plan when extraction failed
    pub plan: YogaPlan,

    /// Pose count requested from the model
    pub pose_count: u32,

    /// Set when the fallback plan was substituted
    pub extraction_error: Option<ExtractionError>,

    /// Token usage reported by the provider
    pub usage: TokenUsage,

    /// Why the model stopped
    pub stop_reason: StopReason,
}

impl Generation {
    pub fn is_fallback(&self) -> bool {
        self.extraction_error.is_some()
    }

    /// The reply hit the response token budget and may be incomplete
    pub fn is_truncated(&self) -> bool {
        self.stop_reason == StopReason::MaxTokens
    }
}

/// Drives one profile through prompt composition, the model and extraction
pub struct PlanGenerator {
    composer: PromptComposer,
    max_tokens: u32,
}

impl Default for PlanGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_TOKENS)
    }
}

impl PlanGenerator {
    pub fn new(max_tokens: u32) -> Self {
        Self {
            composer: PromptComposer::new(),
            max_tokens,
        }
    }

    /// Build the completion request for a serialized profile
    pub fn request_for(&self, profile_text: &str) -> Result<(CompletionRequest, u32), PromptError> {
        let prompt = self.composer.compose(profile_text)?;
        let request = CompletionRequest {
            system_prompt: prompt.system_prompt(),
            messages: vec![Message::user(profile_text)],
            max_tokens: self.max_tokens,
        };
        Ok((request, prompt.pose_count))
    }

    /// Generate a plan for the serialized profile text
    pub async fn generate(&self, client: &dyn LlmClient, profile_text: &str) -> Result<Generation, GenerateError> {
        debug!(profile_len = profile_text.len(), "generate: called");
        let (request, pose_count) = self.request_for(profile_text)?;

        let response = client.complete(request).await?;
        let raw = response.content.unwrap_or_default();
        info!(
            pose_count,
            response_len = raw.len(),
            output_tokens = response.usage.output_tokens,
            "generate: model responded"
        );

        if response.stop_reason == StopReason::MaxTokens {
            warn!(
                max_tokens = self.max_tokens,
                output_tokens = response.usage.output_tokens,
                "generate: reply cut off at the token limit"
            );
        }

        let (plan, extraction_error) = extract_plan_or_fallback(&raw);

        Ok(Generation {
            plan,
            pose_count,
            extraction_error,
            usage: response.usage,
            stop_reason: response.stop_reason,
        })
    }
}
