//! Per-session state
//!
//! Owns the credential and the last generated plan for one user session.
//! Nothing here outlives the process.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::LlmConfig;
use crate::llm::{LlmClient, LlmError, create_client};
use crate::plan::{GenerateError, Generation, PlanGenerator, YogaPlan};
use crate::profile::UserProfile;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please provide your OpenAI API key.")]
    MissingApiKey,

    #[error(transparent)]
    ModelInit(LlmError),
}

/// Credential and last plan for one user
#[derive(Default)]
pub struct Session {
    api_key: Option<String>,
    last_plan: Option<YogaPlan>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the credential; blank input leaves the current one in place
    ///
    /// Returns true when the key was updated.
    pub fn set_api_key(&mut self, api_key: impl Into<String>) -> bool {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            debug!("set_api_key: blank key ignored");
            return false;
        }
        self.api_key = Some(api_key);
        info!("API key updated");
        true
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Most recent plan, including a fallback plan
    pub fn last_plan(&self) -> Option<&YogaPlan> {
        self.last_plan.as_ref()
    }

    /// Build a model client from the session credential
    pub fn client(&self, config: &LlmConfig) -> Result<Arc<dyn LlmClient>, SessionError> {
        debug!(has_key = self.has_api_key(), "Session::client: called");
        let api_key = self.api_key.as_deref().ok_or(SessionError::MissingApiKey)?;
        create_client(config, api_key).map_err(SessionError::ModelInit)
    }

    /// Generate a plan for `profile` and keep it as the session plan
    ///
    /// The stored plan is replaced whenever the model call succeeds, including
    /// when extraction fell back to the placeholder plan.
    pub async fn generate(
        &mut self,
        client: &dyn LlmClient,
        generator: &PlanGenerator,
        profile: &UserProfile,
    ) -> Result<Generation, GenerateError> {
        debug!("Session::generate: called");
        let generation = generator.generate(client, &profile.to_prompt_text()).await?;
        self.last_plan = Some(generation.plan.clone());
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::mock::MockLlmClient;
    use std::time::Duration;

    const PLAN_JSON: &str = r#"{"sequence_overview":"a","poses_and_durations":"b","modifications_and_alternatives":"c","recommendations":"d","wellness_tips":"e"}"#;

    fn profile() -> UserProfile {
        UserProfile::builder().build().unwrap()
    }

    #[test]
    fn test_client_requires_api_key() {
        let session = Session::new();
        let err = session.client(&LlmConfig::default()).err().unwrap();
        assert!(matches!(err, SessionError::MissingApiKey));
    }

    #[test]
    fn test_blank_api_key_ignored() {
        let mut session = Session::new();
        assert!(!session.set_api_key("   "));
        assert!(!session.has_api_key());
        assert!(session.set_api_key("sk-test"));
        assert!(!session.set_api_key(""));
        assert!(session.has_api_key());
    }

    #[test]
    fn test_client_init_error() {
        let mut session = Session::new();
        session.set_api_key("sk-test");
        let config = LlmConfig {
            provider: "nope".to_string(),
            ..LlmConfig::default()
        };

        let err = session.client(&config).err().unwrap();
        assert!(matches!(err, SessionError::ModelInit(ref e) if e.is_init()));
        assert!(session.last_plan().is_none());
    }

    #[tokio::test]
    async fn test_generate_stores_plan() {
        let mut session = Session::new();
        let client = MockLlmClient::replying(PLAN_JSON);

        let generation = session.generate(&client, &PlanGenerator::default(), &profile()).await.unwrap();

        assert_eq!(session.last_plan(), Some(&generation.plan));
        assert_eq!(session.last_plan().unwrap().recommendations, "d");
    }

    #[tokio::test]
    async fn test_fallback_plan_overwrites_previous() {
        let mut session = Session::new();
        let generator = PlanGenerator::default();
        let client = MockLlmClient::new(vec![
            Ok(crate::llm::CompletionResponse::text(PLAN_JSON)),
            Ok(crate::llm::CompletionResponse::text("oops")),
        ]);

        session.generate(&client, &generator, &profile()).await.unwrap();
        let generation = session.generate(&client, &generator, &profile()).await.unwrap();

        assert!(generation.is_fallback());
        assert_eq!(session.last_plan(), Some(&YogaPlan::fallback()));
    }

    #[tokio::test]
    async fn test_transport_error_keeps_previous_plan() {
        let mut session = Session::new();
        let generator = PlanGenerator::default();
        let client = MockLlmClient::new(vec![
            Ok(crate::llm::CompletionResponse::text(PLAN_JSON)),
            Err(LlmError::RateLimited {
                retry_after: Duration::from_secs(1),
            }),
        ]);

        session.generate(&client, &generator, &profile()).await.unwrap();
        let result = session.generate(&client, &generator, &profile()).await;

        assert!(matches!(result, Err(GenerateError::Transport(_))));
        assert_eq!(session.last_plan().unwrap().sequence_overview, "a");
    }
}
