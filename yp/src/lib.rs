//! yogaplan - personalized yoga routines from an LLM
//!
//! Collects a user's physical profile and practice preferences, asks a
//! chat-completion model for a structured routine, and renders or exports it.
//!
//! # Pipeline
//!
//! profile text → instructions → one completion call → plan extraction → rendering
//!
//! # Modules
//!
//! - [`profile`] - typed form values and the profile text
//! - [`prompts`] - pose count lookup and agent instructions
//! - [`llm`] - completion trait and OpenAI client
//! - [`plan`] - plan model, extraction with fallback, generation pipeline
//! - [`render`] - pose breakdown, display and plain-text export
//! - [`session`] - credential and last plan for one session
//! - [`form`] - interactive terminal form
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod form;
pub mod llm;
pub mod plan;
pub mod profile;
pub mod prompts;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use config::{Config, ExportConfig, LlmConfig};
pub use llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError, OpenAIClient, create_client};
pub use plan::{ExtractionError, GenerateError, Generation, PlanGenerator, PlanSection, YogaPlan, extract_plan};
pub use profile::{Experience, Goal, Pace, ProfileBuilder, ProfileError, SessionDuration, Sex, TimeOfDay, UserProfile};
pub use prompts::{PlanPrompt, PromptComposer, pose_count_for};
pub use render::{PoseBlock, export_text, pose_blocks, render_markdown, render_terminal};
pub use session::{Session, SessionError};
