//! Plan prompt composition
//!
//! Derives the requested pose count from the profile text and renders the
//! fixed instruction set for the generation agent.

mod embedded;

use handlebars::Handlebars;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

pub use embedded::{AGENT_NAME, AGENT_ROLE};

/// Pose count used when the profile names no known duration
pub const DEFAULT_POSE_COUNT: u32 = 8;

/// Duration label to pose count, checked in order
pub const DURATION_POSE_COUNTS: [(&str, u32); 4] = [
    ("10–15 minutes", 8),
    ("20–30 minutes", 12),
    ("30–45 minutes", 16),
    ("1 hour or more", 20),
];

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Failed to render instruction {index}: {source}")]
    Render {
        index: usize,
        #[source]
        source: handlebars::RenderError,
    },
}

/// Pick the pose count for the first duration label found in `profile_text`
///
/// Matching is plain substring containment over the whole profile text.
pub fn pose_count_for(profile_text: &str) -> u32 {
    let count = DURATION_POSE_COUNTS
        .iter()
        .find(|(label, _)| profile_text.contains(label))
        .map(|(_, count)| *count)
        .unwrap_or(DEFAULT_POSE_COUNT);
    debug!(count, "pose_count_for: resolved");
    count
}

#[derive(Debug, Serialize)]
struct InstructionContext {
    pose_count: u32,
}

/// Rendered instructions for one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPrompt {
    pub pose_count: u32,
    pub instructions: Vec<String>,
}

impl PlanPrompt {
    /// Full system prompt: agent identity followed by the ordered instructions
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are {AGENT_NAME}.\nRole: {AGENT_ROLE}\n\nInstructions:\n");
        for instruction in &self.instructions {
            prompt.push_str("- ");
            prompt.push_str(instruction);
            prompt.push('\n');
        }
        prompt
    }
}

/// Renders the embedded instruction templates
pub struct PromptComposer {
    hbs: Handlebars<'static>,
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptComposer {
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        Self { hbs }
    }

    /// Compose the instruction set for a serialized profile
    pub fn compose(&self, profile_text: &str) -> Result<PlanPrompt, PromptError> {
        debug!(profile_len = profile_text.len(), "compose: called");
        let pose_count = pose_count_for(profile_text);
        let context = InstructionContext { pose_count };

        let instructions = embedded::INSTRUCTIONS
            .iter()
            .enumerate()
            .map(|(index, template)| {
                self.hbs
                    .render_template(template, &context)
                    .map_err(|source| PromptError::Render { index, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlanPrompt {
            pose_count,
            instructions,
        })
    }
}
