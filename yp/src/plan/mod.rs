//! Structured yoga plan
//!
//! - [`extract`] - turn raw model output into a [`YogaPlan`]
//! - [`generate`] - profile to plan pipeline over an [`LlmClient`](crate::llm::LlmClient)

pub mod extract;
pub mod generate;

use serde::{Deserialize, Serialize};

pub use extract::{ExtractionError, extract_plan, extract_plan_or_fallback, strip_code_fences};
pub use generate::{GenerateError, Generation, PlanGenerator};

/// Fallback text for the first three sections
pub const NOT_AVAILABLE: &str = "Not available";

/// Fallback text for recommendations and wellness tips
pub const NOT_PROVIDED: &str = "Not provided";

/// A generated plan; every field is an opaque markdown string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YogaPlan {
    pub sequence_overview: String,
    pub poses_and_durations: String,
    pub modifications_and_alternatives: String,
    pub recommendations: String,
    pub wellness_tips: String,
}

impl YogaPlan {
    /// Placeholder plan substituted when the model output cannot be parsed
    pub fn fallback() -> Self {
        Self {
            sequence_overview: NOT_AVAILABLE.to_string(),
            poses_and_durations: NOT_AVAILABLE.to_string(),
            modifications_and_alternatives: NOT_AVAILABLE.to_string(),
            recommendations: NOT_PROVIDED.to_string(),
            wellness_tips: NOT_PROVIDED.to_string(),
        }
    }

    /// Body of one section
    pub fn section(&self, section: PlanSection) -> &str {
        match section {
            PlanSection::Overview => &self.sequence_overview,
            PlanSection::Poses => &self.poses_and_durations,
            PlanSection::Modifications => &self.modifications_and_alternatives,
            PlanSection::Recommendations => &self.recommendations,
            PlanSection::WellnessTips => &self.wellness_tips,
        }
    }
}

/// The five plan sections, in display and export order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSection {
    Overview,
    Poses,
    Modifications,
    Recommendations,
    WellnessTips,
}

impl PlanSection {
    pub const ALL: [PlanSection; 5] = [
        PlanSection::Overview,
        PlanSection::Poses,
        PlanSection::Modifications,
        PlanSection::Recommendations,
        PlanSection::WellnessTips,
    ];

    /// JSON key the model is asked to emit
    pub fn key(&self) -> &'static str {
        match self {
            PlanSection::Overview => "sequence_overview",
            PlanSection::Poses => "poses_and_durations",
            PlanSection::Modifications => "modifications_and_alternatives",
            PlanSection::Recommendations => "recommendations",
            PlanSection::WellnessTips => "wellness_tips",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            PlanSection::Overview => "🧩",
            PlanSection::Poses => "📋",
            PlanSection::Modifications => "🔄",
            PlanSection::Recommendations => "🗓️",
            PlanSection::WellnessTips => "🌿",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanSection::Overview => "Sequence Overview",
            PlanSection::Poses => "Pose Sequence",
            PlanSection::Modifications => "Modifications & Alternatives",
            PlanSection::Recommendations => "Practice Recommendations",
            PlanSection::WellnessTips => "Wellness Tips",
        }
    }

    /// Emoji and label, as used for headers in display and export
    pub fn header(&self) -> String {
        format!("{} {}", self.emoji(), self.label())
    }

    /// Shown on screen when the section body is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            PlanSection::Overview => "_No overview available._",
            PlanSection::Poses => "_No pose sequence available._",
            PlanSection::Modifications => "_No modifications available._",
            PlanSection::Recommendations => "_No recommendations provided._",
            PlanSection::WellnessTips => "_No tips available._",
        }
    }
}
