//! Plan extraction from raw model output
//!
//! Models often wrap the JSON object in a markdown code fence. Fence lines are
//! dropped, the rest is parsed, and each of the five keys is decoded on its own.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::{PlanSection, YogaPlan};

const FENCE: &str = "```";

/// Raised when the response is not a JSON object after fence stripping
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to parse JSON response: {0}")]
    Syntax(#[from] serde_json::Error),

    #[error("Failed to parse JSON response: expected an object, found {0}")]
    NotAnObject(&'static str),
}

/// Remove every line whose trimmed content starts with a code fence
pub fn strip_code_fences(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().starts_with(FENCE))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse raw model output into a plan
///
/// Only a syntax error or a non-object top level fails. Missing or non-string
/// keys decode to the empty string.
pub fn extract_plan(text: &str) -> Result<YogaPlan, ExtractionError> {
    debug!(len = text.len(), "extract_plan: called");
    let json = strip_code_fences(text);

    match serde_json::from_str::<Value>(&json)? {
        Value::Object(map) => Ok(decode_fields(&map)),
        other => {
            debug!("extract_plan: top-level value is not an object");
            Err(ExtractionError::NotAnObject(json_kind(&other)))
        }
    }
}

/// Like [`extract_plan`] but substitutes [`YogaPlan::fallback`] on failure
pub fn extract_plan_or_fallback(text: &str) -> (YogaPlan, Option<ExtractionError>) {
    match extract_plan(text) {
        Ok(plan) => (plan, None),
        Err(e) => {
            warn!(error = %e, "extract_plan_or_fallback: using fallback plan");
            (YogaPlan::fallback(), Some(e))
        }
    }
}

fn decode_fields(map: &Map<String, Value>) -> YogaPlan {
    let field = |section: PlanSection| -> String {
        match map.get(section.key()) {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                debug!(key = section.key(), "decode_fields: not a string");
                String::new()
            }
            None => {
                debug!(key = section.key(), "decode_fields: missing");
                String::new()
            }
        }
    };

    YogaPlan {
        sequence_overview: field(PlanSection::Overview),
        poses_and_durations: field(PlanSection::Poses),
        modifications_and_alternatives: field(PlanSection::Modifications),
        recommendations: field(PlanSection::Recommendations),
        wellness_tips: field(PlanSection::WellnessTips),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
