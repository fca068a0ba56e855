//! Response interpretation
//!
//! Turns a raw `generateContent` body into a [`PlanResult`]: the first
//! candidate's first text part plus its web citations.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{PlanResult, Source};

/// Why a response body could not be turned into a plan
#[derive(Debug, Error)]
pub enum InterpretError {
    #[error("Malformed response JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed fine, but there was no text to show
    #[error("Response contained no plan text")]
    EmptyPlan { raw: String },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    /// Kept untyped; a malformed citation must not cost the plan text
    grounding_metadata: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Extract plan text and citations from a raw response body
pub fn interpret(raw: &str) -> Result<PlanResult, InterpretError> {
    debug!(raw_len = raw.len(), "interpret: called");
    let response: GenerateContentResponse = serde_json::from_str(raw)?;

    let candidate = response.candidates.and_then(|c| c.into_iter().next());
    let Some(candidate) = candidate else {
        warn!("interpret: response has no candidates");
        return Err(InterpretError::EmptyPlan { raw: raw.to_string() });
    };

    let text = candidate
        .content
        .and_then(|c| c.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .filter(|text| !text.is_empty());

    let Some(plan_text) = text else {
        warn!("interpret: first candidate has no text part");
        return Err(InterpretError::EmptyPlan { raw: raw.to_string() });
    };

    let sources = candidate
        .grounding_metadata
        .as_ref()
        .map(extract_sources)
        .unwrap_or_default();
    debug!(text_len = plan_text.len(), source_count = sources.len(), "interpret: extracted plan");

    Ok(PlanResult { plan_text, sources })
}

/// Keep only citations with both a URI and a title, in order
///
/// `groundingAttributions` wins; newer API revisions report `groundingChunks`
/// instead. Entries of the wrong shape are skipped.
fn extract_sources(metadata: &Value) -> Vec<Source> {
    let entries = ["groundingAttributions", "groundingChunks"]
        .iter()
        .find_map(|key| metadata.get(*key).and_then(Value::as_array))
        .map(Vec::as_slice)
        .unwrap_or_default();

    entries
        .iter()
        .filter_map(|entry| {
            let web = entry.get("web")?;
            let uri = web.get("uri")?.as_str()?;
            let title = web.get("title")?.as_str()?;
            (!uri.is_empty() && !title.is_empty()).then(|| Source::new(uri, title))
        })
        .collect()
}
