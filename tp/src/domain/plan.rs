//! PlanResult - what came back from the model

use serde::{Deserialize, Serialize};

/// A web source the model grounded its answer on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Text to show for the link; falls back to the URI when the title is blank
    pub fn display_text(&self) -> &str {
        if self.title.trim().is_empty() { &self.uri } else { &self.title }
    }
}

/// Generated plan text plus its citations
///
/// Replaced wholesale on every successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Markdown-flavoured plan
    pub plan_text: String,

    /// Citations in the order the service returned them
    pub sources: Vec<Source>,
}

impl PlanResult {
    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }
}
