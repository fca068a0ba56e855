//! Planner error types

use thiserror::Error;

use crate::llm::RequestError;

/// Input problems caught before any request is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a destination location to generate a plan.")]
    MissingDestination,

    #[error(
        "Since you provided a general time frame (or no time frame), please specify the Approximate Trip Length (Days). This is required to create an itinerary."
    )]
    TripLengthRequired,
}

/// Everything that can stop a submission from producing a plan
#[derive(Debug, Error)]
pub enum PlanError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Request failed: {0}")]
    Request(#[from] RequestError),

    /// The service answered but there was nothing to show
    #[error("Response contained no plan text")]
    EmptyPlan { raw: String },

    #[error("Failed to compose prompt: {0}")]
    Prompt(String),
}

impl PlanError {
    /// Message to show the traveller
    pub fn user_message(&self) -> String {
        match self {
            PlanError::Validation(e) => e.to_string(),
            PlanError::Request(_) => {
                "An error occurred while connecting to the planning service. Please try again.".to_string()
            }
            PlanError::EmptyPlan { .. } => {
                "Could not generate a plan. The model may have blocked the request or the response was empty."
                    .to_string()
            }
            PlanError::Prompt(msg) => format!("Could not build the planning prompt: {}", msg),
        }
    }

    /// True for errors caught before the network was touched
    pub fn is_validation(&self) -> bool {
        matches!(self, PlanError::Validation(_))
    }
}
