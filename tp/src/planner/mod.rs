//! Planner - the submit flow
//!
//! Validate the trip, compose prompts, send them, interpret the answer.
//! [`Session`] layers the form's loading/plan/error state on top.

use std::sync::Arc;

use tracing::{debug, error, info};

mod error;
mod session;

pub use error::{PlanError, ValidationError};
pub use session::Session;

use crate::domain::{PlanResult, TripRequest};
use crate::llm::{InterpretError, LlmClient, RequestError, interpret};
use crate::prompts::{DerivedPrompt, PromptComposer};

/// Turns trip requests into plans
pub struct Planner {
    composer: PromptComposer,
    client: Arc<dyn LlmClient>,
}

impl Planner {
    pub fn new(composer: PromptComposer, client: Arc<dyn LlmClient>) -> Self {
        Self { composer, client }
    }

    /// Check the trip can be submitted
    pub fn validate(trip: &TripRequest) -> Result<(), ValidationError> {
        if !trip.has_destination() {
            debug!("Planner::validate: missing destination");
            return Err(ValidationError::MissingDestination);
        }
        if trip.trip_length_required() && !trip.trip_length_valid() {
            debug!(trip_length = ?trip.trip_length, "Planner::validate: trip length required");
            return Err(ValidationError::TripLengthRequired);
        }
        Ok(())
    }

    /// Validate and compose, without sending anything
    pub fn prepare(&self, trip: &TripRequest) -> Result<DerivedPrompt, PlanError> {
        debug!("Planner::prepare: called");
        Self::validate(trip)?;

        self.composer
            .compose(trip)
            .map_err(|e| PlanError::Prompt(format!("{:#}", e)))?
            .ok_or(PlanError::Validation(ValidationError::MissingDestination))
    }

    /// Run the whole submit flow for `trip`
    pub async fn submit(&self, trip: &TripRequest) -> Result<PlanResult, PlanError> {
        let prompt = self.prepare(trip)?;
        info!(
            destination = %trip.destination.trim(),
            requested_days = %prompt.requested_days,
            party_size = %trip.party_size(),
            "Requesting plan"
        );

        let raw = self.client.generate(&prompt).await.map_err(|e| {
            error!(error = %e, status = ?e.status(), "Plan request failed");
            PlanError::Request(e)
        })?;

        match interpret(&raw) {
            Ok(plan) => {
                info!(source_count = plan.sources.len(), "Plan received");
                Ok(plan)
            }
            Err(InterpretError::EmptyPlan { raw }) => {
                error!(response = %raw, "API response structure unexpected");
                Err(PlanError::EmptyPlan { raw })
            }
            Err(InterpretError::Json(e)) => {
                error!(error = %e, "Plan response was not valid JSON");
                Err(PlanError::Request(RequestError::Json(e)))
            }
        }
    }
}
