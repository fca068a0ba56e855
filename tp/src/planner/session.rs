//! Session - form state across submissions

use tracing::debug;

use super::{PlanError, Planner};
use crate::domain::{PlanResult, TripAction, TripRequest};

/// The trip being edited plus the outcome of the last submission
///
/// Plan and error are cleared when a submission starts and are not restored
/// if it fails.
#[derive(Debug, Default)]
pub struct Session {
    trip: TripRequest,
    loading: bool,
    plan: Option<PlanResult>,
    error: Option<String>,
}

impl Session {
    pub fn new(trip: TripRequest) -> Self {
        Self {
            trip,
            ..Default::default()
        }
    }

    pub fn trip(&self) -> &TripRequest {
        &self.trip
    }

    pub fn plan(&self) -> Option<&PlanResult> {
        self.plan.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply a form edit
    pub fn dispatch(&mut self, action: TripAction) {
        self.trip = self.trip.apply(action);
    }

    /// Submit is offered only when idle and the trip is complete enough
    pub fn can_submit(&self) -> bool {
        !self.loading && self.trip.can_submit()
    }

    /// Submit the current trip
    pub async fn submit(&mut self, planner: &Planner) -> Result<&PlanResult, PlanError> {
        debug!("Session::submit: called");
        self.error = None;
        self.plan = None;
        self.loading = true;

        let result = planner.submit(&self.trip).await;
        self.loading = false;

        match result {
            Ok(plan) => Ok(self.plan.insert(plan)),
            Err(err) => {
                debug!(error = %err, "Session::submit: failed");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }
}
