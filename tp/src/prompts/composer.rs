//! Prompt Composer
//!
//! Derives the system instruction and user query for a [`TripRequest`].
//! All decisions (day count, fallbacks, clauses) happen in
//! [`PromptContext::from_trip`]; the templates only lay the values out.

use eyre::Result;
use serde::Serialize;
use tracing::debug;

use super::PromptLoader;
use crate::domain::{AccommodationKind, DEFAULT_TRIP_LENGTH, TripRequest};

/// Days requested when the dates are explicit and the model infers duration
pub const SPECIFIC_DATES_PLACEHOLDER_DAYS: u32 = 5;

const NO_TRANSPORT_PREFERENCE: &str = "no strong preference, suggest best options";
const NO_FOOD_PREFERENCE: &str = "a mix of local and casual dining";
const UNDETERMINED_PERIOD: &str = "Undetermined period";

/// System/user prompt pair for one generation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedPrompt {
    pub system_prompt: String,
    pub user_query: String,
    pub requested_days: u32,
}

/// Values interpolated into the prompt templates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    pub requested_days: u32,
    pub destination: String,
    pub starting_location: String,
    pub travel_period: String,
    pub preferred_locations: Option<String>,
    pub group: String,
    pub transportation: String,
    pub food: String,
    pub accommodation: String,
    pub immigration: String,
}

impl PromptContext {
    /// Derive template values; `None` when there is no destination
    pub fn from_trip(trip: &TripRequest) -> Option<Self> {
        debug!(destination = %trip.destination, "PromptContext::from_trip: called");
        if !trip.has_destination() {
            debug!("PromptContext::from_trip: no destination");
            return None;
        }

        let (requested_days, travel_period) = travel_period(trip);

        let transportation = if trip.transportation.is_empty() {
            NO_TRANSPORT_PREFERENCE.to_string()
        } else {
            join_labels(trip.transportation.iter().map(|t| t.label()))
        };

        let food = if trip.food.is_empty() {
            NO_FOOD_PREFERENCE.to_string()
        } else {
            join_labels(trip.food.iter().map(|f| f.label()))
        };

        let accommodation = match trip.accommodation {
            AccommodationKind::Hotel => format!("{} rated hotel(s).", trip.hotel_rating),
            AccommodationKind::Airbnb => {
                format!("{} style accommodations (e.g., Airbnb/VRBO).", trip.rental_style)
            }
        };

        let immigration = format!(
            "Citizenship: {}. Residence Status: {}.",
            or_default(&trip.citizenship, "Unknown"),
            or_default(&trip.residence_status, "Not specified"),
        );

        let preferred = trip.preferred_locations.trim();

        Some(Self {
            requested_days,
            destination: trip.destination.trim().to_string(),
            starting_location: or_default(&trip.starting_location, "Not specified").to_string(),
            travel_period,
            preferred_locations: (!preferred.is_empty()).then(|| preferred.to_string()),
            group: trip.group_description(),
            transportation,
            food,
            accommodation,
            immigration,
        })
    }
}

/// Resolved day count and the travel-period clause (budget included)
fn travel_period(trip: &TripRequest) -> (u32, String) {
    let (days, mut clause) = if trip.has_specific_dates() {
        debug!("travel_period: specific dates, model infers length");
        (
            SPECIFIC_DATES_PLACEHOLDER_DAYS,
            format!("Travel Period: **{}**.", trip.dates),
        )
    } else {
        let days = trip
            .trip_length
            .filter(|d| *d >= 1)
            .unwrap_or(DEFAULT_TRIP_LENGTH);
        let period = or_default(&trip.dates, UNDETERMINED_PERIOD);
        debug!(%days, %period, "travel_period: vague dates");
        (days, format!("Travel constraint: **{}**-day duration in **{}**.", days, period))
    };

    let budget = trip.max_budget.trim();
    if !budget.is_empty() {
        clause.push_str(&format!(" Maximum Total Budget: **{}**.", budget));
    }

    (days, clause)
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() { fallback } else { trimmed }
}

/// Renders [`DerivedPrompt`]s through the prompt templates
pub struct PromptComposer {
    loader: PromptLoader,
}

impl PromptComposer {
    pub fn new(loader: PromptLoader) -> Self {
        Self { loader }
    }

    /// Composer using only the built-in templates
    pub fn embedded() -> Self {
        Self::new(PromptLoader::embedded_only())
    }

    /// Compose prompts for `trip`; `Ok(None)` when the destination is blank
    pub fn compose(&self, trip: &TripRequest) -> Result<Option<DerivedPrompt>> {
        debug!("PromptComposer::compose: called");
        let Some(context) = PromptContext::from_trip(trip) else {
            return Ok(None);
        };

        let system_prompt = self.loader.render("system", &context)?.trim().to_string();
        let user_query = self.loader.render("query", &context)?.trim().to_string();
        debug!(
            requested_days = %context.requested_days,
            system_len = system_prompt.len(),
            query_len = user_query.len(),
            "PromptComposer::compose: rendered"
        );

        Ok(Some(DerivedPrompt {
            system_prompt,
            user_query,
            requested_days: context.requested_days,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FoodPreference, HotelRating, RentalStyle, Transport};
    use proptest::prelude::*;

    fn paris() -> TripRequest {
        TripRequest {
            destination: "Paris".to_string(),
            dates: "September".to_string(),
            trip_length: Some(4),
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_destination_yields_none() {
        let composer = PromptComposer::embedded();
        assert!(composer.compose(&TripRequest::default()).unwrap().is_none());
        assert!(composer.compose(&TripRequest::new(" \t ")).unwrap().is_none());
    }

    #[test]
    fn test_vague_dates_use_trip_length() {
        let prompt = PromptComposer::embedded().compose(&paris()).unwrap().unwrap();

        assert_eq!(prompt.requested_days, 4);
        assert!(prompt.user_query.contains("4-day"));
        assert!(prompt.user_query.contains("**4**-day duration in **September**"));
        assert!(!prompt.user_query.contains("Undetermined period"));
        assert!(prompt.system_prompt.contains("**4-day** plan"));
    }

    #[test]
    fn test_specific_dates_use_placeholder() {
        let trip = TripRequest {
            dates: "June 15-22, 2025".to_string(),
            trip_length: Some(12),
            ..paris()
        };
        let context = PromptContext::from_trip(&trip).unwrap();

        assert_eq!(context.requested_days, 5);
        assert_eq!(context.travel_period, "Travel Period: **June 15-22, 2025**.");
    }

    #[test]
    fn test_empty_dates_are_undetermined() {
        let trip = TripRequest {
            dates: String::new(),
            trip_length: Some(3),
            ..paris()
        };
        let context = PromptContext::from_trip(&trip).unwrap();

        assert_eq!(context.travel_period, "Travel constraint: **3**-day duration in **Undetermined period**.");
    }

    #[test]
    fn test_budget_clause() {
        let trip = TripRequest {
            max_budget: "$4,000".to_string(),
            ..paris()
        };
        let context = PromptContext::from_trip(&trip).unwrap();
        assert!(context.travel_period.ends_with(" Maximum Total Budget: **$4,000**."));

        let context = PromptContext::from_trip(&paris()).unwrap();
        assert!(!context.travel_period.contains("Budget"));
    }

    #[test]
    fn test_fallback_phrases() {
        let context = PromptContext::from_trip(&paris()).unwrap();

        assert_eq!(context.transportation, "no strong preference, suggest best options");
        assert_eq!(context.food, "a mix of local and casual dining");
        assert_eq!(context.starting_location, "Not specified");
        assert_eq!(context.immigration, "Citizenship: Unknown. Residence Status: Not specified.");
        assert!(context.preferred_locations.is_none());
    }

    #[test]
    fn test_selected_options_joined_in_order() {
        let trip = TripRequest {
            transportation: vec![Transport::Train, Transport::Air],
            food: vec![FoodPreference::FineDining, FoodPreference::FastFood],
            ..paris()
        };
        let context = PromptContext::from_trip(&trip).unwrap();

        assert_eq!(context.transportation, "Train, Air (Plane)");
        assert_eq!(context.food, "Fine Dining / High-End, Fast Food / Quick Bites");
    }

    #[test]
    fn test_accommodation_detail() {
        let hotel = TripRequest {
            hotel_rating: HotelRating::FiveStar,
            ..paris()
        };
        assert_eq!(PromptContext::from_trip(&hotel).unwrap().accommodation, "5-Star rated hotel(s).");

        let rental = TripRequest {
            accommodation: AccommodationKind::Airbnb,
            rental_style: RentalStyle::PrivateRoom,
            ..paris()
        };
        assert_eq!(
            PromptContext::from_trip(&rental).unwrap().accommodation,
            "Private Room style accommodations (e.g., Airbnb/VRBO)."
        );
    }

    #[test]
    fn test_user_query_field_order() {
        let trip = TripRequest {
            starting_location: "Berlin".to_string(),
            preferred_locations: "Montmartre, Le Marais".to_string(),
            citizenship: "German".to_string(),
            residence_status: "Permanent resident".to_string(),
            infants: 1,
            ..paris()
        };
        let prompt = PromptComposer::embedded().compose(&trip).unwrap().unwrap();
        let query = &prompt.user_query;

        let order = [
            "Please create a detailed 4-day vacation plan.",
            "Destination: **Paris**.",
            "Starting Location (for general travel/cost context): **Berlin**.",
            "Travel Period/Constraint:",
            "Preferred Locations to visit within the destination: **Montmartre, Le Marais**.",
            "Travel Group: **2 adults, 1 infant**.",
            "Preferred Transportation:",
            "Food Preferences:",
            "Accommodation Requirement: **4-Star rated hotel(s).**.",
            "Immigration Context: **Citizenship: German. Residence Status: Permanent resident.**",
            "Generate the plan using the four required sections.",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| query.find(needle).unwrap_or_else(|| panic!("missing: {}", needle)))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "fields out of order");
    }

    #[test]
    fn test_missing_trip_length_falls_back_to_default() {
        let trip = TripRequest {
            trip_length: None,
            ..paris()
        };
        assert_eq!(PromptContext::from_trip(&trip).unwrap().requested_days, 5);
    }

    proptest! {
        #[test]
        fn prop_none_iff_destination_blank(
            destination in "[ \ta-zA-Z]{0,12}",
            dates in "[a-zA-Z0-9 ,/-]{0,20}",
            days in proptest::option::of(0u32..30),
        ) {
            let trip = TripRequest {
                destination: destination.clone(),
                dates,
                trip_length: days,
                ..Default::default()
            };
            let composed = PromptComposer::embedded().compose(&trip).unwrap();
            prop_assert_eq!(composed.is_none(), destination.trim().is_empty());
        }

        #[test]
        fn prop_requested_days_positive(days in proptest::option::of(0u32..60), dates in "[a-zA-Z0-9 ,-]{0,20}") {
            let trip = TripRequest {
                destination: "Oslo".to_string(),
                dates,
                trip_length: days,
                ..Default::default()
            };
            let context = PromptContext::from_trip(&trip).unwrap();
            prop_assert!(context.requested_days >= 1);
        }
    }
}
