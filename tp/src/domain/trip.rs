//! TripRequest - everything the traveller told us about the trip

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::dates::is_specific_date_range;
use super::options::{AccommodationKind, FoodPreference, HotelRating, RentalStyle, Transport};

/// Trip length used when none was given
pub const DEFAULT_TRIP_LENGTH: u32 = 5;

/// Complete set of trip parameters at submission time
///
/// Values are immutable; edits go through [`TripRequest::apply`] which
/// returns a new request. Field names in YAML trip files are kebab-case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TripRequest {
    pub destination: String,
    pub starting_location: String,

    /// Free-text dates or period ("June 15-22, 2025", "September")
    pub dates: String,

    /// Trip length in days; `None` when the input was cleared
    pub trip_length: Option<u32>,

    pub max_budget: String,
    pub preferred_locations: String,

    pub transportation: Vec<Transport>,
    pub food: Vec<FoodPreference>,

    pub accommodation: AccommodationKind,
    pub hotel_rating: HotelRating,
    pub rental_style: RentalStyle,

    pub adults: u32,
    pub kids: u32,
    pub infants: u32,
    pub dogs: u32,

    pub citizenship: String,
    pub residence_status: String,
}

impl Default for TripRequest {
    fn default() -> Self {
        Self {
            destination: String::new(),
            starting_location: String::new(),
            dates: String::new(),
            trip_length: Some(DEFAULT_TRIP_LENGTH),
            max_budget: String::new(),
            preferred_locations: String::new(),
            transportation: Vec::new(),
            food: Vec::new(),
            accommodation: AccommodationKind::default(),
            hotel_rating: HotelRating::default(),
            rental_style: RentalStyle::default(),
            adults: 2,
            kids: 0,
            infants: 0,
            dogs: 0,
            citizenship: String::new(),
            residence_status: String::new(),
        }
    }
}

impl TripRequest {
    /// Create a request for a destination with all other fields defaulted
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            ..Default::default()
        }
    }

    /// True when a destination has been entered
    pub fn has_destination(&self) -> bool {
        !self.destination.trim().is_empty()
    }

    /// True when the dates read as an explicit range
    pub fn has_specific_dates(&self) -> bool {
        is_specific_date_range(&self.dates)
    }

    /// Trip length is only asked for when the dates are vague or missing
    pub fn trip_length_required(&self) -> bool {
        !self.has_specific_dates()
    }

    /// Trip length is usable when it is at least one day
    pub fn trip_length_valid(&self) -> bool {
        matches!(self.trip_length, Some(days) if days >= 1)
    }

    /// Whether the request can be submitted as-is
    pub fn can_submit(&self) -> bool {
        let ok = self.has_destination() && (!self.trip_length_required() || self.trip_length_valid());
        debug!(%ok, "TripRequest::can_submit: evaluated");
        ok
    }

    /// Total number of travellers, pets included
    pub fn party_size(&self) -> u32 {
        self.adults + self.kids + self.infants + self.dogs
    }

    /// Human-readable group composition, e.g. "2 adults, 1 infant"
    ///
    /// Adults are always listed; other counts only when non-zero.
    pub fn group_description(&self) -> String {
        let mut parts = vec![format!("{} adult{}", self.adults, plural(self.adults))];

        if self.kids > 0 {
            parts.push(format!("{} child/children", self.kids));
        }
        if self.infants > 0 {
            parts.push(format!("{} infant{}", self.infants, plural(self.infants)));
        }
        if self.dogs > 0 {
            parts.push(format!("{} dog{}", self.dogs, plural(self.dogs)));
        }

        parts.join(", ")
    }
}

fn plural(count: u32) -> &'static str {
    if count == 1 { "" } else { "s" }
}
