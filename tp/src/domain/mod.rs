//! Domain types for tripplanner
//!
//! The trip form state ([`TripRequest`]), the edits that drive it
//! ([`TripAction`]), and the plan that comes back ([`PlanResult`]).

mod action;
mod dates;
mod options;
mod plan;
mod trip;

pub use action::{CountField, TextField, TripAction};
pub use dates::is_specific_date_range;
pub use options::{AccommodationKind, FoodPreference, HotelRating, RentalStyle, Transport};
pub use plan::{PlanResult, Source};
pub use trip::{DEFAULT_TRIP_LENGTH, TripRequest};
