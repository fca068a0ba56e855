//! Trip form state transitions
//!
//! Every edit to the form is a [`TripAction`]; [`TripRequest::apply`] is a
//! pure reducer that returns the next request without touching the old one.

use tracing::debug;

use super::options::{AccommodationKind, FoodPreference, HotelRating, RentalStyle, Transport};
use super::trip::TripRequest;

/// Free-text fields of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Destination,
    StartingLocation,
    Dates,
    MaxBudget,
    PreferredLocations,
    Citizenship,
    ResidenceStatus,
}

/// Party-composition counters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountField {
    Adults,
    Kids,
    Infants,
    Dogs,
}

/// A single edit to the trip form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TripAction {
    SetText(TextField, String),
    /// Raw counter input; non-numeric or negative becomes 0
    SetCount(CountField, String),
    /// Raw trip-length input; empty/non-numeric clears it, below 1 becomes 1
    SetTripLength(String),
    ToggleTransport(Transport, bool),
    ToggleFood(FoodPreference, bool),
    SetAccommodation(AccommodationKind),
    SetHotelRating(HotelRating),
    SetRentalStyle(RentalStyle),
}

impl TripRequest {
    /// Apply an edit, producing the next request
    pub fn apply(&self, action: TripAction) -> TripRequest {
        debug!(?action, "TripRequest::apply: called");
        let mut next = self.clone();

        match action {
            TripAction::SetText(field, value) => {
                let slot = match field {
                    TextField::Destination => &mut next.destination,
                    TextField::StartingLocation => &mut next.starting_location,
                    TextField::Dates => &mut next.dates,
                    TextField::MaxBudget => &mut next.max_budget,
                    TextField::PreferredLocations => &mut next.preferred_locations,
                    TextField::Citizenship => &mut next.citizenship,
                    TextField::ResidenceStatus => &mut next.residence_status,
                };
                *slot = value;
            }
            TripAction::SetCount(field, raw) => {
                let value = parse_count(&raw);
                match field {
                    CountField::Adults => next.adults = value,
                    CountField::Kids => next.kids = value,
                    CountField::Infants => next.infants = value,
                    CountField::Dogs => next.dogs = value,
                }
            }
            TripAction::SetTripLength(raw) => {
                next.trip_length = parse_trip_length(&raw);
            }
            TripAction::ToggleTransport(option, checked) => {
                toggle(&mut next.transportation, option, checked);
            }
            TripAction::ToggleFood(option, checked) => {
                toggle(&mut next.food, option, checked);
            }
            TripAction::SetAccommodation(kind) => next.accommodation = kind,
            TripAction::SetHotelRating(rating) => next.hotel_rating = rating,
            TripAction::SetRentalStyle(style) => next.rental_style = style,
        }

        next
    }

    /// Apply a sequence of edits in order
    pub fn apply_all(&self, actions: impl IntoIterator<Item = TripAction>) -> TripRequest {
        actions.into_iter().fold(self.clone(), |trip, action| trip.apply(action))
    }
}

/// Parse counter input the way a numeric form field does: garbage and
/// negatives collapse to zero
fn parse_count(raw: &str) -> u32 {
    match raw.trim().parse::<i64>() {
        Ok(n) if n > 0 => u32::try_from(n).unwrap_or(u32::MAX),
        Ok(_) => 0,
        Err(_) => {
            debug!(%raw, "parse_count: not a number, using 0");
            0
        }
    }
}

fn parse_trip_length(raw: &str) -> Option<u32> {
    match raw.trim().parse::<i64>() {
        Ok(n) if n < 1 => Some(1),
        Ok(n) => Some(u32::try_from(n).unwrap_or(u32::MAX)),
        Err(_) => {
            debug!(%raw, "parse_trip_length: cleared");
            None
        }
    }
}

fn toggle<T: PartialEq>(selected: &mut Vec<T>, option: T, checked: bool) {
    if checked {
        if !selected.contains(&option) {
            selected.push(option);
        }
    } else {
        selected.retain(|item| *item != option);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_set_text_is_pure() {
        let before = TripRequest::default();
        let after = before.apply(TripAction::SetText(TextField::Destination, "Rome".to_string()));

        assert_eq!(after.destination, "Rome");
        assert_eq!(before.destination, "");
    }

    #[test]
    fn test_set_count_clamps() {
        let trip = TripRequest::default()
            .apply(TripAction::SetCount(CountField::Kids, "3".to_string()))
            .apply(TripAction::SetCount(CountField::Dogs, "-2".to_string()))
            .apply(TripAction::SetCount(CountField::Adults, "lots".to_string()));

        assert_eq!(trip.kids, 3);
        assert_eq!(trip.dogs, 0);
        assert_eq!(trip.adults, 0);
    }

    #[test]
    fn test_set_trip_length() {
        let trip = TripRequest::default();

        assert_eq!(trip.apply(TripAction::SetTripLength("9".to_string())).trip_length, Some(9));
        assert_eq!(trip.apply(TripAction::SetTripLength("0".to_string())).trip_length, Some(1));
        assert_eq!(trip.apply(TripAction::SetTripLength("-4".to_string())).trip_length, Some(1));
        assert_eq!(trip.apply(TripAction::SetTripLength("".to_string())).trip_length, None);
    }

    #[test]
    fn test_toggle_preserves_selection_order() {
        let trip = TripRequest::default().apply_all([
            TripAction::ToggleTransport(Transport::Train, true),
            TripAction::ToggleTransport(Transport::Car, true),
            TripAction::ToggleTransport(Transport::Train, true),
        ]);
        assert_eq!(trip.transportation, vec![Transport::Train, Transport::Car]);

        let trip = trip.apply(TripAction::ToggleTransport(Transport::Train, false));
        assert_eq!(trip.transportation, vec![Transport::Car]);
    }

    #[test]
    fn test_toggle_food() {
        let trip = TripRequest::default()
            .apply(TripAction::ToggleFood(FoodPreference::FineDining, true))
            .apply(TripAction::ToggleFood(FoodPreference::Casual, false));
        assert_eq!(trip.food, vec![FoodPreference::FineDining]);
    }

    #[test]
    fn test_accommodation_switch_keeps_subtypes() {
        let trip = TripRequest::default().apply_all([
            TripAction::SetHotelRating(HotelRating::FiveStar),
            TripAction::SetAccommodation(AccommodationKind::Airbnb),
            TripAction::SetRentalStyle(RentalStyle::PrivateRoom),
            TripAction::SetAccommodation(AccommodationKind::Hotel),
        ]);
        assert_eq!(trip.accommodation, AccommodationKind::Hotel);
        assert_eq!(trip.hotel_rating, HotelRating::FiveStar);
        assert_eq!(trip.rental_style, RentalStyle::PrivateRoom);
    }

    proptest! {
        #[test]
        fn prop_trip_length_never_zero(raw in "-?[0-9]{0,6}") {
            let trip = TripRequest::default().apply(TripAction::SetTripLength(raw));
            prop_assert!(trip.trip_length.is_none_or(|days| days >= 1));
        }

        #[test]
        fn prop_toggle_on_then_off_is_identity(idx in 0usize..4) {
            let option = Transport::ALL[idx];
            let before = TripRequest::default();
            let after = before
                .apply(TripAction::ToggleTransport(option, true))
                .apply(TripAction::ToggleTransport(option, false));
            prop_assert_eq!(before, after);
        }
    }
}
