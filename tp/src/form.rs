//! Interactive trip form
//!
//! Walks the trip fields on the terminal with line editing. Every answer
//! becomes a [`TripAction`] dispatched to a [`Session`], so the form shares
//! the reducer with everything else. An empty answer keeps the current value;
//! `none` or `-` clears it.

use colored::Colorize;
use eyre::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::str::FromStr;
use tracing::debug;

use crate::domain::{
    AccommodationKind, CountField, FoodPreference, HotelRating, RentalStyle, TextField, Transport, TripAction,
    TripRequest,
};
use crate::planner::{Planner, Session, ValidationError};

/// Outcome of one prompt
enum Answer {
    Value(String),
    Keep,
    Quit,
}

/// Line-edited trip form
pub struct TripForm {
    rl: DefaultEditor,
    session: Session,
}

impl TripForm {
    pub fn new(initial: TripRequest) -> Result<Self> {
        let rl = DefaultEditor::new().map_err(|e| eyre::eyre!("Failed to initialize readline: {}", e))?;
        Ok(Self {
            rl,
            session: Session::new(initial),
        })
    }

    /// Run the form; `None` if the user quit
    ///
    /// The returned session is always ready to submit.
    pub fn run(mut self) -> Result<Option<Session>> {
        self.print_welcome();

        let text_fields = [
            (TextField::Destination, "Destination"),
            (TextField::StartingLocation, "Starting location"),
            (TextField::PreferredLocations, "Preferred locations to visit"),
            (TextField::Dates, "Dates or period (e.g. \"June 15-22, 2025\" or \"September\")"),
        ];
        for (field, label) in text_fields {
            if !self.ask_text(field, label)? {
                return Ok(None);
            }
        }

        if self.session.trip().trip_length_required() {
            if !self.ask_trip_length()? {
                return Ok(None);
            }
        } else {
            println!("{}", "  Specific dates detected, trip length will be inferred.".dimmed());
        }

        for (field, label) in [
            (TextField::MaxBudget, "Maximum total budget"),
            (TextField::Citizenship, "Citizenship"),
            (TextField::ResidenceStatus, "Residence status"),
        ] {
            if !self.ask_text(field, label)? {
                return Ok(None);
            }
        }

        for (field, label) in [
            (CountField::Adults, "Adults"),
            (CountField::Kids, "Kids (2-12 yrs)"),
            (CountField::Infants, "Infants (< 2 yrs)"),
            (CountField::Dogs, "Dogs"),
        ] {
            let current = count_value(self.session.trip(), field).to_string();
            match self.ask(label, &current)? {
                Answer::Value(v) => self.session.dispatch(TripAction::SetCount(field, v)),
                Answer::Keep => {}
                Answer::Quit => return Ok(None),
            }
        }

        if !self.ask_selection("Transportation (car, air, ship, train)", Selection::Transport)? {
            return Ok(None);
        }
        if !self.ask_selection("Food (fast-food, casual, fine-dining)", Selection::Food)? {
            return Ok(None);
        }
        if !self.ask_accommodation()? {
            return Ok(None);
        }

        while let Some(missing) = missing_requirement(&self.session) {
            println!("{} {}", "!".red().bold(), missing);
            let answered = match missing {
                ValidationError::MissingDestination => self.ask_text(TextField::Destination, "Destination")?,
                ValidationError::TripLengthRequired => self.ask_trip_length()?,
            };
            if !answered {
                return Ok(None);
            }
        }

        self.print_summary();
        match self.ask("Generate plan? [Y/n]", "y")? {
            Answer::Value(v) if v.trim().eq_ignore_ascii_case("n") => Ok(None),
            Answer::Quit => Ok(None),
            _ => Ok(Some(self.session)),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("{}", "Dream Trip Planner".bright_cyan().bold());
        println!("Press Enter to keep the value in brackets, type none to clear it, Ctrl+D to quit.");
        println!();
    }

    fn print_summary(&self) {
        let trip = self.session.trip();
        println!();
        println!("{}", "Trip summary:".bright_cyan());
        println!("  {:14} {}", "Destination".yellow(), trip.destination);
        println!("  {:14} {}", "Dates".yellow(), trip.dates);
        if trip.trip_length_required() {
            let days = trip.trip_length.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
            println!("  {:14} {}", "Length".yellow(), days);
        }
        println!("  {:14} {}", "Group".yellow(), trip.group_description());
        println!("  {:14} {}", "Stay".yellow(), trip.accommodation);
        println!();
    }

    fn ask(&mut self, label: &str, current: &str) -> Result<Answer> {
        let prompt = if current.is_empty() {
            format!("{}: ", label)
        } else {
            format!("{} [{}]: ", label, current)
        };

        match self.rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    Ok(Answer::Keep)
                } else {
                    let _ = self.rl.add_history_entry(input);
                    Ok(Answer::Value(input.to_string()))
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                debug!("TripForm::ask: user quit");
                Ok(Answer::Quit)
            }
            Err(err) => Err(eyre::eyre!("Readline error: {}", err)),
        }
    }

    /// Returns false when the user quit
    fn ask_text(&mut self, field: TextField, label: &str) -> Result<bool> {
        let current = text_value(self.session.trip(), field).to_string();
        match self.ask(label, &current)? {
            Answer::Value(v) => {
                self.session.dispatch(text_action(field, &v));
                Ok(true)
            }
            Answer::Keep => Ok(true),
            Answer::Quit => Ok(false),
        }
    }

    fn ask_trip_length(&mut self) -> Result<bool> {
        let current = self.session.trip().trip_length.map(|d| d.to_string()).unwrap_or_default();
        match self.ask("Approximate trip length (days)", &current)? {
            Answer::Value(v) => {
                self.session.dispatch(TripAction::SetTripLength(v));
                Ok(true)
            }
            Answer::Keep => Ok(true),
            Answer::Quit => Ok(false),
        }
    }

    fn ask_selection(&mut self, label: &str, kind: Selection) -> Result<bool> {
        loop {
            let trip = self.session.trip();
            let current = match kind {
                Selection::Transport => names(&trip.transportation),
                Selection::Food => names(&trip.food),
            };
            let input = match self.ask(label, &current)? {
                Answer::Value(v) => v,
                Answer::Keep => return Ok(true),
                Answer::Quit => return Ok(false),
            };

            let trip = self.session.trip();
            let actions = match kind {
                Selection::Transport => parse_selection::<Transport>(&input)
                    .map(|wanted| selection_actions(&trip.transportation, &wanted, TripAction::ToggleTransport)),
                Selection::Food => parse_selection::<FoodPreference>(&input)
                    .map(|wanted| selection_actions(&trip.food, &wanted, TripAction::ToggleFood)),
            };

            match actions {
                Ok(actions) => {
                    actions.into_iter().for_each(|action| self.session.dispatch(action));
                    return Ok(true);
                }
                Err(e) => println!("{} {}", "?".yellow(), e),
            }
        }
    }

    fn ask_accommodation(&mut self) -> Result<bool> {
        loop {
            let current = self.session.trip().accommodation.to_string();
            match self.ask("Accommodation (hotel, airbnb)", &current)? {
                Answer::Value(v) => match v.parse::<AccommodationKind>() {
                    Ok(kind) => {
                        self.session.dispatch(TripAction::SetAccommodation(kind));
                        break;
                    }
                    Err(e) => println!("{} {}", "?".yellow(), e),
                },
                Answer::Keep => break,
                Answer::Quit => return Ok(false),
            }
        }

        loop {
            let trip = self.session.trip();
            let (label, current) = match trip.accommodation {
                AccommodationKind::Hotel => ("Hotel rating (5-star, 4-star, 3-star)", trip.hotel_rating.to_string()),
                AccommodationKind::Airbnb => ("Rental style (whole-house, private-room)", trip.rental_style.to_string()),
            };
            let input = match self.ask(label, &current)? {
                Answer::Value(v) => v,
                Answer::Keep => return Ok(true),
                Answer::Quit => return Ok(false),
            };

            let action = match self.session.trip().accommodation {
                AccommodationKind::Hotel => input.parse::<HotelRating>().map(TripAction::SetHotelRating),
                AccommodationKind::Airbnb => input.parse::<RentalStyle>().map(TripAction::SetRentalStyle),
            };
            match action {
                Ok(action) => {
                    self.session.dispatch(action);
                    return Ok(true);
                }
                Err(e) => println!("{} {}", "?".yellow(), e),
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Selection {
    Transport,
    Food,
}

/// First requirement keeping the session from being submitted
pub fn missing_requirement(session: &Session) -> Option<ValidationError> {
    if session.can_submit() {
        return None;
    }
    Planner::validate(session.trip()).err()
}

/// Answer to a text prompt as an edit; `none` or `-` clears the field
pub fn text_action(field: TextField, input: &str) -> TripAction {
    let input = input.trim();
    if is_clear(input) {
        TripAction::SetText(field, String::new())
    } else {
        TripAction::SetText(field, input.to_string())
    }
}

fn is_clear(input: &str) -> bool {
    input.eq_ignore_ascii_case("none") || input == "-"
}

fn text_value(trip: &TripRequest, field: TextField) -> &str {
    match field {
        TextField::Destination => &trip.destination,
        TextField::StartingLocation => &trip.starting_location,
        TextField::Dates => &trip.dates,
        TextField::MaxBudget => &trip.max_budget,
        TextField::PreferredLocations => &trip.preferred_locations,
        TextField::Citizenship => &trip.citizenship,
        TextField::ResidenceStatus => &trip.residence_status,
    }
}

fn count_value(trip: &TripRequest, field: CountField) -> u32 {
    match field {
        CountField::Adults => trip.adults,
        CountField::Kids => trip.kids,
        CountField::Infants => trip.infants,
        CountField::Dogs => trip.dogs,
    }
}

fn names<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ")
}

/// Parse a comma-separated option list; "none" clears the selection
pub fn parse_selection<T: FromStr<Err = String>>(input: &str) -> Result<Vec<T>, String> {
    let input = input.trim();
    if is_clear(input) {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(T::from_str)
        .collect()
}

/// Toggle actions that turn `current` into `wanted`, keeping `wanted`'s order
pub fn selection_actions<T: Copy + PartialEq>(
    current: &[T],
    wanted: &[T],
    toggle: fn(T, bool) -> TripAction,
) -> Vec<TripAction> {
    current
        .iter()
        .map(|item| toggle(*item, false))
        .chain(wanted.iter().map(|item| toggle(*item, true)))
        .collect()
}
