//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

use crate::domain::{
    AccommodationKind, CountField, FoodPreference, HotelRating, RentalStyle, TextField, Transport, TripAction,
    TripRequest,
};
use crate::render::OutputFormat;

/// tripplanner - vacation plans from a generative-text model
#[derive(Parser)]
#[command(
    name = "tp",
    about = "Plan a vacation: itinerary, visa notes, costs and attractions",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/tripplanner/logs/tripplanner.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a vacation plan
    Plan {
        #[command(flatten)]
        trip: TripArgs,

        /// Output format (text, markdown, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also write the plan to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't print the source list
        #[arg(long)]
        no_sources: bool,
    },

    /// Show the prompts that would be sent, without calling the service
    Prompt {
        #[command(flatten)]
        trip: TripArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in the trip interactively, then generate a plan
    Form {
        /// Start from a YAML trip file
        #[arg(short, long)]
        trip: Option<PathBuf>,

        /// Output format (text, markdown, json)
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Also write the plan to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a date text reads as a specific range
    Dates {
        /// Free-text dates, e.g. "June 15-22, 2025"
        text: String,
    },
}

/// Trip parameters accepted on the command line
///
/// Flags override values loaded from `--trip`.
#[derive(Debug, Clone, Default, Args)]
pub struct TripArgs {
    /// YAML trip file to start from
    #[arg(short, long)]
    pub trip: Option<PathBuf>,

    /// Where to go
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Where the trip starts
    #[arg(long = "from")]
    pub starting_location: Option<String>,

    /// Dates or period ("June 15-22, 2025", "September")
    #[arg(long)]
    pub dates: Option<String>,

    /// Trip length in days (needed unless the dates are specific)
    #[arg(long)]
    pub days: Option<u32>,

    /// Maximum total budget, free text ("$5000")
    #[arg(long)]
    pub budget: Option<String>,

    /// Places to include within the destination
    #[arg(long)]
    pub prefer: Option<String>,

    /// Transportation (car, air, ship, train), comma-separated
    #[arg(long, value_delimiter = ',')]
    pub transport: Vec<Transport>,

    /// Food (fast-food, casual, fine-dining), comma-separated
    #[arg(long, value_delimiter = ',')]
    pub food: Vec<FoodPreference>,

    /// Accommodation kind (hotel, airbnb)
    #[arg(long)]
    pub stay: Option<AccommodationKind>,

    /// Hotel rating (5-star, 4-star, 3-star)
    #[arg(long)]
    pub hotel_rating: Option<HotelRating>,

    /// Rental style (whole-house, private-room)
    #[arg(long)]
    pub rental_style: Option<RentalStyle>,

    #[arg(long)]
    pub adults: Option<u32>,

    /// Kids aged 2-12
    #[arg(long)]
    pub kids: Option<u32>,

    /// Infants under 2
    #[arg(long)]
    pub infants: Option<u32>,

    #[arg(long)]
    pub dogs: Option<u32>,

    #[arg(long)]
    pub citizenship: Option<String>,

    /// Residence status (e.g. "US green card holder")
    #[arg(long)]
    pub residence: Option<String>,
}

impl TripArgs {
    /// Build the trip: file (or defaults) first, then flags on top
    pub fn to_trip(&self) -> Result<TripRequest> {
        let base = match &self.trip {
            Some(path) => load_trip_file(path)?,
            None => TripRequest::default(),
        };
        Ok(base.apply_all(self.actions(&base)))
    }

    /// Form edits equivalent to the given flags
    pub fn actions(&self, base: &TripRequest) -> Vec<TripAction> {
        let mut actions = Vec::new();

        let texts = [
            (TextField::Destination, &self.destination),
            (TextField::StartingLocation, &self.starting_location),
            (TextField::Dates, &self.dates),
            (TextField::MaxBudget, &self.budget),
            (TextField::PreferredLocations, &self.prefer),
            (TextField::Citizenship, &self.citizenship),
            (TextField::ResidenceStatus, &self.residence),
        ];
        for (field, value) in texts {
            if let Some(value) = value {
                actions.push(TripAction::SetText(field, value.clone()));
            }
        }

        if let Some(days) = self.days {
            actions.push(TripAction::SetTripLength(days.to_string()));
        }

        let counts = [
            (CountField::Adults, self.adults),
            (CountField::Kids, self.kids),
            (CountField::Infants, self.infants),
            (CountField::Dogs, self.dogs),
        ];
        for (field, value) in counts {
            if let Some(value) = value {
                actions.push(TripAction::SetCount(field, value.to_string()));
            }
        }

        if !self.transport.is_empty() {
            actions.extend(base.transportation.iter().map(|t| TripAction::ToggleTransport(*t, false)));
            actions.extend(self.transport.iter().map(|t| TripAction::ToggleTransport(*t, true)));
        }
        if !self.food.is_empty() {
            actions.extend(base.food.iter().map(|f| TripAction::ToggleFood(*f, false)));
            actions.extend(self.food.iter().map(|f| TripAction::ToggleFood(*f, true)));
        }

        if let Some(kind) = self.stay {
            actions.push(TripAction::SetAccommodation(kind));
        }
        if let Some(rating) = self.hotel_rating {
            actions.push(TripAction::SetHotelRating(rating));
        }
        if let Some(style) = self.rental_style {
            actions.push(TripAction::SetRentalStyle(style));
        }

        debug!(action_count = actions.len(), "TripArgs::actions: built");
        actions
    }
}

/// Load a YAML trip file
pub fn load_trip_file(path: &PathBuf) -> Result<TripRequest> {
    debug!(?path, "load_trip_file: called");
    let content =
        std::fs::read_to_string(path).context(format!("Failed to read trip file {}", path.display()))?;
    serde_yaml::from_str(&content).context(format!("Failed to parse trip file {}", path.display()))
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tripplanner")
        .join("logs")
        .join("tripplanner.log")
}
