//! Option catalogues offered by the trip form
//!
//! Each option has a short machine name (used in YAML trip files and CLI
//! flags) and a display label, which is the text interpolated into prompts.

use serde::{Deserialize, Serialize};

/// Preferred mode of transportation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Car,
    Air,
    Ship,
    Train,
}

impl Transport {
    /// All transport options, in form order
    pub const ALL: [Transport; 4] = [Self::Car, Self::Air, Self::Ship, Self::Train];

    /// Label shown in the form and sent to the model
    pub fn label(&self) -> &'static str {
        match self {
            Self::Car => "Car",
            Self::Air => "Air (Plane)",
            Self::Ship => "Ship (Ferry/Cruise)",
            Self::Train => "Train",
        }
    }
}

impl std::fmt::Display for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "car" => Ok(Self::Car),
            "air" | "plane" | "air (plane)" => Ok(Self::Air),
            "ship" | "ferry" | "cruise" | "ship (ferry/cruise)" => Ok(Self::Ship),
            "train" => Ok(Self::Train),
            _ => Err(format!("Unknown transport: {}. Use: car, air, ship, or train", s)),
        }
    }
}

/// Dining preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FoodPreference {
    FastFood,
    Casual,
    FineDining,
}

impl FoodPreference {
    /// All food options, in form order
    pub const ALL: [FoodPreference; 3] = [Self::FastFood, Self::Casual, Self::FineDining];

    pub fn label(&self) -> &'static str {
        match self {
            Self::FastFood => "Fast Food / Quick Bites",
            Self::Casual => "Casual Dining / Local Eateries",
            Self::FineDining => "Fine Dining / High-End",
        }
    }
}

impl std::fmt::Display for FoodPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for FoodPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fast-food" | "fast" | "quick" => Ok(Self::FastFood),
            "casual" | "local" => Ok(Self::Casual),
            "fine-dining" | "fine" => Ok(Self::FineDining),
            _ => Err(format!("Unknown food preference: {}. Use: fast-food, casual, or fine-dining", s)),
        }
    }
}

/// Kind of accommodation the group wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationKind {
    #[default]
    Hotel,
    Airbnb,
}

impl std::fmt::Display for AccommodationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotel => write!(f, "Hotel"),
            Self::Airbnb => write!(f, "Airbnb"),
        }
    }
}

impl std::str::FromStr for AccommodationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hotel" => Ok(Self::Hotel),
            "airbnb" | "rental" | "vrbo" => Ok(Self::Airbnb),
            _ => Err(format!("Unknown accommodation: {}. Use: hotel or airbnb", s)),
        }
    }
}

/// Hotel star rating, only meaningful for [`AccommodationKind::Hotel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HotelRating {
    #[serde(rename = "5-star")]
    FiveStar,
    #[default]
    #[serde(rename = "4-star")]
    FourStar,
    #[serde(rename = "3-star")]
    ThreeStar,
}

impl std::fmt::Display for HotelRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FiveStar => write!(f, "5-Star"),
            Self::FourStar => write!(f, "4-Star"),
            Self::ThreeStar => write!(f, "3-Star"),
        }
    }
}

impl std::str::FromStr for HotelRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5" | "5-star" | "five" => Ok(Self::FiveStar),
            "4" | "4-star" | "four" => Ok(Self::FourStar),
            "3" | "3-star" | "three" => Ok(Self::ThreeStar),
            _ => Err(format!("Unknown hotel rating: {}. Use: 5-star, 4-star, or 3-star", s)),
        }
    }
}

/// Rental style, only meaningful for [`AccommodationKind::Airbnb`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RentalStyle {
    #[default]
    WholeHouse,
    PrivateRoom,
}

impl std::fmt::Display for RentalStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WholeHouse => write!(f, "Whole House"),
            Self::PrivateRoom => write!(f, "Private Room"),
        }
    }
}

impl std::str::FromStr for RentalStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "whole-house" | "whole" | "house" | "apartment" => Ok(Self::WholeHouse),
            "private-room" | "room" => Ok(Self::PrivateRoom),
            _ => Err(format!("Unknown rental style: {}. Use: whole-house or private-room", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_labels() {
        let labels: Vec<_> = Transport::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["Car", "Air (Plane)", "Ship (Ferry/Cruise)", "Train"]);
    }

    #[test]
    fn test_transport_parse() {
        assert_eq!("car".parse::<Transport>().unwrap(), Transport::Car);
        assert_eq!("Plane".parse::<Transport>().unwrap(), Transport::Air);
        assert_eq!("CRUISE".parse::<Transport>().unwrap(), Transport::Ship);
        assert!("bicycle".parse::<Transport>().is_err());
    }

    #[test]
    fn test_food_parse_and_label() {
        let food: FoodPreference = "fine-dining".parse().unwrap();
        assert_eq!(food, FoodPreference::FineDining);
        assert_eq!(food.to_string(), "Fine Dining / High-End");
        assert!("buffet".parse::<FoodPreference>().is_err());
    }

    #[test]
    fn test_accommodation_defaults() {
        assert_eq!(AccommodationKind::default(), AccommodationKind::Hotel);
        assert_eq!(HotelRating::default().to_string(), "4-Star");
        assert_eq!(RentalStyle::default().to_string(), "Whole House");
    }

    #[test]
    fn test_hotel_rating_parse() {
        assert_eq!("5".parse::<HotelRating>().unwrap(), HotelRating::FiveStar);
        assert_eq!("3-Star".parse::<HotelRating>().unwrap(), HotelRating::ThreeStar);
        assert!("7-star".parse::<HotelRating>().is_err());
    }

    #[test]
    fn test_options_serde() {
        let yaml = serde_yaml::to_string(&HotelRating::FiveStar).unwrap();
        assert_eq!(yaml.trim(), "5-star");

        let style: RentalStyle = serde_yaml::from_str("private-room").unwrap();
        assert_eq!(style, RentalStyle::PrivateRoom);

        let food: FoodPreference = serde_json::from_str("\"fast-food\"").unwrap();
        assert_eq!(food, FoodPreference::FastFood);
    }
}
