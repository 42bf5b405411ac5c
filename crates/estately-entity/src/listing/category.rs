//! Listing enumerations: intent, price unit, and property category.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use estately_core::AppError;

/// Whether the property is offered for sale or for rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_intent", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingIntent {
    /// The property is for sale.
    Sale,
    /// The property is for rent.
    Rent,
}

impl Default for ListingIntent {
    fn default() -> Self {
        Self::Sale
    }
}

impl ListingIntent {
    /// Return the intent as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sale => "sale",
            Self::Rent => "rent",
        }
    }
}

impl fmt::Display for ListingIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListingIntent {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sale" => Ok(Self::Sale),
            "rent" => Ok(Self::Rent),
            _ => Err(AppError::validation(format!(
                "Invalid listing type: '{s}'. Expected 'sale' or 'rent'"
            ))),
        }
    }
}

/// The unit a listing's price is quoted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "price_unit", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PriceUnit {
    /// A single total price for the whole property.
    Total,
    /// Price per cent of land (1 cent = 435.6 sq ft).
    PerCent,
    /// Price per square foot.
    PerSqft,
}

impl Default for PriceUnit {
    fn default() -> Self {
        Self::Total
    }
}

impl PriceUnit {
    /// Return the unit as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Total => "total",
            Self::PerCent => "per_cent",
            Self::PerSqft => "per_sqft",
        }
    }
}

impl fmt::Display for PriceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriceUnit {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(' ', "_").as_str() {
            "total" => Ok(Self::Total),
            "per_cent" => Ok(Self::PerCent),
            "per_sqft" => Ok(Self::PerSqft),
            _ => Err(AppError::validation(format!(
                "Invalid price unit: '{s}'. Expected one of: total, per_cent, per_sqft"
            ))),
        }
    }
}

/// Property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "property_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    /// Standalone house.
    House,
    /// Apartment or flat.
    Apartment,
    /// Bare land.
    Land,
    /// Commercial building or space.
    Commercial,
    /// Villa.
    Villa,
    /// Resort property.
    Resort,
}

impl PropertyType {
    /// Return the category as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::House => "house",
            Self::Apartment => "apartment",
            Self::Land => "land",
            Self::Commercial => "commercial",
            Self::Villa => "villa",
            Self::Resort => "resort",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "house" => Ok(Self::House),
            "apartment" => Ok(Self::Apartment),
            "land" => Ok(Self::Land),
            "commercial" => Ok(Self::Commercial),
            "villa" => Ok(Self::Villa),
            "resort" => Ok(Self::Resort),
            _ => Err(AppError::validation(format!(
                "Invalid property type: '{s}'. Expected one of: house, apartment, land, commercial, villa, resort"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_from_str() {
        assert_eq!("Sale".parse::<ListingIntent>().unwrap(), ListingIntent::Sale);
        assert_eq!("RENT".parse::<ListingIntent>().unwrap(), ListingIntent::Rent);
        assert!("lease".parse::<ListingIntent>().is_err());
    }

    #[test]
    fn test_price_unit_accepts_spaces() {
        assert_eq!("Per Cent".parse::<PriceUnit>().unwrap(), PriceUnit::PerCent);
        assert_eq!("per_sqft".parse::<PriceUnit>().unwrap(), PriceUnit::PerSqft);
        assert_eq!("Total".parse::<PriceUnit>().unwrap(), PriceUnit::Total);
    }

    #[test]
    fn test_property_type_from_str() {
        assert_eq!("Villa".parse::<PropertyType>().unwrap(), PropertyType::Villa);
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ListingIntent::default(), ListingIntent::Sale);
        assert_eq!(PriceUnit::default(), PriceUnit::Total);
    }
}
