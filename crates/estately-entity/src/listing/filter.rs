//! Typed listing filter and sort specification.
//!
//! These types are produced by the API layer's explicit query-parameter
//! parsing step and consumed by the listing repository. Absent fields
//! impose no constraint; the API layer is responsible for turning empty
//! strings into `None` before a filter reaches the repository.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use estately_core::AppError;
use estately_core::types::SortDirection;

use crate::user::UserRole;

use super::category::{ListingIntent, PropertyType};

/// Typed filter over the listings table. Every field is optional; a fully
/// empty filter matches all listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingFilter {
    /// Free-text keyword matched against title, description, and city.
    pub keyword: Option<String>,
    /// Exact property category.
    pub property_type: Option<PropertyType>,
    /// Exact listing intent.
    pub listing_type: Option<ListingIntent>,
    /// Case-insensitive substring match on district.
    pub district: Option<String>,
    /// Case-insensitive substring match on city.
    pub city: Option<String>,
    /// Case-insensitive substring match on locality.
    pub locality: Option<String>,
    /// Exact posted-by role.
    pub posted_by: Option<UserRole>,
    /// Lower price bound (inclusive).
    pub min_price: Option<f64>,
    /// Upper price bound (inclusive).
    pub max_price: Option<f64>,
}

impl ListingFilter {
    /// Whether this filter constrains anything at all.
    pub fn is_unconstrained(&self) -> bool {
        self.keyword.is_none()
            && self.property_type.is_none()
            && self.listing_type.is_none()
            && self.district.is_none()
            && self.city.is_none()
            && self.locality.is_none()
            && self.posted_by.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }
}

/// Fields a listing query may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingSortField {
    /// Creation time (the default).
    CreatedAt,
    /// Price amount.
    Price,
    /// Floor area.
    SizeSqft,
}

impl Default for ListingSortField {
    fn default() -> Self {
        Self::CreatedAt
    }
}

impl ListingSortField {
    /// The whitelisted column name this field sorts on.
    pub fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "created_at",
            Self::Price => "price_amount",
            Self::SizeSqft => "size_sqft",
        }
    }
}

impl FromStr for ListingSortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created_at" | "createdat" => Ok(Self::CreatedAt),
            "price" => Ok(Self::Price),
            "size_sqft" | "sizesqft" => Ok(Self::SizeSqft),
            _ => Err(AppError::validation(format!(
                "Invalid sort field: '{s}'. Expected one of: created_at, price, size_sqft"
            ))),
        }
    }
}

/// A complete sort specification: field plus direction.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListingSort {
    /// The field to sort on.
    pub field: ListingSortField,
    /// Direction; defaults to descending (newest first).
    pub direction: SortDirection,
}
