//! Listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::user::UserRole;

use super::category::{ListingIntent, PriceUnit, PropertyType};

/// A property advertisement.
///
/// Listings are auto-published: a row in the table is immediately visible
/// and searchable. `seller_id` and `posted_by` are set at creation time and
/// never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// Unique listing identifier.
    pub id: Uuid,
    /// Short headline.
    pub title: String,
    /// Free-form description (optional).
    pub description: Option<String>,
    /// Whether the property is for sale or rent.
    pub listing_type: ListingIntent,
    /// Asking price; never negative.
    pub price_amount: f64,
    /// Unit the price is quoted in.
    pub price_unit: PriceUnit,
    /// District the property is located in.
    pub district: String,
    /// City the property is located in.
    pub city: String,
    /// Locality within the city (optional).
    pub locality: Option<String>,
    /// External map link (optional, well-formed URL).
    pub google_maps_link: Option<String>,
    /// Floor area in square feet (optional).
    pub size_sqft: Option<f64>,
    /// Property category.
    pub property_type: PropertyType,
    /// Ordered feature tags.
    pub features: Vec<String>,
    /// Ordered public image URLs, at most six.
    pub images: Vec<String>,
    /// The owning user. Immutable after creation.
    pub seller_id: Uuid,
    /// The seller's role at the moment of creation.
    pub posted_by: UserRole,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A listing joined with its seller's public contact details.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ListingWithSeller {
    /// The listing itself.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub listing: Listing,
    /// Seller display name.
    pub seller_name: String,
    /// Seller email.
    pub seller_email: String,
    /// Seller phone number (optional).
    pub seller_phone: Option<String>,
}

/// Data required to create a new listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListing {
    /// Short headline.
    pub title: String,
    /// Free-form description (optional).
    pub description: Option<String>,
    /// Whether the property is for sale or rent.
    pub listing_type: ListingIntent,
    /// Asking price.
    pub price_amount: f64,
    /// Unit the price is quoted in.
    pub price_unit: PriceUnit,
    /// District.
    pub district: String,
    /// City.
    pub city: String,
    /// Locality (optional).
    pub locality: Option<String>,
    /// External map link (optional).
    pub google_maps_link: Option<String>,
    /// Floor area in square feet (optional).
    pub size_sqft: Option<f64>,
    /// Property category.
    pub property_type: PropertyType,
    /// Ordered feature tags.
    pub features: Vec<String>,
    /// Ordered public image URLs, upload order preserved.
    pub images: Vec<String>,
    /// The owning user.
    pub seller_id: Uuid,
    /// The seller's role snapshot.
    pub posted_by: UserRole,
}

/// Mutable fields replaced by a listing update.
///
/// `seller_id`, `posted_by`, and `images` are deliberately absent: ownership
/// and the role snapshot are immutable, and a plain field update never
/// touches the stored images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateListing {
    /// Short headline.
    pub title: String,
    /// Free-form description (optional).
    pub description: Option<String>,
    /// Whether the property is for sale or rent.
    pub listing_type: ListingIntent,
    /// Asking price.
    pub price_amount: f64,
    /// Unit the price is quoted in.
    pub price_unit: PriceUnit,
    /// District.
    pub district: String,
    /// City.
    pub city: String,
    /// Locality (optional).
    pub locality: Option<String>,
    /// External map link (optional).
    pub google_maps_link: Option<String>,
    /// Floor area in square feet (optional).
    pub size_sqft: Option<f64>,
    /// Property category.
    pub property_type: PropertyType,
    /// Ordered feature tags.
    pub features: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_listing() -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: "2BHK near the backwaters".to_string(),
            description: Some("Quiet street, east-facing".to_string()),
            listing_type: ListingIntent::Sale,
            price_amount: 4_500_000.0,
            price_unit: PriceUnit::Total,
            district: "Ernakulam".to_string(),
            city: "Kochi".to_string(),
            locality: Some("Kakkanad".to_string()),
            google_maps_link: None,
            size_sqft: Some(1150.0),
            property_type: PropertyType::Apartment,
            features: vec!["parking".to_string(), "borewell".to_string()],
            images: vec!["http://cdn.test/media/listings/a.jpg".to_string()],
            seller_id: Uuid::new_v4(),
            posted_by: UserRole::Owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_camel_case_wire_format() {
        let json = serde_json::to_value(sample_listing()).expect("serialize");
        assert!(json.get("listingType").is_some());
        assert!(json.get("priceAmount").is_some());
        assert!(json.get("googleMapsLink").is_some());
        assert!(json.get("postedBy").is_some());
        assert!(json.get("listing_type").is_none());
    }

    #[test]
    fn test_with_seller_flattens_listing() {
        let with_seller = ListingWithSeller {
            listing: sample_listing(),
            seller_name: "Asha".to_string(),
            seller_email: "asha@example.com".to_string(),
            seller_phone: Some("9876543210".to_string()),
        };
        let json = serde_json::to_value(&with_seller).expect("serialize");
        assert!(json.get("title").is_some());
        assert_eq!(json["sellerName"], "Asha");
        assert_eq!(json["sellerPhone"], "9876543210");
    }
}
