//! Listing input validation.
//!
//! Create (multipart) and update (JSON) both funnel their fields into a
//! [`ListingDraft`] of raw strings, so one collecting validator covers
//! both paths. Validation gathers every failure into field-tagged errors
//! rather than stopping at the first one.

use estately_core::error::{AppError, FieldError};
use estately_core::result::AppResult;
use estately_entity::listing::category::{ListingIntent, PriceUnit, PropertyType};
use estately_entity::listing::model::{CreateListing, UpdateListing};
use estately_entity::user::UserRole;
use uuid::Uuid;

/// Raw listing input as received from the client, before validation.
///
/// Every field is a string (or absent) because the create path arrives
/// as multipart form text. The JSON update path converts its numbers to
/// strings before validation so both share the same rules.
#[derive(Debug, Clone, Default)]
pub struct ListingDraft {
    pub title: Option<String>,
    pub description: Option<String>,
    pub listing_type: Option<String>,
    pub price_amount: Option<String>,
    pub price_unit: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub locality: Option<String>,
    pub google_maps_link: Option<String>,
    pub size_sqft: Option<String>,
    pub property_type: Option<String>,
    pub features: Vec<String>,
}

/// A draft that passed validation, with every field in its typed form.
#[derive(Debug, Clone)]
pub struct ValidListing {
    pub title: String,
    pub description: Option<String>,
    pub listing_type: ListingIntent,
    pub price_amount: f64,
    pub price_unit: PriceUnit,
    pub district: String,
    pub city: String,
    pub locality: Option<String>,
    pub google_maps_link: Option<String>,
    pub size_sqft: Option<f64>,
    pub property_type: PropertyType,
    pub features: Vec<String>,
}

impl ValidListing {
    /// Combine with ownership data into a create record.
    pub fn into_create(
        self,
        images: Vec<String>,
        seller_id: Uuid,
        posted_by: UserRole,
    ) -> CreateListing {
        CreateListing {
            title: self.title,
            description: self.description,
            listing_type: self.listing_type,
            price_amount: self.price_amount,
            price_unit: self.price_unit,
            district: self.district,
            city: self.city,
            locality: self.locality,
            google_maps_link: self.google_maps_link,
            size_sqft: self.size_sqft,
            property_type: self.property_type,
            features: self.features,
            images,
            seller_id,
            posted_by,
        }
    }

    /// Convert into an update record. Images and ownership are not part
    /// of an update.
    pub fn into_update(self) -> UpdateListing {
        UpdateListing {
            title: self.title,
            description: self.description,
            listing_type: self.listing_type,
            price_amount: self.price_amount,
            price_unit: self.price_unit,
            district: self.district,
            city: self.city,
            locality: self.locality,
            google_maps_link: self.google_maps_link,
            size_sqft: self.size_sqft,
            property_type: self.property_type,
            features: self.features,
        }
    }
}

/// A present, non-blank string.
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

impl ListingDraft {
    /// Validate the draft, collecting every failure.
    ///
    /// On success all fields are returned in their typed form. On failure
    /// the error carries one [`FieldError`] per offending field; the
    /// field names match the request's JSON shape (`price.amount`,
    /// `location.district`, and so on).
    pub fn validate(self) -> AppResult<ValidListing> {
        let mut errors: Vec<FieldError> = Vec::new();

        let title = non_blank(&self.title).unwrap_or_else(|| {
            errors.push(FieldError::new("title", "Title is required"));
            String::new()
        });

        let price_amount = match non_blank(&self.price_amount) {
            None => {
                errors.push(FieldError::new("price.amount", "Price is required"));
                0.0
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => v,
                Ok(_) => {
                    errors.push(FieldError::new(
                        "price.amount",
                        "Price must be a non-negative number",
                    ));
                    0.0
                }
                Err(_) => {
                    errors.push(FieldError::new("price.amount", "Price must be a number"));
                    0.0
                }
            },
        };

        let price_unit = match non_blank(&self.price_unit) {
            None => PriceUnit::default(),
            Some(raw) => raw.parse::<PriceUnit>().unwrap_or_else(|e| {
                errors.push(FieldError::new("price.unit", e.message));
                PriceUnit::default()
            }),
        };

        let listing_type = match non_blank(&self.listing_type) {
            None => ListingIntent::default(),
            Some(raw) => raw.parse::<ListingIntent>().unwrap_or_else(|e| {
                errors.push(FieldError::new("listingType", e.message));
                ListingIntent::default()
            }),
        };

        let district = non_blank(&self.district).unwrap_or_else(|| {
            errors.push(FieldError::new("location.district", "District is required"));
            String::new()
        });

        let city = non_blank(&self.city).unwrap_or_else(|| {
            errors.push(FieldError::new("location.city", "City is required"));
            String::new()
        });

        let property_type = match non_blank(&self.property_type) {
            None => {
                errors.push(FieldError::new("propertyType", "Property type is required"));
                PropertyType::House
            }
            Some(raw) => raw.parse::<PropertyType>().unwrap_or_else(|e| {
                errors.push(FieldError::new("propertyType", e.message));
                PropertyType::House
            }),
        };

        let google_maps_link = match non_blank(&self.google_maps_link) {
            None => None,
            Some(raw) => match url::Url::parse(&raw) {
                Ok(_) => Some(raw),
                Err(_) => {
                    errors.push(FieldError::new(
                        "googleMapsLink",
                        "Map link must be a valid URL",
                    ));
                    None
                }
            },
        };

        let size_sqft = match non_blank(&self.size_sqft) {
            None => None,
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => Some(v),
                _ => {
                    errors.push(FieldError::new(
                        "sizeSqft",
                        "Size must be a positive number",
                    ));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(AppError::validation_fields(errors));
        }

        let features = self
            .features
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();

        Ok(ValidListing {
            title,
            description: non_blank(&self.description),
            listing_type,
            price_amount,
            price_unit,
            district,
            city,
            locality: non_blank(&self.locality),
            google_maps_link,
            size_sqft,
            property_type,
            features,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estately_core::error::ErrorKind;

    fn complete_draft() -> ListingDraft {
        ListingDraft {
            title: Some("Riverside plot".to_string()),
            description: Some("12 cents near the bridge".to_string()),
            listing_type: Some("sale".to_string()),
            price_amount: Some("1800000".to_string()),
            price_unit: Some("per_cent".to_string()),
            district: Some("Alappuzha".to_string()),
            city: Some("Cherthala".to_string()),
            locality: Some(" Muhamma ".to_string()),
            google_maps_link: Some("https://maps.google.com/?q=9.6,76.3".to_string()),
            size_sqft: Some("5227".to_string()),
            property_type: Some("land".to_string()),
            features: vec!["road access".to_string(), "  ".to_string()],
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        let valid = complete_draft().validate().unwrap();
        assert_eq!(valid.listing_type, ListingIntent::Sale);
        assert_eq!(valid.price_unit, PriceUnit::PerCent);
        assert_eq!(valid.price_amount, 1_800_000.0);
        assert_eq!(valid.locality.as_deref(), Some("Muhamma"));
        // blank feature entries are dropped
        assert_eq!(valid.features, vec!["road access".to_string()]);
    }

    #[test]
    fn test_missing_required_fields_are_all_reported() {
        let err = ListingDraft::default().validate().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        let fields: Vec<&str> = err.fields.iter().map(|f| f.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"price.amount"));
        assert!(fields.contains(&"location.district"));
        assert!(fields.contains(&"location.city"));
        assert!(fields.contains(&"propertyType"));
        // optional fields do not show up when absent
        assert!(!fields.contains(&"googleMapsLink"));
        assert!(!fields.contains(&"sizeSqft"));
    }

    #[test]
    fn test_intent_and_unit_default_when_absent() {
        let mut draft = complete_draft();
        draft.listing_type = None;
        draft.price_unit = None;
        let valid = draft.validate().unwrap();
        assert_eq!(valid.listing_type, ListingIntent::Sale);
        assert_eq!(valid.price_unit, PriceUnit::Total);
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut draft = complete_draft();
        draft.price_amount = Some("-5".to_string());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, "price.amount");
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let mut draft = complete_draft();
        draft.price_amount = Some("eighteen lakh".to_string());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields[0].field, "price.amount");
    }

    #[test]
    fn test_bad_map_link_rejected() {
        let mut draft = complete_draft();
        draft.google_maps_link = Some("not a url".to_string());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields[0].field, "googleMapsLink");
    }

    #[test]
    fn test_unknown_property_type_rejected() {
        let mut draft = complete_draft();
        draft.property_type = Some("castle".to_string());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields[0].field, "propertyType");
    }

    #[test]
    fn test_blank_strings_treated_as_absent() {
        let mut draft = complete_draft();
        draft.title = Some("   ".to_string());
        let err = draft.validate().unwrap_err();
        assert_eq!(err.fields[0].field, "title");
    }
}
