//! Request body shapes.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use estately_service::listing::ListingDraft;

/// POST /auth/register
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    /// One of `owner`, `builder`, `agent`.
    pub role: String,
    #[validate(custom(function = validate_phone))]
    pub phone_number: Option<String>,
}

/// Digits plus common punctuation (`+ - ( )` and spaces), 10-15 digits.
fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || "+-() ".contains(c));
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if allowed && (10..=15).contains(&digits) {
        return Ok(());
    }
    let mut err = ValidationError::new("phone_number");
    err.message = Some("Phone number must be 10-15 digits".into());
    Err(err)
}

/// POST /auth/login
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Price sub-object of a listing payload.
///
/// `amount` accepts either a JSON number or a string; both are carried
/// as raw text into the shared draft validator.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceInput {
    pub amount: Option<serde_json::Value>,
    pub unit: Option<String>,
}

/// Location sub-object of a listing payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    pub district: Option<String>,
    pub city: Option<String>,
    pub locality: Option<String>,
}

/// PUT /properties/{id}
///
/// The create path arrives as multipart and builds its draft directly;
/// this JSON shape exists for updates and funnels into the same draft.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub listing_type: Option<String>,
    pub price: Option<PriceInput>,
    pub location: Option<LocationInput>,
    pub google_maps_link: Option<String>,
    pub size_sqft: Option<serde_json::Value>,
    pub property_type: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Render a scalar JSON value as the raw text the draft validator expects.
fn raw_text(value: Option<serde_json::Value>) -> Option<String> {
    match value? {
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl SaveListingRequest {
    /// Flatten the nested JSON shape into a validation draft.
    pub fn into_draft(self) -> ListingDraft {
        let price = self.price.unwrap_or_default();
        let location = self.location.unwrap_or_default();
        ListingDraft {
            title: self.title,
            description: self.description,
            listing_type: self.listing_type,
            price_amount: raw_text(price.amount),
            price_unit: price.unit,
            district: location.district,
            city: location.city,
            locality: location.locality,
            google_maps_link: self.google_maps_link,
            size_sqft: raw_text(self.size_sqft),
            property_type: self.property_type,
            features: self.features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_and_string_amounts_both_carry_through() {
        let json = serde_json::json!({
            "title": "Lake view flat",
            "price": {"amount": 25000, "unit": "total"},
            "location": {"district": "Idukki", "city": "Munnar"},
            "sizeSqft": "900",
            "propertyType": "apartment",
            "listingType": "rent"
        });
        let req: SaveListingRequest = serde_json::from_value(json).unwrap();
        let draft = req.into_draft();
        assert_eq!(draft.price_amount.as_deref(), Some("25000"));
        assert_eq!(draft.size_sqft.as_deref(), Some("900"));
        assert_eq!(draft.district.as_deref(), Some("Idukki"));
        assert!(draft.validate().is_ok());
    }

    fn register(phone: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret1".to_string(),
            role: "owner".to_string(),
            phone_number: phone.map(str::to_string),
        }
    }

    #[test]
    fn test_phone_accepts_punctuated_digits() {
        assert!(register(Some("+91 98765-43210")).validate().is_ok());
        assert!(register(Some("(0484) 2345678")).validate().is_ok());
        assert!(register(None).validate().is_ok());
    }

    #[test]
    fn test_phone_rejects_letters_and_short_numbers() {
        assert!(register(Some("98765abcde")).validate().is_err());
        assert!(register(Some("12345")).validate().is_err());
    }

    #[test]
    fn test_missing_nested_objects_become_empty_draft_fields() {
        let req: SaveListingRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        let draft = req.into_draft();
        assert!(draft.price_amount.is_none());
        assert!(draft.city.is_none());
    }
}
