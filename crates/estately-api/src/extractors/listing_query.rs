//! Explicit parsing of listing search query parameters.
//!
//! Every parameter arrives as a string and is converted here, in one
//! place, into the typed filter, sort, and page the repository consumes.
//! Unknown parameters are ignored; malformed values of known parameters
//! reject the request instead of being silently dropped.

use serde::Deserialize;
use std::str::FromStr;

use estately_core::error::AppError;
use estately_core::result::AppResult;
use estately_core::types::SortDirection;
use estately_core::types::pagination::PageRequest;
use estately_entity::listing::filter::{ListingFilter, ListingSort, ListingSortField};

/// Raw query parameters for `GET /properties`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingQueryParams {
    /// Free-text keyword.
    pub q: Option<String>,
    /// Property category.
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    /// Sale or rent.
    pub listing_type: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub locality: Option<String>,
    /// Seller role the listing was posted under.
    pub posted_by: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Treat empty and whitespace-only values as absent.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_price(name: &str, value: Option<String>) -> AppResult<Option<f64>> {
    match present(value) {
        None => Ok(None),
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
            _ => Err(AppError::validation(format!(
                "Invalid {name}: '{raw}'. Expected a non-negative number"
            ))),
        },
    }
}

fn parse_int(name: &str, value: Option<String>) -> AppResult<Option<i64>> {
    match present(value) {
        None => Ok(None),
        Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
            AppError::validation(format!("Invalid {name}: '{raw}'. Expected a whole number"))
        }),
    }
}

impl ListingQueryParams {
    /// Convert the raw parameters into their typed forms.
    pub fn parse(self) -> AppResult<(ListingFilter, ListingSort, PageRequest)> {
        let filter = ListingFilter {
            keyword: present(self.q),
            property_type: present(self.property_type)
                .map(|v| FromStr::from_str(&v))
                .transpose()?,
            listing_type: present(self.listing_type)
                .map(|v| FromStr::from_str(&v))
                .transpose()?,
            district: present(self.district),
            city: present(self.city),
            locality: present(self.locality),
            posted_by: present(self.posted_by)
                .map(|v| FromStr::from_str(&v))
                .transpose()?,
            min_price: parse_price("minPrice", self.min_price)?,
            max_price: parse_price("maxPrice", self.max_price)?,
        };

        let sort = ListingSort {
            field: present(self.sort_by)
                .map(|v| ListingSortField::from_str(&v))
                .transpose()?
                .unwrap_or_default(),
            direction: present(self.sort_order)
                .map(|v| SortDirection::from_str(&v))
                .transpose()?
                .unwrap_or_default(),
        };

        // Out-of-range numbers clamp; only non-numeric input rejects.
        let default_page = PageRequest::default();
        let page = PageRequest::new(
            parse_int("page", self.page)?
                .map(|v| v.max(0) as u64)
                .unwrap_or(default_page.page),
            parse_int("limit", self.limit)?
                .map(|v| v.max(0) as u64)
                .unwrap_or(default_page.per_page),
        );

        Ok((filter, sort, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estately_entity::listing::category::{ListingIntent, PropertyType};
    use estately_entity::user::UserRole;

    #[test]
    fn test_no_params_means_defaults() {
        let (filter, sort, page) = ListingQueryParams::default().parse().unwrap();
        assert!(filter.is_unconstrained());
        assert_eq!(sort.field, ListingSortField::CreatedAt);
        assert_eq!(sort.direction, SortDirection::Desc);
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 12);
    }

    #[test]
    fn test_all_params_parse_into_typed_filter() {
        let params = ListingQueryParams {
            q: Some("backwater".to_string()),
            property_type: Some("villa".to_string()),
            listing_type: Some("rent".to_string()),
            district: Some("Ernakulam".to_string()),
            city: Some("Kochi".to_string()),
            locality: Some("Fort".to_string()),
            posted_by: Some("agent".to_string()),
            min_price: Some("10000".to_string()),
            max_price: Some("60000".to_string()),
            sort_by: Some("price".to_string()),
            sort_order: Some("asc".to_string()),
            page: Some("3".to_string()),
            limit: Some("20".to_string()),
        };
        let (filter, sort, page) = params.parse().unwrap();
        assert_eq!(filter.keyword.as_deref(), Some("backwater"));
        assert_eq!(filter.property_type, Some(PropertyType::Villa));
        assert_eq!(filter.listing_type, Some(ListingIntent::Rent));
        assert_eq!(filter.posted_by, Some(UserRole::Agent));
        assert_eq!(filter.min_price, Some(10_000.0));
        assert_eq!(sort.field, ListingSortField::Price);
        assert_eq!(sort.direction, SortDirection::Asc);
        assert_eq!(page.page, 3);
        assert_eq!(page.per_page, 20);
    }

    #[test]
    fn test_empty_strings_are_treated_as_absent() {
        let params = ListingQueryParams {
            city: Some("  ".to_string()),
            min_price: Some(String::new()),
            ..Default::default()
        };
        let (filter, _, _) = params.parse().unwrap();
        assert!(filter.city.is_none());
        assert!(filter.min_price.is_none());
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let params = ListingQueryParams {
            min_price: Some("cheap".to_string()),
            ..Default::default()
        };
        assert!(params.parse().is_err());
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let params = ListingQueryParams {
            property_type: Some("castle".to_string()),
            ..Default::default()
        };
        assert!(params.parse().is_err());
    }

    #[test]
    fn test_page_zero_clamps_to_one() {
        let params = ListingQueryParams {
            page: Some("0".to_string()),
            ..Default::default()
        };
        let (_, _, page) = params.parse().unwrap();
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_negative_page_treated_as_one() {
        let params = ListingQueryParams {
            page: Some("-2".to_string()),
            limit: Some("-5".to_string()),
            ..Default::default()
        };
        let (_, _, page) = params.parse().unwrap();
        assert_eq!(page.page, 1);
        assert_eq!(page.per_page, 1);
    }

    #[test]
    fn test_oversized_limit_clamped() {
        let params = ListingQueryParams {
            limit: Some("5000".to_string()),
            ..Default::default()
        };
        let (_, _, page) = params.parse().unwrap();
        assert_eq!(page.per_page, 100);
    }
}
