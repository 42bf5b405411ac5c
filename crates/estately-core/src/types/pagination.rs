//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for listing queries.
const DEFAULT_PAGE_SIZE: u64 = 12;
/// Maximum page size.
const MAX_PAGE_SIZE: u64 = 100;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-based).
    pub page: u64,
    /// Number of items per page.
    pub per_page: u64,
}

impl PageRequest {
    /// Create a new page request. Pages below 1 are treated as page 1 and
    /// the page size is clamped to `1..=100`.
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Calculate the SQL `OFFSET` value.
    pub fn offset(&self) -> u64 {
        (self.page.saturating_sub(1)) * self.per_page
    }

    /// Return the SQL `LIMIT` value.
    pub fn limit(&self) -> u64 {
        self.per_page
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Paginated response wrapper: `{items, total, page, pages}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T: Serialize> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matches ignoring pagination.
    pub total: u64,
    /// Current page number (1-based).
    pub page: u64,
    /// Total number of pages; zero when there are no matches.
    pub pages: u64,
}

impl<T: Serialize> PageResponse<T> {
    /// Create a new paginated response. `pages` is `ceil(total / per_page)`,
    /// so an empty result set reports zero pages.
    pub fn new(items: Vec<T>, page: &PageRequest, total: u64) -> Self {
        let pages = total.div_ceil(page.per_page);
        Self {
            items,
            total,
            page: page.page,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_zero_based() {
        assert_eq!(PageRequest::new(1, 12).offset(), 0);
        assert_eq!(PageRequest::new(3, 12).offset(), 24);
    }

    #[test]
    fn test_page_below_one_treated_as_one() {
        let page = PageRequest::new(0, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn test_page_size_clamped() {
        assert_eq!(PageRequest::new(1, 0).per_page, 1);
        assert_eq!(PageRequest::new(1, 5000).per_page, 100);
    }

    #[test]
    fn test_default_page_size() {
        assert_eq!(PageRequest::default().per_page, 12);
    }

    #[test]
    fn test_pages_is_ceiling_of_total() {
        let page = PageRequest::new(1, 12);
        assert_eq!(PageResponse::<u32>::new(vec![], &page, 25).pages, 3);
        assert_eq!(PageResponse::<u32>::new(vec![], &page, 24).pages, 2);
        assert_eq!(PageResponse::<u32>::new(vec![], &page, 1).pages, 1);
    }

    #[test]
    fn test_zero_total_means_zero_pages() {
        let page = PageRequest::new(1, 12);
        let resp = PageResponse::<u32>::new(vec![], &page, 0);
        assert_eq!(resp.pages, 0);
        assert_eq!(resp.total, 0);
    }

    #[test]
    fn test_response_json_shape() {
        let page = PageRequest::new(2, 10);
        let resp = PageResponse::new(vec![1, 2, 3], &page, 13);
        let json = serde_json::to_value(&resp).expect("serialize");
        assert_eq!(json["items"], serde_json::json!([1, 2, 3]));
        assert_eq!(json["total"], 13);
        assert_eq!(json["page"], 2);
        assert_eq!(json["pages"], 2);
    }
}
