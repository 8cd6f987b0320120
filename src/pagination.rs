use axum::{
    http::{header::HeaderName, HeaderValue},
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};

use crate::config;

/// Response header carrying the total record count of the filtered,
/// unpaginated result set. Clients derive total pages from it.
pub const TOTAL_RECORDS_HEADER: &str = "totalamountofrecords";

/// Query-string paging parameters. Page numbers are 1-based and not
/// lower-bound validated; a past-the-end page yields an empty result, not an
/// error. Requested sizes above the configured maximum are silently clamped.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Page {
    pub page: i64,
    pub records_per_page: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            records_per_page: config::config().pagination.default_page_size,
        }
    }
}

impl Page {
    pub fn limit(&self) -> i64 {
        let max = config::config().pagination.max_page_size;
        self.records_per_page.min(max)
    }

    pub fn offset(&self) -> i64 {
        ((self.page - 1).max(0)) * self.limit()
    }

    /// `LIMIT x OFFSET y` tail for an already ordered query.
    pub fn to_sql(&self) -> String {
        format!("LIMIT {} OFFSET {}", self.limit(), self.offset())
    }
}

/// A page of results plus the count of all matching records. Serializes the
/// items as the bare JSON body and publishes the total out-of-band in the
/// `totalAmountOfRecords` header.
#[derive(Debug)]
pub struct Paginated<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T: Serialize> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.items).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.total.to_string()) {
            response
                .headers_mut()
                .insert(HeaderName::from_static(TOTAL_RECORDS_HEADER), value);
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let page = Page::default();
        assert_eq!(page.page, 1);
        assert_eq!(page.limit(), 10);
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn oversized_page_size_is_clamped_not_rejected() {
        let page = Page { page: 1, records_per_page: 200 };
        assert_eq!(page.limit(), 50);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let page = Page { page: 3, records_per_page: 10 };
        assert_eq!(page.offset(), 20);
        assert_eq!(page.to_sql(), "LIMIT 10 OFFSET 20");
    }

    #[test]
    fn non_positive_page_floors_offset_at_zero() {
        let page = Page { page: 0, records_per_page: 10 };
        assert_eq!(page.offset(), 0);
    }

    #[test]
    fn paginated_response_carries_total_header() {
        let response = Paginated::new(vec!["a", "b"], 42).into_response();
        let header = response
            .headers()
            .get(TOTAL_RECORDS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        assert_eq!(header.as_deref(), Some("42"));
    }
}
