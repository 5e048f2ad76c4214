//! Pagination parameters shared by query endpoints.

use serde::Serialize;

/// Default page size for `query_all` walks.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Maximum pages to fetch in one walk (safety limit).
pub(crate) const MAX_PAGES: u32 = 1000;

/// Common query-string parameters for paginated requests.
///
/// The services use kebab-case parameter names on the wire.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryParams {
    /// Page number (1-indexed).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Number of items per page.
    #[serde(rename = "per-page", skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
    /// Field to sort by.
    #[serde(rename = "sort-by", skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    #[serde(rename = "sort-direction", skip_serializing_if = "Option::is_none")]
    pub sort_direction: Option<String>,
}

impl QueryParams {
    /// Parameters for a specific page.
    #[must_use]
    pub fn for_page(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            ..Default::default()
        }
    }
}
