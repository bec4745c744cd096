//! Page/limit pagination helpers shared by the listing services.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_LIMIT;

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Builds a request from optional query values. Missing or non-positive
    /// values fall back to the defaults and `limit` is capped at `max_limit`.
    pub fn from_query(page: Option<i64>, limit: Option<i64>, max_limit: i64) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let limit = limit
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(max_limit.max(1));
        Self { page, limit }
    }

    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl PageInfo {
    pub fn new(request: PageRequest, total: i64) -> Self {
        let limit = request.limit.max(1);
        Self {
            page: request.page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_query_defaults() {
        let request = PageRequest::from_query(None, None, 100);
        assert_eq!(request, PageRequest::default());
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_from_query_caps_limit() {
        let request = PageRequest::from_query(Some(3), Some(500), 50);
        assert_eq!(request.limit, 50);
        assert_eq!(request.offset(), 100);
    }

    #[test]
    fn test_from_query_ignores_non_positive_values() {
        let request = PageRequest::from_query(Some(0), Some(-4), 100);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_page_count_rounds_up() {
        let request = PageRequest { page: 1, limit: 10 };
        assert_eq!(PageInfo::new(request, 0).pages, 0);
        assert_eq!(PageInfo::new(request, 10).pages, 1);
        assert_eq!(PageInfo::new(request, 11).pages, 2);
    }
}
