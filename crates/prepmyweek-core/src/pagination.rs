// ABOUTME: Page-number pagination for recipe listings
// ABOUTME: Clamps page/limit input and builds {data, pagination} response bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 PrepMyWeek

use crate::constants::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Requested page, 1-based
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// Page number, at least 1
    pub page: u32,
    /// Items per page, within `1..=MAX_PAGE_SIZE`
    pub limit: u32,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageParams {
    /// Build from optional query values, clamping out-of-range input
    #[must_use]
    pub fn from_query(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page
            .map_or(1, |p| p.clamp(1, i64::from(u32::MAX)))
            .try_into()
            .unwrap_or(1);
        let limit = limit
            .map_or(i64::from(DEFAULT_PAGE_SIZE), |l| {
                l.clamp(1, i64::from(MAX_PAGE_SIZE))
            })
            .try_into()
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self { page, limit }
    }

    /// Rows to skip
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Current page
    pub page: u32,
    /// Items per page
    pub limit: u32,
    /// Matching items across all pages
    pub total: u64,
    /// Number of pages, 0 when nothing matched
    pub total_pages: u64,
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub data: Vec<T>,
    /// Pagination metadata
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Wrap a page of items
    #[must_use]
    pub fn new(data: Vec<T>, params: PageParams, total: u64) -> Self {
        Self {
            data,
            pagination: PageInfo {
                page: params.page,
                limit: params.limit,
                total,
                total_pages: total.div_ceil(u64::from(params.limit.max(1))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamps_query_values() {
        assert_eq!(PageParams::from_query(None, None), PageParams::default());
        assert_eq!(
            PageParams::from_query(Some(0), Some(1000)),
            PageParams { page: 1, limit: 100 }
        );
        assert_eq!(PageParams::from_query(Some(3), Some(-5)).limit, 1);
        assert_eq!(PageParams::from_query(Some(3), Some(10)).offset(), 20);
    }

    #[test]
    fn test_total_pages() {
        let page = Page::new(vec![1, 2], PageParams { page: 1, limit: 2 }, 5);
        assert_eq!(page.pagination.total_pages, 3);

        let empty: Page<i32> = Page::new(Vec::new(), PageParams::default(), 0);
        assert_eq!(empty.pagination.total_pages, 0);
    }
}
