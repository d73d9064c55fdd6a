//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and a [`Page`] slice of results.

use serde::{Deserialize, Serialize};

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    #[serde(default = "default_page")]
    pub page: usize,
    /// items per page
    #[serde(default = "default_per_page", alias = "perPage")]
    pub per_page: usize,
}

fn default_page() -> usize { 1 }
fn default_per_page() -> usize { 10 }

impl Pagination {
    /// Clamp to sane defaults; returns `(offset, per_page)`.
    pub fn normalize(self) -> (usize, usize) {
        let page = self.page.max(1);
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1).saturating_mul(per_page), per_page)
    }

    /// Cut one page out of `items`.
    pub fn apply<T>(self, items: Vec<T>) -> Page<T> {
        let (offset, per_page) = self.normalize();
        let total = items.len();
        let items = items.into_iter().skip(offset).take(per_page).collect();
        Page { items, page: self.page.max(1), per_page, total }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: default_page(), per_page: default_per_page() } }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
}
