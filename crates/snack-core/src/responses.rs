//! Response types returned by the search API and as JSON by `snackbox` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{SnackCard, SnackMetrics};

/// One page of search (or browse) results.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SearchPage {
    pub items: Vec<SnackCard>,
    /// The 1-based page that was requested, echoed back even when out of range.
    pub page: u32,
    /// Always at least 1.
    pub total_pages: u32,
    /// Matches across all pages.
    pub total: u64,
    /// Ordered ids of `items`.
    pub page_ids: Vec<String>,
    pub metrics: SnackMetrics,
}

impl SearchPage {
    /// Pages needed for `total` matches at `page_size` per page, never less than one.
    #[must_use]
    pub const fn total_pages_for(total: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 1;
        }
        let pages = total.div_ceil(page_size as u64);
        if pages == 0 {
            1
        } else if pages > u32::MAX as u64 {
            u32::MAX
        } else {
            pages as u32
        }
    }
}

/// Response from `snackbox import`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportSummary {
    pub types: u32,
    pub flavors: u32,
    pub keywords: u32,
    pub snacks: u32,
}
