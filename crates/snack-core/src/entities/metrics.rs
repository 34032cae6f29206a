use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-snack mean of each rating axis across all of its reviews.
///
/// `overall` is the mean of the five axis means.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ScoreAverages {
    pub taste: f64,
    pub texture: f64,
    pub value: f64,
    pub quantity: f64,
    pub repurchase: f64,
    pub overall: f64,
    pub review_count: u64,
}

/// Which optional metric maps to load alongside the always-present ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsOptions {
    pub include_review_counts: bool,
    pub include_views: bool,
}

/// Aggregate metrics for a batch of snack ids.
///
/// Snacks with no likes or reviews are simply absent from the maps; callers
/// treat a missing key as zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SnackMetrics {
    pub likes: BTreeMap<String, u64>,
    /// Snacks liked by the requesting viewer. Empty for anonymous requests.
    pub liked: BTreeSet<String>,
    pub averages: BTreeMap<String, ScoreAverages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_counts: Option<BTreeMap<String, u64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<BTreeMap<String, u64>>,
}

impl SnackMetrics {
    /// Likes for one snack, zero when absent.
    #[must_use]
    pub fn likes_for(&self, id: &str) -> u64 {
        self.likes.get(id).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn is_liked(&self, id: &str) -> bool {
        self.liked.contains(id)
    }
}
