//! Page windows, page hydration, and best-effort metrics.

use snack_config::SearchConfig;
use snack_core::entities::{MetricsOptions, SnackCard, SnackMetrics};

use crate::error::SearchError;
use crate::store::SnackStore;

/// A normalized page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based; a requested page of 0 becomes 1.
    pub page: u32,
    /// Clamped to `[1, max_page_size]`.
    pub page_size: u32,
}

impl PageWindow {
    #[must_use]
    pub fn new(page: u32, page_size: Option<u32>, config: &SearchConfig) -> Self {
        let max = config.max_page_size.max(1);
        Self {
            page: page.max(1),
            page_size: page_size
                .unwrap_or(config.default_page_size)
                .clamp(1, max),
        }
    }

    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }

    /// The slice of `ids` this window covers; empty past the end.
    #[must_use]
    pub fn slice(self, ids: &[String]) -> &[String] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        if start >= ids.len() {
            return &[];
        }
        let end = start.saturating_add(self.page_size as usize).min(ids.len());
        &ids[start..end]
    }
}

/// Fill in flavor and keyword names on already-loaded cards.
pub async fn attach_tag_names<S: SnackStore>(
    store: &S,
    cards: &mut [SnackCard],
) -> Result<(), SearchError> {
    if cards.is_empty() {
        return Ok(());
    }
    let ids: Vec<String> = cards.iter().map(|c| c.id.clone()).collect();
    let mut names = store.load_tag_names(&ids).await?;
    for card in cards {
        card.flavors = names.flavors.remove(&card.id).unwrap_or_default();
        card.keywords = names.keywords.remove(&card.id).unwrap_or_default();
    }
    Ok(())
}

/// Load display cards with tag names for `ids`, in the given order.
pub async fn hydrate<S: SnackStore>(
    store: &S,
    ids: &[String],
) -> Result<Vec<SnackCard>, SearchError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut cards = store.load_cards(ids).await?;
    attach_tag_names(store, &mut cards).await?;
    Ok(cards)
}

/// Aggregate metrics for `ids`. A failed read is logged and yields empty
/// metrics rather than an error.
pub async fn fetch_metrics<S: SnackStore>(
    store: &S,
    ids: &[String],
    viewer: Option<&str>,
    options: MetricsOptions,
) -> SnackMetrics {
    match store.load_metrics(ids, viewer, options).await {
        Ok(metrics) => metrics,
        Err(e) => {
            tracing::warn!(error = %e, count = ids.len(), "metrics read failed; returning empty metrics");
            SnackMetrics {
                review_counts: options.include_review_counts.then(Default::default),
                views: options.include_views.then(Default::default),
                ..SnackMetrics::default()
            }
        }
    }
}
