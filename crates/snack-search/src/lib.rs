//! # snack-search
//!
//! Tokenized tag/fuzzy search over the snackbox catalog.
//!
//! A request flows through:
//! 1. normalization and tokenization (an empty query lists newest snacks)
//! 2. batched tag classification of the tokens
//! 3. per-token resolution (tag cascade, then substring) and fuzzy broadening
//! 4. AND/OR combination, with a split retry for unspaced AND queries
//! 5. a loose whole-string fallback when nothing matched
//! 6. recency ordering, pagination, and hydration of the page only
//!
//! Fuzzy lookups within one request share a single catalog snapshot when the
//! store provides one (see [`fuzzy`]).
//!
//! Everything runs against a [`SnackStore`]; [`snack_db::SnackDb`] is the
//! production implementation.

pub mod candidates;
pub mod classify;
pub mod combine;
pub mod error;
pub mod fallback;
pub mod fuzzy;
pub mod paginate;
pub mod resolver;
pub mod store;
pub mod tokenizer;

pub use error::SearchError;
pub use paginate::fetch_metrics;
pub use store::SnackStore;

use snack_config::SearchConfig;
use snack_core::entities::MetricsOptions;
use snack_core::enums::SearchOperator;
use snack_core::responses::SearchPage;

use crate::candidates::CandidateSet;
use crate::fuzzy::FuzzyScope;
use crate::paginate::PageWindow;
use crate::tokenizer::NormalizedQuery;

/// Parameters for one search call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub term: String,
    /// 1-based; 0 is read as 1.
    pub page: u32,
    /// Falls back to `SearchConfig::default_page_size`.
    pub page_size: Option<u32>,
    pub operator: SearchOperator,
    /// Whose likes to report in `metrics.liked`.
    pub viewer: Option<String>,
    pub metrics: MetricsOptions,
}

impl SearchRequest {
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            page: 1,
            ..Self::default()
        }
    }
}

/// Run a search and return one hydrated page.
///
/// # Errors
///
/// Returns [`SearchError::Store`] if a mandatory store read fails. Fuzzy
/// lookups and metrics degrade to empty results instead.
pub async fn search_snacks<S: SnackStore>(
    store: &S,
    config: &SearchConfig,
    request: SearchRequest,
) -> Result<SearchPage, SearchError> {
    let query = NormalizedQuery::parse(&request.term, config.max_query_chars);
    let window = PageWindow::new(request.page, request.page_size, config);
    let viewer = request.viewer.as_deref();

    if query.is_browse() {
        return browse(store, window, viewer, request.metrics).await;
    }

    let ids = resolve_ids(store, config, &query, request.operator).await?;
    let ordered = store.order_by_recency(&ids.into_vec()).await?;
    let total = ordered.len() as u64;

    let page_ids = window.slice(&ordered).to_vec();
    let items = paginate::hydrate(store, &page_ids).await?;
    let metrics = fetch_metrics(store, &page_ids, viewer, request.metrics).await;

    tracing::debug!(
        query = %query.text,
        operator = %request.operator,
        total,
        page = window.page,
        "search complete"
    );

    Ok(SearchPage {
        items,
        page: window.page,
        total_pages: SearchPage::total_pages_for(total, window.page_size),
        total,
        page_ids,
        metrics,
    })
}

/// Full id set for a non-empty query, before ordering and paging.
///
/// # Errors
///
/// Returns [`SearchError::Store`] if a mandatory store read fails.
pub async fn resolve_ids<S: SnackStore>(
    store: &S,
    config: &SearchConfig,
    query: &NormalizedQuery,
    operator: SearchOperator,
) -> Result<CandidateSet, SearchError> {
    let fuzzy = FuzzyScope::new(store);
    let tags = classify::classify_tokens(store, &query.tokens).await?;
    let sets = resolver::resolve_tokens(store, &fuzzy, config, &tags, &query.tokens).await?;
    let mut ids = combine::combine(sets, operator);

    if ids.is_empty() && operator == SearchOperator::And && !query.has_whitespace() {
        if let Some(split) = combine::smart_split(store, &fuzzy, config, &query.text).await? {
            ids = split;
        }
    }

    if ids.is_empty() {
        tracing::debug!(query = %query.text, "no token matches; trying whole-string fallback");
        ids = fallback::whole_string(store, config, &query.text).await?;
    }

    Ok(ids)
}

async fn browse<S: SnackStore>(
    store: &S,
    window: PageWindow,
    viewer: Option<&str>,
    options: MetricsOptions,
) -> Result<SearchPage, SearchError> {
    let (mut items, total) = store.count_and_page(window.offset(), window.page_size).await?;
    paginate::attach_tag_names(store, &mut items).await?;

    let page_ids: Vec<String> = items.iter().map(|c| c.id.clone()).collect();
    let metrics = fetch_metrics(store, &page_ids, viewer, options).await;

    Ok(SearchPage {
        items,
        page: window.page,
        total_pages: SearchPage::total_pages_for(total, window.page_size),
        total,
        page_ids,
        metrics,
    })
}
