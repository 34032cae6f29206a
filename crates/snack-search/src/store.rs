//! The data-store contract search runs against, and its libSQL implementation.
//!
//! Every id-returning method yields public snacks only. Search code is generic
//! over [`SnackStore`] so tests can wrap a real store and inject failures.

use std::collections::BTreeSet;

use snack_core::entities::{
    MetricsOptions, SnackCard, SnackFlavor, SnackKeyword, SnackMetrics, SnackType,
};
use snack_core::enums::TagDimension;
use snack_db::SnackDb;
use snack_db::error::DatabaseError;
use snack_db::repos::similarity::FuzzyCorpus;
use snack_db::repos::tags::TagNames;

#[allow(async_fn_in_trait)]
pub trait SnackStore {
    async fn find_type_by_name(&self, name: &str) -> Result<Option<SnackType>, DatabaseError>;

    async fn find_flavor_by_name(&self, name: &str) -> Result<Option<SnackFlavor>, DatabaseError>;

    /// Active keywords only.
    async fn find_keyword_by_name(&self, name: &str)
    -> Result<Option<SnackKeyword>, DatabaseError>;

    /// Which of `names` exist verbatim in one tag dimension.
    async fn existing_tag_names(
        &self,
        dimension: TagDimension,
        names: &[String],
    ) -> Result<BTreeSet<String>, DatabaseError>;

    async fn public_ids_by_type(&self, type_id: &str) -> Result<Vec<String>, DatabaseError>;

    async fn public_ids_by_flavor(&self, flavor_id: &str) -> Result<Vec<String>, DatabaseError>;

    async fn public_ids_by_keyword(&self, keyword_id: &str) -> Result<Vec<String>, DatabaseError>;

    /// Substring match over name, brand, and slug.
    async fn public_ids_matching(&self, needle: &str) -> Result<Vec<String>, DatabaseError>;

    async fn public_ids_by_flavor_name_like(
        &self,
        needle: &str,
    ) -> Result<Vec<String>, DatabaseError>;

    async fn public_ids_by_keyword_name_like(
        &self,
        needle: &str,
    ) -> Result<Vec<String>, DatabaseError>;

    async fn similarity_search(
        &self,
        query: &str,
        limit: u32,
        threshold: f64,
    ) -> Result<Vec<String>, DatabaseError>;

    async fn edit_distance_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<String>, DatabaseError>;

    /// A catalog snapshot that fuzzy lookups can score against for the rest
    /// of one request. `None` routes every lookup through
    /// [`Self::similarity_search`] and [`Self::edit_distance_search`].
    async fn fuzzy_corpus(&self) -> Result<Option<FuzzyCorpus>, DatabaseError> {
        Ok(None)
    }

    /// Browse page newest first, plus the total public count.
    async fn count_and_page(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<SnackCard>, u64), DatabaseError>;

    async fn order_by_recency(&self, ids: &[String]) -> Result<Vec<String>, DatabaseError>;

    async fn load_cards(&self, ids: &[String]) -> Result<Vec<SnackCard>, DatabaseError>;

    async fn load_tag_names(&self, ids: &[String]) -> Result<TagNames, DatabaseError>;

    async fn load_metrics(
        &self,
        ids: &[String],
        viewer: Option<&str>,
        options: MetricsOptions,
    ) -> Result<SnackMetrics, DatabaseError>;
}

/// Log a failed metric read and substitute an empty value.
fn or_empty<T: Default>(label: &str, result: Result<T, DatabaseError>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(metric = label, error = %e, "metric read failed; treating as empty");
        T::default()
    })
}

impl SnackStore for SnackDb {
    async fn find_type_by_name(&self, name: &str) -> Result<Option<SnackType>, DatabaseError> {
        Self::find_type_by_name(self, name).await
    }

    async fn find_flavor_by_name(&self, name: &str) -> Result<Option<SnackFlavor>, DatabaseError> {
        Self::find_flavor_by_name(self, name).await
    }

    async fn find_keyword_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SnackKeyword>, DatabaseError> {
        Self::find_keyword_by_name(self, name).await
    }

    async fn existing_tag_names(
        &self,
        dimension: TagDimension,
        names: &[String],
    ) -> Result<BTreeSet<String>, DatabaseError> {
        Self::existing_tag_names(self, dimension, names).await
    }

    async fn public_ids_by_type(&self, type_id: &str) -> Result<Vec<String>, DatabaseError> {
        Self::public_ids_by_type(self, type_id).await
    }

    async fn public_ids_by_flavor(&self, flavor_id: &str) -> Result<Vec<String>, DatabaseError> {
        Self::public_ids_by_flavor(self, flavor_id).await
    }

    async fn public_ids_by_keyword(&self, keyword_id: &str) -> Result<Vec<String>, DatabaseError> {
        Self::public_ids_by_keyword(self, keyword_id).await
    }

    async fn public_ids_matching(&self, needle: &str) -> Result<Vec<String>, DatabaseError> {
        Self::public_ids_matching(self, needle).await
    }

    async fn public_ids_by_flavor_name_like(
        &self,
        needle: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        Self::public_ids_by_flavor_name_like(self, needle).await
    }

    async fn public_ids_by_keyword_name_like(
        &self,
        needle: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        Self::public_ids_by_keyword_name_like(self, needle).await
    }

    async fn similarity_search(
        &self,
        query: &str,
        limit: u32,
        threshold: f64,
    ) -> Result<Vec<String>, DatabaseError> {
        Self::similarity_search(self, query, limit, threshold).await
    }

    async fn edit_distance_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<String>, DatabaseError> {
        Self::edit_distance_search(self, query, limit).await
    }

    async fn fuzzy_corpus(&self) -> Result<Option<FuzzyCorpus>, DatabaseError> {
        Self::fuzzy_corpus(self).await.map(Some)
    }

    async fn count_and_page(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<SnackCard>, u64), DatabaseError> {
        Self::count_and_page(self, offset, limit).await
    }

    async fn order_by_recency(&self, ids: &[String]) -> Result<Vec<String>, DatabaseError> {
        Self::order_by_recency(self, ids).await
    }

    async fn load_cards(&self, ids: &[String]) -> Result<Vec<SnackCard>, DatabaseError> {
        Self::load_cards(self, ids).await
    }

    async fn load_tag_names(&self, ids: &[String]) -> Result<TagNames, DatabaseError> {
        self.tag_names_for(ids).await
    }

    /// Each metric is read independently; one failing read leaves the others intact.
    async fn load_metrics(
        &self,
        ids: &[String],
        viewer: Option<&str>,
        options: MetricsOptions,
    ) -> Result<SnackMetrics, DatabaseError> {
        if ids.is_empty() {
            return Ok(SnackMetrics {
                review_counts: options.include_review_counts.then(Default::default),
                views: options.include_views.then(Default::default),
                ..SnackMetrics::default()
            });
        }

        let liked = async {
            match viewer {
                Some(user) => self.liked_by(user, ids).await,
                None => Ok(BTreeSet::new()),
            }
        };
        let review_counts = async {
            if options.include_review_counts {
                self.written_review_counts(ids).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let views = async {
            if options.include_views {
                self.view_counts(ids).await.map(Some)
            } else {
                Ok(None)
            }
        };

        let (likes, liked, averages, review_counts, views) = tokio::join!(
            self.like_counts(ids),
            liked,
            self.score_averages(ids),
            review_counts,
            views,
        );

        Ok(SnackMetrics {
            likes: or_empty("likes", likes),
            liked: or_empty("liked", liked),
            averages: or_empty("averages", averages),
            review_counts: or_empty("review_counts", review_counts)
                .or_else(|| options.include_review_counts.then(Default::default)),
            views: or_empty("views", views).or_else(|| options.include_views.then(Default::default)),
        })
    }
}
