//! Request-scoped fuzzy lookups.
//!
//! A search can issue many similarity and edit-distance lookups (one per
//! broadened token, plus up to two per smart-split attempt). When the store
//! offers a [`FuzzyCorpus`], it is loaded once on first use and every lookup
//! in the request scores against it. Otherwise each lookup goes to the store.
//! Either way a failed lookup is logged and counts as no matches.

use snack_db::repos::similarity::FuzzyCorpus;
use tokio::sync::OnceCell;

use crate::candidates::CandidateSet;
use crate::store::SnackStore;

enum Snapshot {
    Loaded(FuzzyCorpus),
    PerCall,
}

pub struct FuzzyScope<'a, S> {
    store: &'a S,
    snapshot: OnceCell<Snapshot>,
}

impl<'a, S: SnackStore> FuzzyScope<'a, S> {
    #[must_use]
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            snapshot: OnceCell::new(),
        }
    }

    async fn snapshot(&self) -> &Snapshot {
        self.snapshot
            .get_or_init(|| async {
                match self.store.fuzzy_corpus().await {
                    Ok(Some(corpus)) => Snapshot::Loaded(corpus),
                    Ok(None) => Snapshot::PerCall,
                    Err(e) => {
                        tracing::warn!(error = %e, "fuzzy corpus load failed; querying per lookup");
                        Snapshot::PerCall
                    }
                }
            })
            .await
    }

    /// Trigram matches for `query`, best first.
    pub async fn similar(&self, query: &str, limit: u32, threshold: f64) -> CandidateSet {
        if let Snapshot::Loaded(corpus) = self.snapshot().await {
            return corpus.similar(query, limit, threshold).into();
        }
        match self.store.similarity_search(query, limit, threshold).await {
            Ok(ids) => ids.into(),
            Err(e) => {
                tracing::warn!(query, error = %e, "similarity search failed; treating as empty");
                CandidateSet::new()
            }
        }
    }

    /// Single-edit matches for `query`.
    pub async fn one_edit(&self, query: &str, limit: u32) -> CandidateSet {
        if let Snapshot::Loaded(corpus) = self.snapshot().await {
            return corpus.one_edit(query, limit).into();
        }
        match self.store.edit_distance_search(query, limit).await {
            Ok(ids) => ids.into(),
            Err(e) => {
                tracing::warn!(query, error = %e, "edit-distance search failed; treating as empty");
                CandidateSet::new()
            }
        }
    }
}
