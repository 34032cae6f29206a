//! Fuzzy snack lookups: trigram similarity and single-edit matching.
//!
//! Both score the public catalog in process with [`crate::trigram`], so they
//! behave the same against local and hosted databases. A [`FuzzyCorpus`] is
//! one snapshot of that catalog; load it once and score it as often as needed
//! instead of re-reading every snack per lookup.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::SnackDb;
use crate::error::DatabaseError;
use crate::trigram::{Trigram, set_similarity, trigrams, within_one_edit};

#[derive(Debug, Clone)]
struct CorpusEntry {
    id: String,
    name: String,
    brand: Option<String>,
    name_grams: HashSet<Trigram>,
    brand_grams: HashSet<Trigram>,
}

/// Public `(id, name, brand)` rows with their trigrams precomputed.
#[derive(Debug, Clone, Default)]
pub struct FuzzyCorpus {
    entries: Vec<CorpusEntry>,
}

impl FuzzyCorpus {
    #[must_use]
    pub fn from_rows(rows: Vec<(String, String, Option<String>)>) -> Self {
        let entries = rows
            .into_iter()
            .map(|(id, name, brand)| CorpusEntry {
                name_grams: trigrams(&name),
                brand_grams: brand.as_deref().map(trigrams).unwrap_or_default(),
                id,
                name,
                brand,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ids whose name or brand scores at least `threshold` against `query`,
    /// best first (ties by id), at most `limit` of them.
    #[must_use]
    pub fn similar(&self, query: &str, limit: u32, threshold: f64) -> Vec<String> {
        let needle = trigrams(query);
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let score = set_similarity(&needle, &entry.name_grams)
                    .max(set_similarity(&needle, &entry.brand_grams));
                (score > 0.0 && score >= threshold).then_some((score, entry.id.as_str()))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });
        scored.truncate(limit as usize);
        scored.into_iter().map(|(_, id)| id.to_string()).collect()
    }

    /// Ids within one edit of `query` on the full name, the brand, or any
    /// whitespace-separated word of the name. Sorted by id.
    #[must_use]
    pub fn one_edit(&self, query: &str, limit: u32) -> Vec<String> {
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| {
                within_one_edit(query, &entry.name)
                    || entry
                        .brand
                        .as_deref()
                        .is_some_and(|b| within_one_edit(query, b))
                    || entry
                        .name
                        .split_whitespace()
                        .any(|word| within_one_edit(query, word))
            })
            .map(|entry| entry.id.clone())
            .collect();

        hits.sort();
        hits.truncate(limit as usize);
        hits
    }
}

impl SnackDb {
    /// Snapshot the public catalog for repeated fuzzy scoring.
    pub async fn fuzzy_corpus(&self) -> Result<FuzzyCorpus, DatabaseError> {
        let corpus = FuzzyCorpus::from_rows(self.public_search_texts().await?);
        tracing::debug!(snacks = corpus.len(), "loaded fuzzy corpus");
        Ok(corpus)
    }

    /// One-shot [`FuzzyCorpus::similar`] against a fresh snapshot.
    pub async fn similarity_search(
        &self,
        query: &str,
        limit: u32,
        threshold: f64,
    ) -> Result<Vec<String>, DatabaseError> {
        if query.trim().is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.fuzzy_corpus().await?.similar(query, limit, threshold))
    }

    /// One-shot [`FuzzyCorpus::one_edit`] against a fresh snapshot.
    pub async fn edit_distance_search(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<String>, DatabaseError> {
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }
        Ok(self.fuzzy_corpus().await?.one_edit(query, limit))
    }
}

#[cfg(test)]
mod tests {
    use crate::repos::catalog::NewSnack;
    use crate::test_support::helpers::test_db;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn similarity_ranks_best_match_first() {
        let db = test_db().await;
        let exact = db
            .create_snack(NewSnack::new("초코파이", "chocopie"))
            .await
            .unwrap();
        let close = db
            .create_snack(NewSnack::new("초코파이 바나나", "chocopie-banana"))
            .await
            .unwrap();
        db.create_snack(NewSnack::new("새우깡", "saewoo")).await.unwrap();

        let ids = db.similarity_search("초코파이", 10, 0.2).await.unwrap();
        assert_eq!(ids, vec![exact.id, close.id]);
    }

    #[tokio::test]
    async fn similarity_scores_brand_too() {
        let db = test_db().await;
        let snack = db
            .create_snack(NewSnack::new("Choco Pie", "choco-pie").brand("Orion"))
            .await
            .unwrap();
        let ids = db.similarity_search("orion", 10, 0.3).await.unwrap();
        assert_eq!(ids, vec![snack.id]);
    }

    #[tokio::test]
    async fn similarity_respects_threshold_limit_and_visibility() {
        let db = test_db().await;
        for i in 0..3 {
            db.create_snack(NewSnack::new("pocky", &format!("pocky-{i}")))
                .await
                .unwrap();
        }
        db.create_snack(NewSnack::new("pocky", "pocky-hidden").private())
            .await
            .unwrap();

        assert_eq!(db.similarity_search("pocky", 2, 0.3).await.unwrap().len(), 2);
        assert_eq!(db.similarity_search("pocky", 10, 0.3).await.unwrap().len(), 3);
        assert!(db.similarity_search("zzzz", 10, 0.1).await.unwrap().is_empty());
        assert!(db.similarity_search("", 10, 0.0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_distance_matches_name_words_and_brand() {
        let db = test_db().await;
        let word = db
            .create_snack(NewSnack::new("오리온 초코파이", "orion-chocopie"))
            .await
            .unwrap();
        let brand = db
            .create_snack(NewSnack::new("포카칩", "pocachip").brand("오리온"))
            .await
            .unwrap();
        db.create_snack(NewSnack::new("새우깡", "saewoo")).await.unwrap();

        let mut expected = vec![word.id, brand.id];
        expected.sort();
        assert_eq!(db.edit_distance_search("오리은", 10).await.unwrap(), expected);
    }

    #[tokio::test]
    async fn edit_distance_rejects_two_edits() {
        let db = test_db().await;
        db.create_snack(NewSnack::new("pocky", "pocky")).await.unwrap();
        assert!(db.edit_distance_search("pecki", 10).await.unwrap().is_empty());
        assert_eq!(db.edit_distance_search("POCKI", 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn corpus_snapshot_matches_one_shot_searches() {
        let db = test_db().await;
        db.create_snack(NewSnack::new("초코파이", "chocopie").brand("오리온"))
            .await
            .unwrap();
        db.create_snack(NewSnack::new("pocky", "pocky")).await.unwrap();
        db.create_snack(NewSnack::new("hidden", "hidden").private())
            .await
            .unwrap();

        let corpus = db.fuzzy_corpus().await.unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(
            corpus.similar("초코파이", 10, 0.2),
            db.similarity_search("초코파이", 10, 0.2).await.unwrap()
        );
        assert_eq!(
            corpus.one_edit("pocki", 10),
            db.edit_distance_search("pocki", 10).await.unwrap()
        );
        assert!(corpus.one_edit("hiddem", 10).is_empty());
    }
}
