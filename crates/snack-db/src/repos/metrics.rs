//! Likes, reviews, and view counters, plus the batched aggregate reads that
//! back search result metrics.

use std::collections::{BTreeMap, BTreeSet};

use snack_core::entities::{ReviewScores, ScoreAverages};
use snack_core::ids::PREFIX_REVIEW;

use crate::SnackDb;
use crate::error::DatabaseError;
use crate::helpers::{MAX_IN_LIST, get_count, placeholders, text_params};

impl SnackDb {
    /// Record that `user_id` likes `snack_id`. Liking twice is a no-op.
    pub async fn add_like(&self, snack_id: &str, user_id: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO snack_likes (snack_id, user_id) VALUES (?1, ?2)",
                libsql::params![snack_id, user_id],
            )
            .await?;
        Ok(())
    }

    /// Store a review and return its id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if any score is outside `1..=5`.
    pub async fn add_review(
        &self,
        snack_id: &str,
        user_id: &str,
        scores: ReviewScores,
        body: Option<&str>,
    ) -> Result<String, DatabaseError> {
        scores
            .validate()
            .map_err(|e| DatabaseError::InvalidState(e.to_string()))?;
        let id = self.generate_id(PREFIX_REVIEW).await?;
        self.conn()
            .execute(
                "INSERT INTO snack_reviews
                   (id, snack_id, user_id, taste, texture, value, quantity, repurchase, body)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    snack_id,
                    user_id,
                    i64::from(scores.taste),
                    i64::from(scores.texture),
                    i64::from(scores.value),
                    i64::from(scores.quantity),
                    i64::from(scores.repurchase),
                    body
                ],
            )
            .await?;
        Ok(id)
    }

    /// Bump the view counter for a snack.
    pub async fn record_view(&self, snack_id: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO snack_stats (snack_id, view_count) VALUES (?1, 1)
                 ON CONFLICT(snack_id) DO UPDATE SET view_count = view_count + 1",
                [snack_id],
            )
            .await?;
        Ok(())
    }

    /// Like totals per snack. Snacks without likes are absent.
    pub async fn like_counts(&self, ids: &[String]) -> Result<BTreeMap<String, u64>, DatabaseError> {
        self.grouped_counts(
            "SELECT snack_id, COUNT(*) FROM snack_likes WHERE snack_id IN ({list}) GROUP BY snack_id",
            ids,
        )
        .await
    }

    /// Which of `ids` the given user has liked.
    pub async fn liked_by(
        &self,
        user_id: &str,
        ids: &[String],
    ) -> Result<BTreeSet<String>, DatabaseError> {
        let mut liked = BTreeSet::new();
        for chunk in ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT snack_id FROM snack_likes WHERE user_id = ?1 AND snack_id IN ({})",
                placeholders(2, chunk.len())
            );
            let mut params: Vec<libsql::Value> = vec![user_id.into()];
            params.extend(text_params(chunk));
            liked.extend(self.query_ids(&sql, params).await?);
        }
        Ok(liked)
    }

    /// Mean score per axis for each reviewed snack, with `overall` as the mean
    /// of the five axis means.
    pub async fn score_averages(
        &self,
        ids: &[String],
    ) -> Result<BTreeMap<String, ScoreAverages>, DatabaseError> {
        let mut out = BTreeMap::new();
        for chunk in ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT snack_id, AVG(taste), AVG(texture), AVG(value), AVG(quantity),
                        AVG(repurchase), COUNT(*)
                 FROM snack_reviews WHERE snack_id IN ({})
                 GROUP BY snack_id",
                placeholders(1, chunk.len())
            );
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(text_params(chunk)))
                .await?;
            while let Some(row) = rows.next().await? {
                let taste = row.get::<f64>(1)?;
                let texture = row.get::<f64>(2)?;
                let value = row.get::<f64>(3)?;
                let quantity = row.get::<f64>(4)?;
                let repurchase = row.get::<f64>(5)?;
                out.insert(
                    row.get::<String>(0)?,
                    ScoreAverages {
                        taste,
                        texture,
                        value,
                        quantity,
                        repurchase,
                        overall: (taste + texture + value + quantity + repurchase) / 5.0,
                        review_count: get_count(&row, 6)?,
                    },
                );
            }
        }
        Ok(out)
    }

    /// Reviews with a non-empty body, per snack.
    pub async fn written_review_counts(
        &self,
        ids: &[String],
    ) -> Result<BTreeMap<String, u64>, DatabaseError> {
        self.grouped_counts(
            "SELECT snack_id, COUNT(*) FROM snack_reviews
             WHERE snack_id IN ({list}) AND body IS NOT NULL AND trim(body) <> ''
             GROUP BY snack_id",
            ids,
        )
        .await
    }

    /// View counters per snack. Never-viewed snacks are absent.
    pub async fn view_counts(&self, ids: &[String]) -> Result<BTreeMap<String, u64>, DatabaseError> {
        self.grouped_counts(
            "SELECT snack_id, view_count FROM snack_stats WHERE snack_id IN ({list})",
            ids,
        )
        .await
    }

    /// Run a `(snack_id, count)` query over `ids`, substituting `{list}` with
    /// the placeholder list for each chunk.
    async fn grouped_counts(
        &self,
        template: &str,
        ids: &[String],
    ) -> Result<BTreeMap<String, u64>, DatabaseError> {
        let mut out = BTreeMap::new();
        for chunk in ids.chunks(MAX_IN_LIST) {
            let sql = template.replace("{list}", &placeholders(1, chunk.len()));
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(text_params(chunk)))
                .await?;
            while let Some(row) = rows.next().await? {
                out.insert(row.get::<String>(0)?, get_count(&row, 1)?);
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::catalog::NewSnack;
    use crate::test_support::helpers::test_db;
    use pretty_assertions::assert_eq;

    fn scores(all: u8) -> ReviewScores {
        ReviewScores::new(all, all, all, all, all).unwrap()
    }

    #[tokio::test]
    async fn likes_are_counted_once_per_user() {
        let db = test_db().await;
        let a = db.create_snack(NewSnack::new("A", "a")).await.unwrap();
        let b = db.create_snack(NewSnack::new("B", "b")).await.unwrap();
        db.add_like(&a.id, "u1").await.unwrap();
        db.add_like(&a.id, "u1").await.unwrap();
        db.add_like(&a.id, "u2").await.unwrap();

        let ids = vec![a.id.clone(), b.id.clone()];
        let counts = db.like_counts(&ids).await.unwrap();
        assert_eq!(counts, BTreeMap::from([(a.id.clone(), 2)]));

        let liked = db.liked_by("u2", &ids).await.unwrap();
        assert_eq!(liked, BTreeSet::from([a.id]));
        assert!(db.liked_by("u3", &ids).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn averages_and_overall() {
        let db = test_db().await;
        let snack = db.create_snack(NewSnack::new("A", "a")).await.unwrap();
        db.add_review(&snack.id, "u1", ReviewScores::new(5, 4, 3, 2, 1).unwrap(), None)
            .await
            .unwrap();
        db.add_review(&snack.id, "u2", ReviewScores::new(3, 4, 5, 2, 1).unwrap(), None)
            .await
            .unwrap();

        let averages = db.score_averages(&[snack.id.clone()]).await.unwrap();
        let avg = averages[&snack.id];
        assert!((avg.taste - 4.0).abs() < 1e-9);
        assert!((avg.texture - 4.0).abs() < 1e-9);
        assert!((avg.value - 4.0).abs() < 1e-9);
        assert!((avg.quantity - 2.0).abs() < 1e-9);
        assert!((avg.repurchase - 1.0).abs() < 1e-9);
        assert!((avg.overall - 3.0).abs() < 1e-9);
        assert_eq!(avg.review_count, 2);
    }

    #[tokio::test]
    async fn written_reviews_ignore_blank_bodies() {
        let db = test_db().await;
        let snack = db.create_snack(NewSnack::new("A", "a")).await.unwrap();
        db.add_review(&snack.id, "u1", scores(3), Some("바삭하고 달아요"))
            .await
            .unwrap();
        db.add_review(&snack.id, "u2", scores(4), Some("   "))
            .await
            .unwrap();
        db.add_review(&snack.id, "u3", scores(5), None).await.unwrap();

        let counts = db.written_review_counts(&[snack.id.clone()]).await.unwrap();
        assert_eq!(counts.get(&snack.id).copied(), Some(1));
    }

    #[tokio::test]
    async fn invalid_scores_are_rejected_before_insert() {
        let db = test_db().await;
        let snack = db.create_snack(NewSnack::new("A", "a")).await.unwrap();
        let bad = ReviewScores {
            taste: 0,
            texture: 3,
            value: 3,
            quantity: 3,
            repurchase: 3,
        };
        let result = db.add_review(&snack.id, "u1", bad, None).await;
        assert!(matches!(result, Err(DatabaseError::InvalidState(_))));
    }

    #[tokio::test]
    async fn views_accumulate() {
        let db = test_db().await;
        let snack = db.create_snack(NewSnack::new("A", "a")).await.unwrap();
        for _ in 0..3 {
            db.record_view(&snack.id).await.unwrap();
        }
        let views = db.view_counts(&[snack.id.clone()]).await.unwrap();
        assert_eq!(views.get(&snack.id).copied(), Some(3));
    }

    #[tokio::test]
    async fn empty_id_list_reads_nothing() {
        let db = test_db().await;
        assert!(db.like_counts(&[]).await.unwrap().is_empty());
        assert!(db.score_averages(&[]).await.unwrap().is_empty());
    }
}
