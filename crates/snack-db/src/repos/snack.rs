//! Snack reads: substring matching, browse paging, recency ordering, and
//! page hydration.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use snack_core::entities::SnackCard;

use crate::SnackDb;
use crate::error::DatabaseError;
use crate::helpers::{
    MAX_IN_LIST, contains_pattern, get_count, get_opt_string, parse_datetime, placeholders,
    text_params,
};

const CARD_SELECT: &str = "SELECT s.id, s.name, s.brand, s.slug, s.image_path, t.name, s.created_at
     FROM snacks s LEFT JOIN snack_types t ON t.id = s.type_id";

fn row_to_card(row: &libsql::Row) -> Result<SnackCard, DatabaseError> {
    Ok(SnackCard {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        brand: get_opt_string(row, 2)?,
        slug: row.get::<String>(3)?,
        image_path: get_opt_string(row, 4)?,
        type_name: get_opt_string(row, 5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        flavors: Vec::new(),
        keywords: Vec::new(),
    })
}

impl SnackDb {
    /// Public snacks whose name, brand, or slug contains `needle`.
    ///
    /// `LIKE` folds ASCII case only; other scripts compare exactly.
    pub async fn public_ids_matching(&self, needle: &str) -> Result<Vec<String>, DatabaseError> {
        self.query_ids(
            r"SELECT id FROM snacks
              WHERE is_public = 1
                AND (name LIKE ?1 ESCAPE '\'
                     OR brand LIKE ?1 ESCAPE '\'
                     OR slug LIKE ?1 ESCAPE '\')",
            vec![contains_pattern(needle).into()],
        )
        .await
    }

    /// All public `(id, name, brand)` triples, for in-process fuzzy scoring.
    pub async fn public_search_texts(
        &self,
    ) -> Result<Vec<(String, String, Option<String>)>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT id, name, brand FROM snacks WHERE is_public = 1", ())
            .await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push((
                row.get::<String>(0)?,
                row.get::<String>(1)?,
                get_opt_string(&row, 2)?,
            ));
        }
        Ok(out)
    }

    /// One page of public snacks, newest first, plus the total public count.
    pub async fn count_and_page(
        &self,
        offset: u64,
        limit: u32,
    ) -> Result<(Vec<SnackCard>, u64), DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT COUNT(*) FROM snacks WHERE is_public = 1", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let total = get_count(&row, 0)?;

        let offset = i64::try_from(offset)
            .map_err(|_| DatabaseError::InvalidState(format!("offset {offset} out of range")))?;
        let sql = format!(
            "{CARD_SELECT} WHERE s.is_public = 1 ORDER BY s.created_at DESC, s.id ASC LIMIT ?1 OFFSET ?2"
        );
        let mut rows = self
            .conn()
            .query(&sql, libsql::params![i64::from(limit), offset])
            .await?;
        let mut cards = Vec::new();
        while let Some(row) = rows.next().await? {
            cards.push(row_to_card(&row)?);
        }
        Ok((cards, total))
    }

    /// Reorder `ids` newest first (ties broken by id). Unknown ids are dropped.
    pub async fn order_by_recency(&self, ids: &[String]) -> Result<Vec<String>, DatabaseError> {
        let mut stamped: Vec<(DateTime<Utc>, String)> = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT id, created_at FROM snacks WHERE id IN ({})",
                placeholders(1, chunk.len())
            );
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(text_params(chunk)))
                .await?;
            while let Some(row) = rows.next().await? {
                let created_at = parse_datetime(&row.get::<String>(1)?)?;
                stamped.push((created_at, row.get::<String>(0)?));
            }
        }
        stamped.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        Ok(stamped.into_iter().map(|(_, id)| id).collect())
    }

    /// Display rows for `ids`, returned in the same order. Unknown ids are skipped.
    ///
    /// Tag name lists are left empty; see [`SnackDb::tag_names_for`].
    pub async fn load_cards(&self, ids: &[String]) -> Result<Vec<SnackCard>, DatabaseError> {
        let mut by_id: HashMap<String, SnackCard> = HashMap::with_capacity(ids.len());
        for chunk in ids.chunks(MAX_IN_LIST) {
            let sql = format!(
                "{CARD_SELECT} WHERE s.id IN ({})",
                placeholders(1, chunk.len())
            );
            let mut rows = self
                .conn()
                .query(&sql, libsql::params_from_iter(text_params(chunk)))
                .await?;
            while let Some(row) = rows.next().await? {
                let card = row_to_card(&row)?;
                by_id.insert(card.id.clone(), card);
            }
        }
        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }
}
