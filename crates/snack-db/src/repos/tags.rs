//! Tag master lookups and snack↔tag membership queries.
//!
//! Every id-returning query here is restricted to public snacks.

use std::collections::{BTreeMap, BTreeSet};

use snack_core::entities::{SnackFlavor, SnackKeyword, SnackType};
use snack_core::enums::TagDimension;

use crate::SnackDb;
use crate::error::DatabaseError;
use crate::helpers::{
    MAX_IN_LIST, contains_pattern, dimension_filter, dimension_table, placeholders, text_params,
};

/// Flavor and keyword names for a batch of snacks, keyed by snack id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagNames {
    pub flavors: BTreeMap<String, Vec<String>>,
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl SnackDb {
    pub async fn find_type_by_name(&self, name: &str) -> Result<Option<SnackType>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT id, name FROM snack_types WHERE name = ?1", [name])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(SnackType {
                id: row.get::<String>(0)?,
                name: row.get::<String>(1)?,
            })),
            None => Ok(None),
        }
    }

    pub async fn find_flavor_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SnackFlavor>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT id, name FROM snack_flavors WHERE name = ?1", [name])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(SnackFlavor {
                id: row.get::<String>(0)?,
                name: row.get::<String>(1)?,
            })),
            None => Ok(None),
        }
    }

    /// Exact keyword lookup. Inactive keywords are never returned.
    pub async fn find_keyword_by_name(
        &self,
        name: &str,
    ) -> Result<Option<SnackKeyword>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, name, is_active FROM snack_keywords WHERE name = ?1 AND is_active = 1",
                [name],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(SnackKeyword {
                id: row.get::<String>(0)?,
                name: row.get::<String>(1)?,
                is_active: row.get::<i64>(2)? != 0,
            })),
            None => Ok(None),
        }
    }

    /// Which of `names` exist verbatim in the given dimension's master table.
    ///
    /// One batched `IN (...)` query per dimension (chunked for very long lists).
    pub async fn existing_tag_names(
        &self,
        dimension: TagDimension,
        names: &[String],
    ) -> Result<BTreeSet<String>, DatabaseError> {
        let unique: Vec<String> = names
            .iter()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();

        let mut found = BTreeSet::new();
        for chunk in unique.chunks(MAX_IN_LIST) {
            let sql = format!(
                "SELECT name FROM {} WHERE name IN ({}) {}",
                dimension_table(dimension),
                placeholders(1, chunk.len()),
                dimension_filter(dimension),
            );
            found.extend(self.query_ids(&sql, text_params(chunk)).await?);
        }
        Ok(found)
    }

    pub async fn public_ids_by_type(&self, type_id: &str) -> Result<Vec<String>, DatabaseError> {
        self.query_ids(
            "SELECT id FROM snacks WHERE is_public = 1 AND type_id = ?1",
            vec![type_id.into()],
        )
        .await
    }

    pub async fn public_ids_by_flavor(
        &self,
        flavor_id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        self.query_ids(
            "SELECT s.id FROM snack_flavors_map m
             JOIN snacks s ON s.id = m.snack_id
             WHERE m.flavor_id = ?1 AND s.is_public = 1",
            vec![flavor_id.into()],
        )
        .await
    }

    pub async fn public_ids_by_keyword(
        &self,
        keyword_id: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        self.query_ids(
            "SELECT s.id FROM snack_keywords_map m
             JOIN snacks s ON s.id = m.snack_id
             WHERE m.keyword_id = ?1 AND s.is_public = 1",
            vec![keyword_id.into()],
        )
        .await
    }

    /// Public snacks mapped to any flavor whose name contains `needle`.
    pub async fn public_ids_by_flavor_name_like(
        &self,
        needle: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        self.query_ids(
            r"SELECT DISTINCT s.id FROM snack_flavors f
              JOIN snack_flavors_map m ON m.flavor_id = f.id
              JOIN snacks s ON s.id = m.snack_id
              WHERE f.name LIKE ?1 ESCAPE '\' AND s.is_public = 1",
            vec![contains_pattern(needle).into()],
        )
        .await
    }

    /// Public snacks mapped to any active keyword whose name contains `needle`.
    pub async fn public_ids_by_keyword_name_like(
        &self,
        needle: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        self.query_ids(
            r"SELECT DISTINCT s.id FROM snack_keywords k
              JOIN snack_keywords_map m ON m.keyword_id = k.id
              JOIN snacks s ON s.id = m.snack_id
              WHERE k.name LIKE ?1 ESCAPE '\' AND k.is_active = 1 AND s.is_public = 1",
            vec![contains_pattern(needle).into()],
        )
        .await
    }

    /// Flavor and active keyword names for each of `snack_ids`, sorted by name.
    pub async fn tag_names_for(&self, snack_ids: &[String]) -> Result<TagNames, DatabaseError> {
        let mut names = TagNames::default();
        for chunk in snack_ids.chunks(MAX_IN_LIST) {
            let list = placeholders(1, chunk.len());

            let flavor_sql = format!(
                "SELECT m.snack_id, f.name FROM snack_flavors_map m
                 JOIN snack_flavors f ON f.id = m.flavor_id
                 WHERE m.snack_id IN ({list}) ORDER BY f.name"
            );
            let mut rows = self
                .conn()
                .query(&flavor_sql, libsql::params_from_iter(text_params(chunk)))
                .await?;
            while let Some(row) = rows.next().await? {
                names
                    .flavors
                    .entry(row.get::<String>(0)?)
                    .or_default()
                    .push(row.get::<String>(1)?);
            }

            let keyword_sql = format!(
                "SELECT m.snack_id, k.name FROM snack_keywords_map m
                 JOIN snack_keywords k ON k.id = m.keyword_id
                 WHERE m.snack_id IN ({list}) AND k.is_active = 1 ORDER BY k.name"
            );
            let mut rows = self
                .conn()
                .query(&keyword_sql, libsql::params_from_iter(text_params(chunk)))
                .await?;
            while let Some(row) = rows.next().await? {
                names
                    .keywords
                    .entry(row.get::<String>(0)?)
                    .or_default()
                    .push(row.get::<String>(1)?);
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::catalog::NewSnack;
    use crate::test_support::helpers::test_db;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn exact_lookup_is_exact() {
        let db = test_db().await;
        db.create_flavor("초코칩").await.unwrap();

        assert!(db.find_flavor_by_name("초코칩").await.unwrap().is_some());
        assert!(db.find_flavor_by_name("초코").await.unwrap().is_none());
        assert!(db.find_flavor_by_name("초코칩쿠키").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn inactive_keyword_is_invisible() {
        let db = test_db().await;
        db.create_keyword("단종", false).await.unwrap();
        db.create_keyword("신상", true).await.unwrap();

        assert!(db.find_keyword_by_name("단종").await.unwrap().is_none());
        assert!(db.find_keyword_by_name("신상").await.unwrap().is_some());

        let names = vec!["단종".to_string(), "신상".to_string()];
        let found = db
            .existing_tag_names(TagDimension::Keyword, &names)
            .await
            .unwrap();
        assert_eq!(found, BTreeSet::from(["신상".to_string()]));
    }

    #[tokio::test]
    async fn existing_tag_names_batches_and_dedups() {
        let db = test_db().await;
        db.create_type("젤리").await.unwrap();
        db.create_type("쿠키").await.unwrap();

        let names = vec![
            "젤리".to_string(),
            "젤리".to_string(),
            "오레오".to_string(),
            "쿠키".to_string(),
        ];
        let found = db
            .existing_tag_names(TagDimension::Type, &names)
            .await
            .unwrap();
        assert_eq!(
            found,
            BTreeSet::from(["젤리".to_string(), "쿠키".to_string()])
        );

        let empty = db.existing_tag_names(TagDimension::Flavor, &[]).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn mapped_ids_exclude_private_snacks() {
        let db = test_db().await;
        let kind = db.create_type("젤리").await.unwrap();
        let flavor = db.create_flavor("포도").await.unwrap();
        let public = db
            .create_snack(NewSnack::new("포도젤리", "grape-jelly").type_id(&kind.id))
            .await
            .unwrap();
        let hidden = db
            .create_snack(
                NewSnack::new("비밀젤리", "secret-jelly")
                    .type_id(&kind.id)
                    .private(),
            )
            .await
            .unwrap();
        db.attach_flavor(&public.id, &flavor.id).await.unwrap();
        db.attach_flavor(&hidden.id, &flavor.id).await.unwrap();

        assert_eq!(
            db.public_ids_by_type(&kind.id).await.unwrap(),
            vec![public.id.clone()]
        );
        assert_eq!(
            db.public_ids_by_flavor(&flavor.id).await.unwrap(),
            vec![public.id.clone()]
        );
        assert_eq!(
            db.public_ids_by_flavor_name_like("포").await.unwrap(),
            vec![public.id]
        );
    }

    #[tokio::test]
    async fn tag_names_grouped_by_snack() {
        let db = test_db().await;
        let snack = db.create_snack(NewSnack::new("칩", "chip")).await.unwrap();
        let salty = db.create_flavor("짠맛").await.unwrap();
        let sweet = db.create_flavor("단맛").await.unwrap();
        let retired = db.create_keyword("단종", false).await.unwrap();
        let fresh = db.create_keyword("신상", true).await.unwrap();
        for flavor in [&salty, &sweet] {
            db.attach_flavor(&snack.id, &flavor.id).await.unwrap();
        }
        for keyword in [&retired, &fresh] {
            db.attach_keyword(&snack.id, &keyword.id).await.unwrap();
        }

        let names = db.tag_names_for(&[snack.id.clone()]).await.unwrap();
        assert_eq!(
            names.flavors.get(&snack.id).cloned(),
            Some(vec!["단맛".to_string(), "짠맛".to_string()])
        );
        assert_eq!(
            names.keywords.get(&snack.id).cloned(),
            Some(vec!["신상".to_string()])
        );
    }
}
