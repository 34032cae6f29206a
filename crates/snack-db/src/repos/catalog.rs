//! Catalog writes: tag masters, snacks, and their tag mappings.
//!
//! Only the inserts needed to seed a catalog live here; editing and deleting
//! catalog rows is done elsewhere.

use chrono::{DateTime, Utc};

use snack_core::entities::{Snack, SnackFlavor, SnackKeyword, SnackType};
use snack_core::ids::{PREFIX_FLAVOR, PREFIX_KEYWORD, PREFIX_SNACK, PREFIX_TYPE};

use crate::SnackDb;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};

/// Input for [`SnackDb::create_snack`].
#[derive(Debug, Clone)]
pub struct NewSnack {
    pub name: String,
    pub brand: Option<String>,
    pub slug: String,
    pub image_path: Option<String>,
    pub is_public: bool,
    pub type_id: Option<String>,
    /// Defaults to now. Set explicitly to control browse ordering.
    pub created_at: Option<DateTime<Utc>>,
}

impl NewSnack {
    /// A public, untyped snack with no brand or image.
    #[must_use]
    pub fn new(name: &str, slug: &str) -> Self {
        Self {
            name: name.to_string(),
            brand: None,
            slug: slug.to_string(),
            image_path: None,
            is_public: true,
            type_id: None,
            created_at: None,
        }
    }

    #[must_use]
    pub fn brand(mut self, brand: &str) -> Self {
        self.brand = Some(brand.to_string());
        self
    }

    #[must_use]
    pub fn image_path(mut self, path: &str) -> Self {
        self.image_path = Some(path.to_string());
        self
    }

    #[must_use]
    pub fn type_id(mut self, type_id: &str) -> Self {
        self.type_id = Some(type_id.to_string());
        self
    }

    #[must_use]
    pub const fn private(mut self) -> Self {
        self.is_public = false;
        self
    }

    #[must_use]
    pub const fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

pub(crate) const SNACK_COLUMNS: &str =
    "id, name, brand, slug, image_path, is_public, type_id, created_at";

pub(crate) fn row_to_snack(row: &libsql::Row) -> Result<Snack, DatabaseError> {
    Ok(Snack {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        brand: get_opt_string(row, 2)?,
        slug: row.get::<String>(3)?,
        image_path: get_opt_string(row, 4)?,
        is_public: row.get::<i64>(5)? != 0,
        type_id: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl SnackDb {
    pub async fn create_type(&self, name: &str) -> Result<SnackType, DatabaseError> {
        let id = self.generate_id(PREFIX_TYPE).await?;
        self.conn()
            .execute(
                "INSERT INTO snack_types (id, name) VALUES (?1, ?2)",
                libsql::params![id.as_str(), name],
            )
            .await?;
        Ok(SnackType {
            id,
            name: name.to_string(),
        })
    }

    pub async fn create_flavor(&self, name: &str) -> Result<SnackFlavor, DatabaseError> {
        let id = self.generate_id(PREFIX_FLAVOR).await?;
        self.conn()
            .execute(
                "INSERT INTO snack_flavors (id, name) VALUES (?1, ?2)",
                libsql::params![id.as_str(), name],
            )
            .await?;
        Ok(SnackFlavor {
            id,
            name: name.to_string(),
        })
    }

    pub async fn create_keyword(
        &self,
        name: &str,
        is_active: bool,
    ) -> Result<SnackKeyword, DatabaseError> {
        let id = self.generate_id(PREFIX_KEYWORD).await?;
        self.conn()
            .execute(
                "INSERT INTO snack_keywords (id, name, is_active) VALUES (?1, ?2, ?3)",
                libsql::params![id.as_str(), name, i64::from(is_active)],
            )
            .await?;
        Ok(SnackKeyword {
            id,
            name: name.to_string(),
            is_active,
        })
    }

    pub async fn create_snack(&self, new: NewSnack) -> Result<Snack, DatabaseError> {
        let id = self.generate_id(PREFIX_SNACK).await?;
        let created_at = new.created_at.unwrap_or_else(Utc::now);

        self.conn()
            .execute(
                "INSERT INTO snacks (id, name, brand, slug, image_path, is_public, type_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.brand.as_deref(),
                    new.slug.as_str(),
                    new.image_path.as_deref(),
                    i64::from(new.is_public),
                    new.type_id.as_deref(),
                    created_at.to_rfc3339()
                ],
            )
            .await?;

        Ok(Snack {
            id,
            name: new.name,
            brand: new.brand,
            slug: new.slug,
            image_path: new.image_path,
            is_public: new.is_public,
            type_id: new.type_id,
            created_at,
        })
    }

    pub async fn get_snack(&self, id: &str) -> Result<Snack, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SNACK_COLUMNS} FROM snacks WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_snack(&row)
    }

    /// Map a snack to a flavor. Re-attaching an existing pair is a no-op.
    pub async fn attach_flavor(&self, snack_id: &str, flavor_id: &str) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO snack_flavors_map (snack_id, flavor_id) VALUES (?1, ?2)",
                libsql::params![snack_id, flavor_id],
            )
            .await?;
        Ok(())
    }

    /// Map a snack to a keyword. Re-attaching an existing pair is a no-op.
    pub async fn attach_keyword(
        &self,
        snack_id: &str,
        keyword_id: &str,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT OR IGNORE INTO snack_keywords_map (snack_id, keyword_id) VALUES (?1, ?2)",
                libsql::params![snack_id, keyword_id],
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::test_db;
    use chrono::TimeZone;

    #[tokio::test]
    async fn create_snack_roundtrip() {
        let db = test_db().await;
        let kind = db.create_type("과자").await.unwrap();
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();

        let snack = db
            .create_snack(
                NewSnack::new("새우깡", "saewookkang")
                    .brand("농심")
                    .image_path("snacks/saewookkang.png")
                    .type_id(&kind.id)
                    .created_at(at),
            )
            .await
            .unwrap();

        assert!(snack.id.starts_with("snk-"));
        let fetched = db.get_snack(&snack.id).await.unwrap();
        assert_eq!(fetched, snack);
        assert_eq!(fetched.created_at, at);
    }

    #[tokio::test]
    async fn private_snack_flag_persists() {
        let db = test_db().await;
        let snack = db
            .create_snack(NewSnack::new("비공개", "hidden").private())
            .await
            .unwrap();
        assert!(!db.get_snack(&snack.id).await.unwrap().is_public);
    }

    #[tokio::test]
    async fn duplicate_slug_rejected() {
        let db = test_db().await;
        db.create_snack(NewSnack::new("A", "same")).await.unwrap();
        let dup = db.create_snack(NewSnack::new("B", "same")).await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn get_missing_snack_is_no_result() {
        let db = test_db().await;
        let result = db.get_snack("snk-missing").await;
        assert!(matches!(result, Err(DatabaseError::NoResult)));
    }

    #[tokio::test]
    async fn attach_is_idempotent() {
        let db = test_db().await;
        let snack = db.create_snack(NewSnack::new("칩", "chip")).await.unwrap();
        let flavor = db.create_flavor("짠맛").await.unwrap();
        db.attach_flavor(&snack.id, &flavor.id).await.unwrap();
        db.attach_flavor(&snack.id, &flavor.id).await.unwrap();

        let ids = db.public_ids_by_flavor(&flavor.id).await.unwrap();
        assert_eq!(ids, vec![snack.id]);
    }
}
