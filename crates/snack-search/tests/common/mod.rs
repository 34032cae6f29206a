//! Catalog builder shared by the search integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};

use snack_db::SnackDb;
use snack_db::repos::catalog::NewSnack;

/// In-memory catalog whose snacks get strictly increasing `created_at`, so
/// the most recently added snack is always first in browse order.
pub struct Catalog {
    pub db: SnackDb,
    added: u32,
}

impl Catalog {
    pub async fn new() -> Self {
        Self {
            db: SnackDb::open_local(":memory:").await.unwrap(),
            added: 0,
        }
    }

    fn next_stamp(&mut self) -> (String, DateTime<Utc>) {
        self.added += 1;
        let base = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        (
            format!("s{:04}", self.added),
            base + Duration::minutes(i64::from(self.added)),
        )
    }

    /// Add a public snack and return its id.
    pub async fn snack(&mut self, name: &str) -> String {
        self.add(name, |n| n).await
    }

    pub async fn private_snack(&mut self, name: &str) -> String {
        self.add(name, NewSnack::private).await
    }

    /// Add a snack, letting the caller adjust it before insert.
    pub async fn add(&mut self, name: &str, customize: impl FnOnce(NewSnack) -> NewSnack) -> String {
        let (slug, at) = self.next_stamp();
        let new = customize(NewSnack::new(name, &slug).created_at(at));
        self.db.create_snack(new).await.unwrap().id
    }

    pub async fn flavor_on(&self, flavor: &str, snack_ids: &[&String]) -> String {
        let id = match self.db.find_flavor_by_name(flavor).await.unwrap() {
            Some(existing) => existing.id,
            None => self.db.create_flavor(flavor).await.unwrap().id,
        };
        for snack_id in snack_ids {
            self.db.attach_flavor(snack_id, &id).await.unwrap();
        }
        id
    }

    pub async fn keyword_on(&self, keyword: &str, snack_ids: &[&String]) -> String {
        let id = self.db.create_keyword(keyword, true).await.unwrap().id;
        for snack_id in snack_ids {
            self.db.attach_keyword(snack_id, &id).await.unwrap();
        }
        id
    }

    pub async fn kind(&self, name: &str) -> String {
        self.db.create_type(name).await.unwrap().id
    }
}

pub fn sorted(mut ids: Vec<String>) -> Vec<String> {
    ids.sort();
    ids
}
