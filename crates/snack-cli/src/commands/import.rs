//! `snackbox import`: seed a catalog from a JSON document.
//!
//! ```json
//! {
//!   "types": ["과자"],
//!   "flavors": ["초코"],
//!   "keywords": ["바삭", { "name": "단종", "active": false }],
//!   "snacks": [
//!     { "name": "초코칩쿠키", "brand": "오리온", "slug": "choco-chip",
//!       "type": "과자", "flavors": ["초코"], "keywords": ["바삭"] }
//!   ]
//! }
//! ```
//!
//! Tag names on snacks are resolved when the snack is inserted; a name that
//! was neither declared nor already in the database is created on the spot.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use snack_core::responses::ImportSummary;
use snack_db::SnackDb;
use snack_db::repos::catalog::NewSnack;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<KeywordEntry>,
    #[serde(default)]
    pub snacks: Vec<SnackEntry>,
}

/// A bare keyword name is active.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KeywordEntry {
    Name(String),
    Detailed {
        name: String,
        #[serde(default = "default_true")]
        active: bool,
    },
}

impl KeywordEntry {
    fn parts(&self) -> (&str, bool) {
        match self {
            Self::Name(name) => (name.as_str(), true),
            Self::Detailed { name, active } => (name.as_str(), *active),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SnackEntry {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

const fn default_true() -> bool {
    true
}

/// Handle `snackbox import`.
pub async fn handle(args: &ImportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = read_catalog(&args.path)?;
    let summary = import_catalog(&ctx.db, &catalog).await?;
    tracing::info!(
        snacks = summary.snacks,
        path = %args.path.display(),
        "catalog imported"
    );
    output(&summary, flags.format)
}

fn read_catalog(path: &Path) -> anyhow::Result<CatalogFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog at {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse catalog at {}", path.display()))
}

/// Name -> id caches so each tag is looked up or created once per import.
#[derive(Default)]
struct TagIds {
    types: HashMap<String, String>,
    flavors: HashMap<String, String>,
    keywords: HashMap<String, String>,
}

/// Insert everything in `catalog`. Counts in the summary are rows created.
pub async fn import_catalog(db: &SnackDb, catalog: &CatalogFile) -> anyhow::Result<ImportSummary> {
    let mut ids = TagIds::default();
    let mut summary = ImportSummary::default();

    for name in &catalog.types {
        type_id(db, &mut ids, &mut summary, name).await?;
    }
    for name in &catalog.flavors {
        flavor_id(db, &mut ids, &mut summary, name).await?;
    }
    for entry in &catalog.keywords {
        let (name, active) = entry.parts();
        keyword_id(db, &mut ids, &mut summary, name, active).await?;
    }

    for entry in &catalog.snacks {
        let mut new = NewSnack::new(&entry.name, &entry.slug);
        new.brand.clone_from(&entry.brand);
        new.image_path.clone_from(&entry.image_path);
        new.is_public = entry.is_public;
        new.created_at = entry.created_at;
        if let Some(type_name) = &entry.type_name {
            new.type_id = Some(type_id(db, &mut ids, &mut summary, type_name).await?);
        }

        let snack = db
            .create_snack(new)
            .await
            .with_context(|| format!("failed to insert snack '{}'", entry.slug))?;
        summary.snacks += 1;

        for name in &entry.flavors {
            let flavor = flavor_id(db, &mut ids, &mut summary, name).await?;
            db.attach_flavor(&snack.id, &flavor).await?;
        }
        for name in &entry.keywords {
            let keyword = keyword_id(db, &mut ids, &mut summary, name, true).await?;
            db.attach_keyword(&snack.id, &keyword).await?;
        }
    }

    Ok(summary)
}

async fn type_id(
    db: &SnackDb,
    ids: &mut TagIds,
    summary: &mut ImportSummary,
    name: &str,
) -> anyhow::Result<String> {
    if let Some(id) = ids.types.get(name) {
        return Ok(id.clone());
    }
    let id = match db.find_type_by_name(name).await? {
        Some(existing) => existing.id,
        None => {
            summary.types += 1;
            db.create_type(name)
                .await
                .with_context(|| format!("failed to create type '{name}'"))?
                .id
        }
    };
    ids.types.insert(name.to_string(), id.clone());
    Ok(id)
}

async fn flavor_id(
    db: &SnackDb,
    ids: &mut TagIds,
    summary: &mut ImportSummary,
    name: &str,
) -> anyhow::Result<String> {
    if let Some(id) = ids.flavors.get(name) {
        return Ok(id.clone());
    }
    let id = match db.find_flavor_by_name(name).await? {
        Some(existing) => existing.id,
        None => {
            summary.flavors += 1;
            db.create_flavor(name)
                .await
                .with_context(|| format!("failed to create flavor '{name}'"))?
                .id
        }
    };
    ids.flavors.insert(name.to_string(), id.clone());
    Ok(id)
}

async fn keyword_id(
    db: &SnackDb,
    ids: &mut TagIds,
    summary: &mut ImportSummary,
    name: &str,
    active: bool,
) -> anyhow::Result<String> {
    if let Some(id) = ids.keywords.get(name) {
        return Ok(id.clone());
    }
    let id = match db.find_keyword_by_name(name).await? {
        Some(existing) => existing.id,
        None => {
            summary.keywords += 1;
            db.create_keyword(name, active)
                .await
                .with_context(|| format!("failed to create keyword '{name}'"))?
                .id
        }
    };
    ids.keywords.insert(name.to_string(), id.clone());
    Ok(id)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use snack_config::SearchConfig;
    use snack_search::{SearchRequest, search_snacks};

    use super::*;

    const CATALOG: &str = r#"{
        "types": ["과자"],
        "flavors": ["초코"],
        "keywords": ["바삭", { "name": "단종", "active": false }],
        "snacks": [
            { "name": "초코칩쿠키", "brand": "오리온", "slug": "choco-chip",
              "type": "과자", "flavors": ["초코"], "keywords": ["바삭"],
              "created_at": "2025-01-01T00:00:00Z" },
            { "name": "새우깡", "brand": "농심", "slug": "saewookkang",
              "type": "스낵", "flavors": ["짭짤"],
              "created_at": "2025-01-02T00:00:00Z" },
            { "name": "비공개", "slug": "hidden", "is_public": false }
        ]
    }"#;

    async fn memory_db() -> SnackDb {
        SnackDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn import_creates_declared_and_referenced_tags() {
        let db = memory_db().await;
        let catalog: CatalogFile = serde_json::from_str(CATALOG).unwrap();

        let summary = import_catalog(&db, &catalog).await.unwrap();

        assert_eq!(
            summary,
            ImportSummary {
                types: 2,
                flavors: 2,
                keywords: 2,
                snacks: 3,
            }
        );
        assert!(db.find_type_by_name("스낵").await.unwrap().is_some());
        assert!(db.find_flavor_by_name("짭짤").await.unwrap().is_some());
        assert!(db.find_keyword_by_name("단종").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn imported_catalog_is_searchable() {
        let db = memory_db().await;
        let catalog: CatalogFile = serde_json::from_str(CATALOG).unwrap();
        import_catalog(&db, &catalog).await.unwrap();

        let page = search_snacks(&db, &SearchConfig::default(), SearchRequest::new("초코"))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].slug, "choco-chip");
        assert_eq!(page.items[0].flavors, vec!["초코".to_string()]);

        let browse = search_snacks(&db, &SearchConfig::default(), SearchRequest::new(""))
            .await
            .unwrap();
        let slugs: Vec<&str> = browse.items.iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(slugs, vec!["saewookkang", "choco-chip"]);
    }

    #[tokio::test]
    async fn existing_tags_are_reused() {
        let db = memory_db().await;
        db.create_flavor("초코").await.unwrap();
        let catalog: CatalogFile = serde_json::from_str(
            r#"{ "snacks": [{ "name": "초코파이", "slug": "choco-pie", "flavors": ["초코"] }] }"#,
        )
        .unwrap();

        let summary = import_catalog(&db, &catalog).await.unwrap();
        assert_eq!(summary.flavors, 0);
        assert_eq!(summary.snacks, 1);
    }

    #[tokio::test]
    async fn duplicate_slug_fails_with_context() {
        let db = memory_db().await;
        let catalog: CatalogFile = serde_json::from_str(
            r#"{ "snacks": [
                { "name": "a", "slug": "same" },
                { "name": "b", "slug": "same" }
            ] }"#,
        )
        .unwrap();

        let err = import_catalog(&db, &catalog).await.unwrap_err();
        assert!(format!("{err:#}").contains("same"));
    }

    #[test]
    fn read_catalog_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ \"snacks\": 3 }}").unwrap();

        let err = read_catalog(file.path()).unwrap_err();
        assert!(format!("{err}").contains("failed to parse catalog"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed: Result<CatalogFile, _> = serde_json::from_str(r#"{ "snakcs": [] }"#);
        assert!(parsed.is_err());
    }
}
