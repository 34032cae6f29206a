use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A catalog entry. Only snacks with `is_public` set are eligible for search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Snack {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    /// Unique human-readable key.
    pub slug: String,
    pub image_path: Option<String>,
    pub is_public: bool,
    /// At most one type per snack.
    pub type_id: Option<String>,
    pub created_at: DateTime<Utc>,
}
