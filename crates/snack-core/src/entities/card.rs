use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Denormalized display row for one snack on a result page.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SnackCard {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub slug: String,
    pub image_path: Option<String>,
    pub type_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}
