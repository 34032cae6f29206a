use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Snack type (e.g. "젤리", "쿠키"). Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SnackType {
    pub id: String,
    pub name: String,
}

/// Flavor tag, mapped many-to-many to snacks. Names are unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SnackFlavor {
    pub id: String,
    pub name: String,
}

/// Free-form keyword tag. Inactive keywords are invisible to search.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SnackKeyword {
    pub id: String,
    pub name: String,
    pub is_active: bool,
}
