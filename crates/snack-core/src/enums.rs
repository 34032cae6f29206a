//! Search operators, tag dimensions, and rating dimensions.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// SearchOperator
// ---------------------------------------------------------------------------

/// How per-token candidate sets are combined.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SearchOperator {
    /// Intersection across tokens.
    #[default]
    And,
    /// Union across tokens.
    Or,
}

impl SearchOperator {
    /// Lenient parse: only the exact literal `"or"` selects
    /// [`SearchOperator::Or`]. Anything else, including `"OR"` or padded
    /// input, is `And`.
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Self {
        if raw == "or" {
            Self::Or
        } else {
            Self::And
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
        }
    }
}

impl fmt::Display for SearchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TagDimension
// ---------------------------------------------------------------------------

/// One of the three exact-match tag master tables.
///
/// Declaration order is also the resolution precedence: a token that names
/// both a type and a flavor resolves as a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TagDimension {
    Type,
    Flavor,
    Keyword,
}

impl TagDimension {
    /// All dimensions in precedence order.
    pub const ALL: [Self; 3] = [Self::Type, Self::Flavor, Self::Keyword];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Flavor => "flavor",
            Self::Keyword => "keyword",
        }
    }
}

impl fmt::Display for TagDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RatingDimension
// ---------------------------------------------------------------------------

/// The five per-review score axes, each rated 1-5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RatingDimension {
    Taste,
    Texture,
    Value,
    Quantity,
    Repurchase,
}

impl RatingDimension {
    pub const ALL: [Self; 5] = [
        Self::Taste,
        Self::Texture,
        Self::Value,
        Self::Quantity,
        Self::Repurchase,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Taste => "taste",
            Self::Texture => "texture",
            Self::Value => "value",
            Self::Quantity => "quantity",
            Self::Repurchase => "repurchase",
        }
    }
}

impl fmt::Display for RatingDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
