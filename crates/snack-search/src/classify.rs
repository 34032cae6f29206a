//! Batched exact-name tag classification of query tokens.

use std::collections::BTreeSet;

use snack_core::enums::TagDimension;

use crate::error::SearchError;
use crate::store::SnackStore;

/// Which tokens name a type, flavor, or active keyword verbatim.
///
/// A token may appear in more than one set; precedence is applied later by
/// the resolver, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagClassification {
    pub types: BTreeSet<String>,
    pub flavors: BTreeSet<String>,
    pub keywords: BTreeSet<String>,
}

impl TagClassification {
    /// Whether `token` exactly names a tag in any dimension.
    #[must_use]
    pub fn is_tag(&self, token: &str) -> bool {
        self.types.contains(token) || self.flavors.contains(token) || self.keywords.contains(token)
    }
}

/// One `IN (...)` lookup per dimension, all three in flight together.
pub async fn classify_tokens<S: SnackStore>(
    store: &S,
    tokens: &[String],
) -> Result<TagClassification, SearchError> {
    if tokens.is_empty() {
        return Ok(TagClassification::default());
    }

    let (types, flavors, keywords) = tokio::join!(
        store.existing_tag_names(TagDimension::Type, tokens),
        store.existing_tag_names(TagDimension::Flavor, tokens),
        store.existing_tag_names(TagDimension::Keyword, tokens),
    );

    Ok(TagClassification {
        types: types?,
        flavors: flavors?,
        keywords: keywords?,
    })
}
