//! Last-resort loose match over the whole normalized query.

use snack_config::SearchConfig;

use crate::candidates::CandidateSet;
use crate::error::SearchError;
use crate::store::SnackStore;

/// Substring, exact type, flavor-name, and keyword-name lookups on the entire
/// query, fanned out together.
///
/// An exact type hit wins on its own; otherwise the other three are unioned.
/// Either way the result is capped at `config.fallback_cap` ids.
pub async fn whole_string<S: SnackStore>(
    store: &S,
    config: &SearchConfig,
    text: &str,
) -> Result<CandidateSet, SearchError> {
    let (base, kind, flavors, keywords) = tokio::join!(
        store.public_ids_matching(text),
        store.find_type_by_name(text),
        store.public_ids_by_flavor_name_like(text),
        store.public_ids_by_keyword_name_like(text),
    );

    let (base, kind, flavors, keywords) = (base?, kind?, flavors?, keywords?);

    let mut ids = if let Some(kind) = kind {
        tracing::debug!(type_name = %kind.name, "whole-string fallback hit a type");
        CandidateSet::from(store.public_ids_by_type(&kind.id).await?)
    } else {
        let mut ids = CandidateSet::from(base);
        ids.union_with(flavors.into());
        ids.union_with(keywords.into());
        ids
    };

    ids.truncate(config.fallback_cap);
    Ok(ids)
}
