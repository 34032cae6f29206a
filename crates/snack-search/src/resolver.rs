//! Per-token candidate resolution and length-aware fuzzy augmentation.
//!
//! Resolution is a strict cascade: type, then flavor, then active keyword,
//! then a substring match. The first tag dimension whose master table names
//! the token wins outright, even if no public snack carries that tag.
//!
//! Augmentation only touches tokens that are not tag names:
//!
//! | token length | behavior                                                  |
//! |--------------|-----------------------------------------------------------|
//! | short        | base ∪ similarity ∪ edit distance, always                 |
//! | longer       | base; if empty, similarity; if still empty, edit distance |

use snack_config::SearchConfig;

use crate::candidates::CandidateSet;
use crate::classify::TagClassification;
use crate::error::SearchError;
use crate::fuzzy::FuzzyScope;
use crate::store::SnackStore;
use crate::tokenizer::char_len;

/// Resolve one token through the tag cascade and the substring match.
pub async fn resolve_base<S: SnackStore>(
    store: &S,
    token: &str,
) -> Result<CandidateSet, SearchError> {
    if let Some(kind) = store.find_type_by_name(token).await? {
        return Ok(store.public_ids_by_type(&kind.id).await?.into());
    }
    if let Some(flavor) = store.find_flavor_by_name(token).await? {
        return Ok(store.public_ids_by_flavor(&flavor.id).await?.into());
    }
    if let Some(keyword) = store.find_keyword_by_name(token).await? {
        return Ok(store.public_ids_by_keyword(&keyword.id).await?.into());
    }
    Ok(store.public_ids_matching(token).await?.into())
}

/// Broaden a token's base set according to its length. Never fails.
pub async fn augment<S: SnackStore>(
    fuzzy: &FuzzyScope<'_, S>,
    config: &SearchConfig,
    tags: &TagClassification,
    token: &str,
    base: CandidateSet,
) -> CandidateSet {
    if tags.is_tag(token) {
        return base;
    }

    let chars = char_len(token);
    let threshold = config.threshold_for(chars);

    if chars <= config.short_token_chars {
        let (similar, one_edit) = tokio::join!(
            fuzzy.similar(token, config.fuzzy_limit, threshold),
            fuzzy.one_edit(token, config.fuzzy_limit),
        );
        let mut out = base;
        out.union_with(similar);
        out.union_with(one_edit);
        return out;
    }

    if !base.is_empty() {
        return base;
    }

    let similar = fuzzy.similar(token, config.fuzzy_limit, threshold).await;
    if !similar.is_empty() {
        tracing::debug!(token, hits = similar.len(), "token broadened by similarity");
        return similar;
    }

    let one_edit = fuzzy.one_edit(token, config.fuzzy_limit).await;
    if !one_edit.is_empty() {
        tracing::debug!(token, hits = one_edit.len(), "token broadened by edit distance");
    }
    one_edit
}

/// Base pass over every token in order, then all augmentations concurrently.
///
/// Returns one candidate set per token, aligned with `tokens`.
pub async fn resolve_tokens<S: SnackStore>(
    store: &S,
    fuzzy: &FuzzyScope<'_, S>,
    config: &SearchConfig,
    tags: &TagClassification,
    tokens: &[String],
) -> Result<Vec<CandidateSet>, SearchError> {
    let mut bases = Vec::with_capacity(tokens.len());
    for token in tokens {
        bases.push(resolve_base(store, token).await?);
    }

    let augmented = futures::future::join_all(
        tokens
            .iter()
            .zip(bases)
            .map(|(token, base)| augment(fuzzy, config, tags, token, base)),
    )
    .await;
    Ok(augmented)
}
