//! Token set combination and the unspaced-query split fallback.

use snack_config::SearchConfig;
use snack_core::enums::SearchOperator;

use crate::candidates::CandidateSet;
use crate::error::SearchError;
use crate::fuzzy::FuzzyScope;
use crate::resolver::resolve_base;
use crate::store::SnackStore;

/// AND intersects left to right and stops at the first empty result; OR unions.
#[must_use]
pub fn combine(sets: Vec<CandidateSet>, operator: SearchOperator) -> CandidateSet {
    let mut iter = sets.into_iter();
    let Some(mut acc) = iter.next() else {
        return CandidateSet::new();
    };

    match operator {
        SearchOperator::And => {
            for next in iter {
                if acc.is_empty() {
                    break;
                }
                acc = acc.intersect(&next);
            }
        }
        SearchOperator::Or => {
            for next in iter {
                acc.union_with(next);
            }
        }
    }
    acc
}

/// Try every two-way split of an unspaced query, left to right, and return
/// the first non-empty intersection of its halves.
///
/// Each half must be at least two code points; shorter queries are skipped.
/// A half with no base match is broadened by similarity.
pub async fn smart_split<S: SnackStore>(
    store: &S,
    fuzzy: &FuzzyScope<'_, S>,
    config: &SearchConfig,
    text: &str,
) -> Result<Option<CandidateSet>, SearchError> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() < 4 {
        return Ok(None);
    }

    for at in 2..=chars.len() - 2 {
        let left: String = chars[..at].iter().collect();
        let right: String = chars[at..].iter().collect();

        let left_ids = broaden_half(store, fuzzy, config, &left).await?;
        if left_ids.is_empty() {
            continue;
        }
        let right_ids = broaden_half(store, fuzzy, config, &right).await?;

        let hits = left_ids.intersect(&right_ids);
        if !hits.is_empty() {
            tracing::debug!(%left, %right, hits = hits.len(), "smart split matched");
            return Ok(Some(hits));
        }
    }
    Ok(None)
}

async fn broaden_half<S: SnackStore>(
    store: &S,
    fuzzy: &FuzzyScope<'_, S>,
    config: &SearchConfig,
    half: &str,
) -> Result<CandidateSet, SearchError> {
    let base = resolve_base(store, half).await?;
    if !base.is_empty() {
        return Ok(base);
    }
    Ok(fuzzy.similar(half, config.fuzzy_limit, config.split_threshold).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn set(ids: &[&str]) -> CandidateSet {
        ids.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn and_intersects_in_order() {
        let sets = vec![set(&["a", "b", "c"]), set(&["b", "c"]), set(&["c", "d"])];
        assert_eq!(combine(sets, SearchOperator::And), set(&["c"]));
    }

    #[test]
    fn and_stops_at_first_empty() {
        let sets = vec![set(&["a"]), set(&["b"]), set(&["a", "b"])];
        assert!(combine(sets, SearchOperator::And).is_empty());
    }

    #[test]
    fn or_unions_everything() {
        let sets = vec![set(&["a"]), CandidateSet::new(), set(&["b", "a"])];
        assert_eq!(combine(sets, SearchOperator::Or), set(&["a", "b"]));
    }

    #[test]
    fn and_is_subset_of_or() {
        let sets = vec![set(&["a", "b"]), set(&["b", "c"])];
        let and = combine(sets.clone(), SearchOperator::And);
        let or = combine(sets, SearchOperator::Or);
        assert!(and.iter().all(|id| or.contains(id)));
    }

    #[test]
    fn no_sets_is_empty() {
        assert!(combine(Vec::new(), SearchOperator::And).is_empty());
        assert!(combine(Vec::new(), SearchOperator::Or).is_empty());
    }
}
