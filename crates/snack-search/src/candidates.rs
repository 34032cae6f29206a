//! Request-scoped snack id sets.

use std::collections::BTreeSet;

/// A set of public snack ids produced by one search stage.
///
/// Backed by an ordered set so every derived listing is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    ids: BTreeSet<String>,
}

impl CandidateSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ids.iter()
    }

    /// Ids present in both sets.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        Self {
            ids: self.ids.intersection(&other.ids).cloned().collect(),
        }
    }

    /// Absorb every id of `other`.
    pub fn union_with(&mut self, other: Self) {
        self.ids.extend(other.ids);
    }

    /// Keep only the first `cap` ids in id order.
    pub fn truncate(&mut self, cap: usize) {
        if self.ids.len() > cap {
            self.ids = std::mem::take(&mut self.ids).into_iter().take(cap).collect();
        }
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.ids.into_iter().collect()
    }
}

impl FromIterator<String> for CandidateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<String>> for CandidateSet {
    fn from(ids: Vec<String>) -> Self {
        ids.into_iter().collect()
    }
}
