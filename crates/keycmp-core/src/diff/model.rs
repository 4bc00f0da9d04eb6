//! Comparison output types.
//!
//! A [`CmpResult`] borrows the items it classifies from the caller's
//! collections; it never owns or mutates them. Each bucket keeps the order in
//! which the comparator produced its pairs (see [`crate::diff::engine`]).

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Classification of a single key across base and working collections.
///
/// Declaration order is the order buckets are iterated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diff {
    /// Key present in base only
    Removed,
    /// Key present in working only
    Added,
    /// Key present in both, equality predicate false
    Updated,
    /// Key present in both, equality predicate true
    Unchanged,
}

impl Diff {
    pub const ALL: [Diff; 4] = [Diff::Removed, Diff::Added, Diff::Updated, Diff::Unchanged];

    pub fn as_str(&self) -> &'static str {
        match self {
            Diff::Removed => "REMOVED",
            Diff::Added => "ADDED",
            Diff::Updated => "UPDATED",
            Diff::Unchanged => "UNCHANGED",
        }
    }

    /// Removed, added or updated
    pub fn is_changed(&self) -> bool {
        !matches!(self, Diff::Unchanged)
    }

    /// Removed or added
    pub fn is_different(&self) -> bool {
        matches!(self, Diff::Removed | Diff::Added)
    }
}

impl fmt::Display for Diff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The most recent version of an item: working if present, otherwise base
#[derive(Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Latest<'a, B, W> {
    Base(&'a B),
    Working(&'a W),
}

impl<B, W> Clone for Latest<'_, B, W> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B, W> Copy for Latest<'_, B, W> {}

/// One key matched (or not) across the two collections.
///
/// At least one side is always present: the only constructors are the three
/// legal shapes (base only, working only, both).
#[derive(Debug, PartialEq, Serialize)]
pub struct CmpPair<'a, K, B, W> {
    key: K,
    base: Option<&'a B>,
    working: Option<&'a W>,
    diff: Diff,
}

impl<'a, K, B, W> CmpPair<'a, K, B, W> {
    pub(crate) fn removed(key: K, base: &'a B) -> Self {
        Self {
            key,
            base: Some(base),
            working: None,
            diff: Diff::Removed,
        }
    }

    pub(crate) fn added(key: K, working: &'a W) -> Self {
        Self {
            key,
            base: None,
            working: Some(working),
            diff: Diff::Added,
        }
    }

    pub(crate) fn matched(key: K, base: &'a B, working: &'a W, equal: bool) -> Self {
        Self {
            key,
            base: Some(base),
            working: Some(working),
            diff: if equal {
                Diff::Unchanged
            } else {
                Diff::Updated
            },
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// Base item; `None` for added pairs
    pub fn base(&self) -> Option<&'a B> {
        self.base
    }

    /// Working item; `None` for removed pairs
    pub fn working(&self) -> Option<&'a W> {
        self.working
    }

    pub fn diff(&self) -> Diff {
        self.diff
    }

    pub fn is_changed(&self) -> bool {
        self.diff.is_changed()
    }

    /// Working item if present, otherwise the base item
    pub fn latest(&self) -> Latest<'a, B, W> {
        match (self.working, self.base) {
            (Some(working), _) => Latest::Working(working),
            (None, Some(base)) => Latest::Base(base),
            (None, None) => unreachable!("CmpPair always holds at least one item"),
        }
    }
}

impl<K: Clone, B, W> Clone for CmpPair<'_, K, B, W> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            base: self.base,
            working: self.working,
            diff: self.diff,
        }
    }
}

/// Bucket sizes of a comparison, detached from the items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CmpSummary {
    pub removed: usize,
    pub added: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub changes_count: usize,
    pub different_count: usize,
}

/// Immutable outcome of one comparison: four disjoint buckets plus counts
#[derive(Debug, PartialEq, Serialize)]
pub struct CmpResult<'a, K, B, W> {
    removed: Vec<CmpPair<'a, K, B, W>>,
    added: Vec<CmpPair<'a, K, B, W>>,
    updated: Vec<CmpPair<'a, K, B, W>>,
    unchanged: Vec<CmpPair<'a, K, B, W>>,
    changes_count: usize,
    different_count: usize,
}

impl<'a, K, B, W> CmpResult<'a, K, B, W> {
    pub(crate) fn from_buckets(
        removed: Vec<CmpPair<'a, K, B, W>>,
        added: Vec<CmpPair<'a, K, B, W>>,
        updated: Vec<CmpPair<'a, K, B, W>>,
        unchanged: Vec<CmpPair<'a, K, B, W>>,
    ) -> Self {
        let different_count = removed.len() + added.len();
        let changes_count = different_count + updated.len();
        Self {
            removed,
            added,
            updated,
            unchanged,
            changes_count,
            different_count,
        }
    }

    /// Pairs whose key exists only in base
    pub fn removed(&self) -> &[CmpPair<'a, K, B, W>] {
        &self.removed
    }

    /// Pairs whose key exists only in working
    pub fn added(&self) -> &[CmpPair<'a, K, B, W>] {
        &self.added
    }

    /// Pairs present on both sides that the equality predicate rejected
    pub fn updated(&self) -> &[CmpPair<'a, K, B, W>] {
        &self.updated
    }

    pub fn unchanged(&self) -> &[CmpPair<'a, K, B, W>] {
        &self.unchanged
    }

    /// The bucket for one classification
    pub fn bucket(&self, diff: Diff) -> &[CmpPair<'a, K, B, W>] {
        match diff {
            Diff::Removed => &self.removed,
            Diff::Added => &self.added,
            Diff::Updated => &self.updated,
            Diff::Unchanged => &self.unchanged,
        }
    }

    /// Every pair: removed, added, updated, then unchanged
    pub fn iter(&self) -> impl Iterator<Item = &CmpPair<'a, K, B, W>> {
        self.removed
            .iter()
            .chain(&self.added)
            .chain(&self.updated)
            .chain(&self.unchanged)
    }

    /// Removed, added and updated pairs
    pub fn iter_changed(&self) -> impl Iterator<Item = &CmpPair<'a, K, B, W>> {
        self.removed.iter().chain(&self.added).chain(&self.updated)
    }

    pub fn iter_unchanged(&self) -> impl Iterator<Item = &CmpPair<'a, K, B, W>> {
        self.unchanged.iter()
    }

    /// Removed and added pairs
    pub fn iter_different(&self) -> impl Iterator<Item = &CmpPair<'a, K, B, W>> {
        self.removed.iter().chain(&self.added)
    }

    pub fn all(&self) -> Vec<&CmpPair<'a, K, B, W>> {
        self.iter().collect()
    }

    pub fn changed(&self) -> Vec<&CmpPair<'a, K, B, W>> {
        self.iter_changed().collect()
    }

    pub fn different(&self) -> Vec<&CmpPair<'a, K, B, W>> {
        self.iter_different().collect()
    }

    /// Items added to the working collection
    pub fn added_items(&self) -> Vec<&'a W> {
        self.added.iter().filter_map(CmpPair::working).collect()
    }

    /// Items removed from the base collection
    pub fn removed_items(&self) -> Vec<&'a B> {
        self.removed.iter().filter_map(CmpPair::base).collect()
    }

    /// Removed base items followed by added working items
    pub fn different_items(&self) -> Vec<Latest<'a, B, W>> {
        self.iter_different().map(CmpPair::latest).collect()
    }

    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(&CmpPair<'a, K, B, W>),
    {
        self.iter().for_each(action)
    }

    pub fn for_each_changed<F>(&self, action: F)
    where
        F: FnMut(&CmpPair<'a, K, B, W>),
    {
        self.iter_changed().for_each(action)
    }

    pub fn for_each_unchanged<F>(&self, action: F)
    where
        F: FnMut(&CmpPair<'a, K, B, W>),
    {
        self.iter_unchanged().for_each(action)
    }

    /// |removed| + |added| + |updated|
    pub fn changes_count(&self) -> usize {
        self.changes_count
    }

    /// |removed| + |added|
    pub fn different_count(&self) -> usize {
        self.different_count
    }

    pub fn has_changes(&self) -> bool {
        self.changes_count > 0
    }

    pub fn has_differences(&self) -> bool {
        self.different_count > 0
    }

    /// Total number of pairs across all buckets
    pub fn len(&self) -> usize {
        self.changes_count + self.unchanged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All four buckets keyed by classification; empty buckets are included
    pub fn as_map(&self) -> BTreeMap<Diff, &[CmpPair<'a, K, B, W>]> {
        Diff::ALL
            .iter()
            .map(|diff| (*diff, self.bucket(*diff)))
            .collect()
    }

    pub fn summary(&self) -> CmpSummary {
        CmpSummary {
            removed: self.removed.len(),
            added: self.added.len(),
            updated: self.updated.len(),
            unchanged: self.unchanged.len(),
            changes_count: self.changes_count,
            different_count: self.different_count,
        }
    }
}

impl<K: Clone, B, W> Clone for CmpResult<'_, K, B, W> {
    fn clone(&self) -> Self {
        Self {
            removed: self.removed.clone(),
            added: self.added.clone(),
            updated: self.updated.clone(),
            unchanged: self.unchanged.clone(),
            changes_count: self.changes_count,
            different_count: self.different_count,
        }
    }
}

/// Lists the keys of each bucket, e.g. `CmpResult{removed=[1], added=[3], updated=[2], unchanged=[]}`
impl<K: fmt::Debug, B, W> fmt::Display for CmpResult<'_, K, B, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CmpResult{{removed={:?}, added={:?}, updated={:?}, unchanged={:?}}}",
            keys_of(&self.removed),
            keys_of(&self.added),
            keys_of(&self.updated),
            keys_of(&self.unchanged)
        )
    }
}

fn keys_of<'p, K, B, W>(pairs: &'p [CmpPair<'_, K, B, W>]) -> Vec<&'p K> {
    pairs.iter().map(CmpPair::key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Vec<&'static str>, Vec<&'static str>) {
        (vec!["b1", "b2", "b3"], vec!["w2", "w3", "w4"])
    }

    fn build<'a>(
        base: &'a [&'static str],
        working: &'a [&'static str],
    ) -> CmpResult<'a, u32, &'static str, &'static str> {
        CmpResult::from_buckets(
            vec![CmpPair::removed(1, &base[0])],
            vec![CmpPair::added(4, &working[2])],
            vec![CmpPair::matched(2, &base[1], &working[0], false)],
            vec![CmpPair::matched(3, &base[2], &working[1], true)],
        )
    }

    #[test]
    fn test_counts() {
        let (base, working) = sample();
        let result = build(&base, &working);

        assert_eq!(result.changes_count(), 3);
        assert_eq!(result.different_count(), 2);
        assert!(result.has_changes());
        assert!(result.has_differences());
        assert_eq!(result.len(), 4);
        assert_eq!(
            result.summary(),
            CmpSummary {
                removed: 1,
                added: 1,
                updated: 1,
                unchanged: 1,
                changes_count: 3,
                different_count: 2,
            }
        );
    }

    #[test]
    fn test_empty_result() {
        let result: CmpResult<u32, (), ()> =
            CmpResult::from_buckets(Vec::new(), Vec::new(), Vec::new(), Vec::new());
        assert!(result.is_empty());
        assert!(!result.has_changes());
        assert!(!result.has_differences());
        assert_eq!(result.as_map().len(), 4);
    }

    #[test]
    fn test_iteration_order() {
        let (base, working) = sample();
        let result = build(&base, &working);

        let all: Vec<u32> = result.iter().map(|p| *p.key()).collect();
        assert_eq!(all, vec![1, 4, 2, 3]);

        let changed: Vec<u32> = result.changed().iter().map(|p| *p.key()).collect();
        assert_eq!(changed, vec![1, 4, 2]);

        let different: Vec<Diff> = result.different().iter().map(|p| p.diff()).collect();
        assert_eq!(different, vec![Diff::Removed, Diff::Added]);

        let mut unchanged = Vec::new();
        result.for_each_unchanged(|p| unchanged.push(*p.key()));
        assert_eq!(unchanged, vec![3]);
    }

    #[test]
    fn test_item_views() {
        let (base, working) = sample();
        let result = build(&base, &working);

        assert_eq!(result.removed_items(), vec![&"b1"]);
        assert_eq!(result.added_items(), vec![&"w4"]);
        assert_eq!(
            result.different_items(),
            vec![Latest::Base(&"b1"), Latest::Working(&"w4")]
        );
    }

    #[test]
    fn test_latest_prefers_working() {
        let (base, working) = sample();
        let updated = CmpPair::<u32, _, _>::matched(2, &base[1], &working[0], false);
        assert_eq!(updated.latest(), Latest::Working(&"w2"));
        assert_eq!(updated.diff(), Diff::Updated);
        assert!(updated.is_changed());
    }

    #[test]
    fn test_as_map_matches_buckets() {
        let (base, working) = sample();
        let result = build(&base, &working);
        let map = result.as_map();

        for diff in Diff::ALL {
            assert_eq!(map[&diff].len(), 1);
            assert!(map[&diff].iter().all(|p| p.diff() == diff));
        }
    }

    #[test]
    fn test_display_lists_keys() {
        let (base, working) = sample();
        let result = build(&base, &working);
        assert_eq!(
            result.to_string(),
            "CmpResult{removed=[1], added=[4], updated=[2], unchanged=[3]}"
        );
    }

    #[test]
    fn test_diff_serializes_upper_case() {
        assert_eq!(serde_json::to_string(&Diff::Unchanged).unwrap(), "\"UNCHANGED\"");
        assert!(Diff::Added.is_different());
        assert!(!Diff::Updated.is_different());
        assert!(!Diff::Unchanged.is_changed());
    }
}
