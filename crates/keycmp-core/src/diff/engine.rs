//! Collection comparison engine.
//!
//! Every `compare_*` entry point partitions both sides, then walks the key
//! union once: base keys in base order, followed by working-only keys in
//! working order. A key collision on either side aborts the comparison
//! before any pair is classified.

use crate::diff::model::{CmpPair, CmpResult, Diff};
use crate::equality::{native, EqualsFn, EqualsRule};
use crate::errors::Result;
use crate::partition::{partition_labeled, Partition};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

/// Label of the base side in collision errors and log events
pub const BASE_LABEL: &str = "base";

/// Label of the working side in collision errors and log events
pub const WORKING_LABEL: &str = "working";

/// Compare two collections of the same item type keyed by one extractor
///
/// Without `equals`, matched pairs are judged with `PartialEq`.
///
/// # Errors
///
/// - `KeyCollision` if either collection holds two items with the same key
///
/// # Example
///
/// ```
/// use keycmp_core::diff::engine::compare_same;
///
/// let base = [(1, "a"), (2, "b")];
/// let working = [(2, "B"), (3, "c")];
/// let result = compare_same(&base, &working, |t: &(i32, &str)| t.0, None).unwrap();
///
/// assert_eq!(result.changes_count(), 3);
/// assert_eq!(result.different_count(), 2);
/// ```
pub fn compare_same<'a, 'f, I, J, O, K, F>(
    base: I,
    working: J,
    key_fn: F,
    equals: Option<EqualsFn<'f, O, O>>,
) -> Result<CmpResult<'a, K, O, O>>
where
    I: IntoIterator<Item = &'a O>,
    J: IntoIterator<Item = &'a O>,
    O: PartialEq + 'a + 'f,
    K: Hash + Eq + Debug,
    F: Fn(&'a O) -> K,
{
    let equals = equals.unwrap_or_else(native);
    compare_same_by(base, working, key_fn, equals)
}

/// Compare two collections of the same item type with an explicit predicate
///
/// # Errors
///
/// - `KeyCollision` if either collection holds two items with the same key
pub fn compare_same_by<'a, I, J, O, K, F, E>(
    base: I,
    working: J,
    key_fn: F,
    equals: E,
) -> Result<CmpResult<'a, K, O, O>>
where
    I: IntoIterator<Item = &'a O>,
    J: IntoIterator<Item = &'a O>,
    O: 'a,
    K: Hash + Eq + Debug,
    F: Fn(&'a O) -> K,
    E: Fn(&O, &O) -> bool,
{
    compare_by(base, working, &key_fn, &key_fn, equals)
}

/// Compare two collections of different item types
///
/// Each side has its own key extractor; both must yield the same key type.
/// Without `equals`, matched pairs are judged with `B: PartialEq<W>`.
///
/// # Errors
///
/// - `KeyCollision` if either collection holds two items with the same key
pub fn compare_different<'a, 'f, I, J, B, W, K, FB, FW>(
    base: I,
    working: J,
    base_key: FB,
    working_key: FW,
    equals: Option<EqualsFn<'f, B, W>>,
) -> Result<CmpResult<'a, K, B, W>>
where
    I: IntoIterator<Item = &'a B>,
    J: IntoIterator<Item = &'a W>,
    B: PartialEq<W> + 'a + 'f,
    W: 'a + 'f,
    K: Hash + Eq + Debug,
    FB: FnMut(&'a B) -> K,
    FW: FnMut(&'a W) -> K,
{
    let equals = equals.unwrap_or_else(native);
    compare_by(base, working, base_key, working_key, equals)
}

/// Compare two collections of different item types with an explicit predicate
///
/// # Errors
///
/// - `KeyCollision` if either collection holds two items with the same key
pub fn compare_different_by<'a, I, J, B, W, K, FB, FW, E>(
    base: I,
    working: J,
    base_key: FB,
    working_key: FW,
    equals: E,
) -> Result<CmpResult<'a, K, B, W>>
where
    I: IntoIterator<Item = &'a B>,
    J: IntoIterator<Item = &'a W>,
    B: 'a,
    W: 'a,
    K: Hash + Eq + Debug,
    FB: FnMut(&'a B) -> K,
    FW: FnMut(&'a W) -> K,
    E: Fn(&B, &W) -> bool,
{
    compare_by(base, working, base_key, working_key, equals)
}

/// Compare two collections, judging matched pairs by an [`EqualsRule`]
///
/// # Errors
///
/// - `KeyCollision` if either collection holds two items with the same key
pub fn compare_with_rule<'a, 'f, I, J, B, W, K, FB, FW>(
    base: I,
    working: J,
    base_key: FB,
    working_key: FW,
    rule: EqualsRule<'f, B, W>,
) -> Result<CmpResult<'a, K, B, W>>
where
    I: IntoIterator<Item = &'a B>,
    J: IntoIterator<Item = &'a W>,
    B: PartialEq<W> + 'a + 'f,
    W: 'a + 'f,
    K: Hash + Eq + Debug,
    FB: FnMut(&'a B) -> K,
    FW: FnMut(&'a W) -> K,
{
    compare_by(base, working, base_key, working_key, rule.resolve())
}

/// Judge a single pair; native equality when `equals` is `None`
pub fn objects_equal<'f, B, W>(
    base: &B,
    working: &W,
    equals: Option<EqualsFn<'f, B, W>>,
) -> bool
where
    B: PartialEq<W>,
{
    match equals {
        Some(equals) => equals(base, working),
        None => base == working,
    }
}

/// Judge a single pair with an explicit predicate
pub fn objects_equal_by<B, W, E>(base: &B, working: &W, equals: E) -> bool
where
    E: Fn(&B, &W) -> bool,
{
    equals(base, working)
}

/// Classify two already-built partitions
///
/// Never fails: both partitions are collision-free by construction.
pub fn compare_partitions<'a, K, B, W, E>(
    base: Partition<'a, K, B>,
    working: Partition<'a, K, W>,
    equals: E,
) -> CmpResult<'a, K, B, W>
where
    K: Hash + Eq,
    E: Fn(&B, &W) -> bool,
{
    let mut matched = vec![false; working.len()];
    let mut removed = Vec::new();
    let mut updated = Vec::new();
    let mut unchanged = Vec::new();

    for (key, base_item) in base.into_entries() {
        match working.get_full(&key) {
            None => removed.push(CmpPair::removed(key, base_item)),
            Some((index, working_item)) => {
                matched[index] = true;
                let equal = equals(base_item, working_item);
                let pair = CmpPair::matched(key, base_item, working_item, equal);
                match pair.diff() {
                    Diff::Unchanged => unchanged.push(pair),
                    _ => updated.push(pair),
                }
            }
        }
    }

    let added = working
        .into_entries()
        .into_iter()
        .zip(matched)
        .filter(|(_, was_matched)| !was_matched)
        .map(|((key, working_item), _)| CmpPair::added(key, working_item))
        .collect();

    CmpResult::from_buckets(removed, added, updated, unchanged)
}

fn compare_by<'a, I, J, B, W, K, FB, FW, E>(
    base: I,
    working: J,
    base_key: FB,
    working_key: FW,
    equals: E,
) -> Result<CmpResult<'a, K, B, W>>
where
    I: IntoIterator<Item = &'a B>,
    J: IntoIterator<Item = &'a W>,
    B: 'a,
    W: 'a,
    K: Hash + Eq + Debug,
    FB: FnMut(&'a B) -> K,
    FW: FnMut(&'a W) -> K,
    E: Fn(&B, &W) -> bool,
{
    log_op_start!("compare");
    let start = Instant::now();

    let result = partition_labeled(BASE_LABEL, base, base_key).and_then(|base| {
        let working = partition_labeled(WORKING_LABEL, working, working_key)?;
        Ok((base, working))
    });

    match result {
        Ok((base, working)) => {
            let (base_len, working_len) = (base.len(), working.len());
            let result = compare_partitions(base, working, equals);
            let elapsed = start.elapsed().as_millis() as u64;
            log_op_end!(
                "compare",
                duration_ms = elapsed,
                base_len = base_len,
                working_len = working_len,
                added = result.added().len(),
                removed = result.removed().len(),
                updated = result.updated().len(),
                unchanged = result.unchanged().len(),
                changes_count = result.changes_count()
            );
            Ok(result)
        }
        Err(e) => {
            let elapsed = start.elapsed().as_millis() as u64;
            log_op_error!("compare", e.clone(), duration_ms = elapsed);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equality::FieldEquals;
    use crate::errors::CmpError;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: u32,
        name: &'static str,
    }

    fn row(id: u32, name: &'static str) -> Row {
        Row { id, name }
    }

    fn keys<B, W>(pairs: &[CmpPair<'_, u32, B, W>]) -> Vec<u32> {
        pairs.iter().map(|p| *p.key()).collect()
    }

    #[test]
    fn test_classifies_every_bucket() {
        let base = vec![row(1, "a"), row(2, "b"), row(4, "d")];
        let working = vec![row(2, "B"), row(3, "c"), row(4, "d")];

        let result = compare_same(&base, &working, |r: &Row| r.id, None).unwrap();

        assert_eq!(keys(result.removed()), vec![1]);
        assert_eq!(keys(result.added()), vec![3]);
        assert_eq!(keys(result.updated()), vec![2]);
        assert_eq!(keys(result.unchanged()), vec![4]);
    }

    #[test]
    fn test_bucket_order_follows_source_order() {
        let base = vec![row(9, "x"), row(5, "y"), row(7, "z")];
        let working = vec![row(8, "p"), row(7, "z"), row(6, "q"), row(9, "X")];

        let result = compare_same(&base, &working, |r: &Row| r.id, None).unwrap();

        assert_eq!(keys(result.removed()), vec![5]);
        assert_eq!(keys(result.added()), vec![8, 6]);
        let all: Vec<u32> = result.iter().map(|p| *p.key()).collect();
        assert_eq!(all, vec![5, 8, 6, 9, 7]);
    }

    #[test]
    fn test_pairs_reference_input_items() {
        let base = vec![row(1, "a")];
        let working = vec![row(1, "b")];

        let result = compare_same(&base, &working, |r: &Row| r.id, None).unwrap();
        let pair = &result.updated()[0];

        assert!(std::ptr::eq(pair.base().unwrap(), &base[0]));
        assert!(std::ptr::eq(pair.working().unwrap(), &working[0]));
    }

    #[test]
    fn test_custom_predicate_overrides_native() {
        let base = vec![row(1, "a")];
        let working = vec![row(1, "A")];
        let case_insensitive: EqualsFn<Row, Row> =
            Box::new(|b: &Row, w: &Row| b.name.eq_ignore_ascii_case(w.name));

        let result =
            compare_same(&base, &working, |r: &Row| r.id, Some(case_insensitive)).unwrap();
        assert_eq!(result.unchanged().len(), 1);
        assert!(!result.has_changes());
    }

    #[test]
    fn test_collision_in_working_names_the_side() {
        let base = vec![row(1, "a")];
        let working = vec![row(1, "a"), row(1, "b")];

        let err = compare_same(&base, &working, |r: &Row| r.id, None).unwrap_err();
        match err {
            CmpError::KeyCollision { collection, .. } => assert_eq!(collection, WORKING_LABEL),
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_collision_in_base_wins() {
        let base = vec![row(1, "a"), row(1, "b")];
        let working = vec![row(2, "a"), row(2, "b")];

        let err = compare_same(&base, &working, |r: &Row| r.id, None).unwrap_err();
        assert!(matches!(
            err,
            CmpError::KeyCollision { ref collection, .. } if collection == BASE_LABEL
        ));
    }

    #[test]
    fn test_different_types_with_paired_fields() {
        #[derive(Debug)]
        struct Line {
            line_no: u32,
            label: String,
        }

        let base = vec![row(1, "a"), row(2, "b")];
        let working = vec![
            Line {
                line_no: 2,
                label: "b".to_string(),
            },
            Line {
                line_no: 3,
                label: "c".to_string(),
            },
        ];
        let equals = FieldEquals::<Row, Line>::new()
            .field_pair(|r: &Row| r.name.to_string(), |l: &Line| l.label.clone())
            .build()
            .unwrap();

        let result = compare_different_by(
            &base,
            &working,
            |r: &Row| r.id,
            |l: &Line| l.line_no,
            equals,
        )
        .unwrap();

        assert_eq!(keys(result.removed()), vec![1]);
        assert_eq!(keys(result.added()), vec![3]);
        assert_eq!(keys(result.unchanged()), vec![2]);
        assert!(result.updated().is_empty());
    }

    #[test]
    fn test_compare_with_rule_fields_ignore_other_members() {
        let base = vec![row(1, "a")];
        let working = vec![row(1, "b")];
        let rule: EqualsRule<Row, Row> = FieldEquals::<Row, Row>::new()
            .field(|r: &Row| r.id)
            .into();

        let result =
            compare_with_rule(&base, &working, |r: &Row| r.id, |r: &Row| r.id, rule).unwrap();
        assert_eq!(result.unchanged().len(), 1);
    }

    #[test]
    fn test_empty_inputs() {
        let empty: Vec<Row> = Vec::new();
        let result = compare_same(&empty, &empty, |r: &Row| r.id, None).unwrap();
        assert!(result.is_empty());

        let working = vec![row(1, "a")];
        let result = compare_same(&empty, &working, |r: &Row| r.id, None).unwrap();
        assert_eq!(keys(result.added()), vec![1]);
        assert_eq!(result.changes_count(), 1);
    }

    #[test]
    fn test_objects_equal() {
        let a = row(1, "a");
        assert!(objects_equal(&a, &a.clone(), None));
        assert!(!objects_equal(&a, &row(1, "b"), None));

        let by_id: EqualsFn<Row, Row> = Box::new(|x: &Row, y: &Row| x.id == y.id);
        assert!(objects_equal(&a, &row(1, "b"), Some(by_id)));
        assert!(objects_equal_by(&a, &row(2, "a"), |x: &Row, y: &Row| {
            x.name == y.name
        }));
    }
}
