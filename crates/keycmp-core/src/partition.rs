//! Key partitioning of a single collection.
//!
//! A [`Partition`] maps every extracted key to exactly one item. Building one
//! is all-or-nothing: the first duplicate key aborts construction with
//! [`CmpError::KeyCollision`] and the partial map is dropped.
//!
//! Iteration order is the order in which keys were first seen in the source
//! collection.

use crate::errors::{CmpError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use indexmap::map::Entry;
use indexmap::IndexMap;
use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Instant;

/// Label used in collision errors when the caller does not name the collection
pub const DEFAULT_COLLECTION_LABEL: &str = "collection";

/// Unique-key index over borrowed items of one collection
#[derive(Debug)]
pub struct Partition<'a, K, O> {
    entries: IndexMap<K, &'a O>,
}

impl<'a, K, O> Partition<'a, K, O>
where
    K: Hash + Eq,
{
    /// Item stored under `key`
    pub fn get<Q>(&self, key: &Q) -> Option<&'a O>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key).copied()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &'a O)> {
        self.entries.iter().map(|(k, v)| (k, *v))
    }

    /// Position of `key` in first-seen order, with its item
    pub(crate) fn get_full(&self, key: &K) -> Option<(usize, &'a O)> {
        self.entries
            .get_full(key)
            .map(|(index, _, item)| (index, *item))
    }

    pub(crate) fn into_entries(self) -> IndexMap<K, &'a O> {
        self.entries
    }
}

/// Build a partition of `items` keyed by `key_fn`
///
/// # Errors
///
/// - `KeyCollision` if two items produce the same key
///
/// # Example
///
/// ```
/// use keycmp_core::partition::partition;
///
/// let words = ["apple", "banana", "cherry"];
/// let by_initial = partition(&words, |w: &&str| w.chars().next()).unwrap();
/// assert_eq!(by_initial.get(&Some('b')), Some(&"banana"));
/// ```
pub fn partition<'a, I, O, K, F>(items: I, key_fn: F) -> Result<Partition<'a, K, O>>
where
    I: IntoIterator<Item = &'a O>,
    O: 'a,
    K: Hash + Eq + Debug,
    F: FnMut(&'a O) -> K,
{
    partition_labeled(DEFAULT_COLLECTION_LABEL, items, key_fn)
}

/// Build a partition, naming the collection in collision errors and log events
///
/// # Errors
///
/// - `KeyCollision` if two items produce the same key
///
/// # Example
///
/// ```
/// use keycmp_core::partition::partition_labeled;
///
/// let ids = [7, 3, 7];
/// let err = partition_labeled("working", &ids, |id: &i32| *id).unwrap_err();
/// assert!(err.to_string().contains("working"));
/// ```
pub fn partition_labeled<'a, I, O, K, F>(
    label: &str,
    items: I,
    key_fn: F,
) -> Result<Partition<'a, K, O>>
where
    I: IntoIterator<Item = &'a O>,
    O: 'a,
    K: Hash + Eq + Debug,
    F: FnMut(&'a O) -> K,
{
    log_op_start!("partition", collection = label);
    let start = Instant::now();

    let result = build_partition(label, items, key_fn);

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(partition) => {
            log_op_end!(
                "partition",
                duration_ms = elapsed,
                collection = label,
                item_len = partition.len()
            );
        }
        Err(e) => {
            log_op_error!(
                "partition",
                e.clone(),
                duration_ms = elapsed,
                collection = label
            );
        }
    }
    result
}

/// Check whether `items` can be partitioned by `key_fn` without a collision
///
/// Never returns an error; a collision yields `false`.
pub fn can_partition<'a, I, O, K, F>(items: I, key_fn: F) -> bool
where
    I: IntoIterator<Item = &'a O>,
    O: 'a,
    K: Hash + Eq + Debug,
    F: FnMut(&'a O) -> K,
{
    match build_partition(DEFAULT_COLLECTION_LABEL, items, key_fn) {
        Ok(_) => true,
        Err(e) => {
            tracing::debug!(error = %e, "collection cannot be partitioned");
            false
        }
    }
}

fn build_partition<'a, I, O, K, F>(
    label: &str,
    items: I,
    mut key_fn: F,
) -> Result<Partition<'a, K, O>>
where
    I: IntoIterator<Item = &'a O>,
    O: 'a,
    K: Hash + Eq + Debug,
    F: FnMut(&'a O) -> K,
{
    let items = items.into_iter();
    let mut entries = IndexMap::with_capacity(items.size_hint().0);

    for (index, item) in items.enumerate() {
        match entries.entry(key_fn(item)) {
            // Every earlier item was inserted, so the slot index is the
            // position of the first item with this key.
            Entry::Occupied(slot) => {
                return Err(CmpError::KeyCollision {
                    key: format!("{:?}", slot.key()),
                    collection: label.to_string(),
                    first_index: slot.index(),
                    second_index: index,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(item);
            }
        }
    }

    Ok(Partition { entries })
}
