//! Keyed collection comparison.
//!
//! Matches the items of a base and a working collection by an extracted key
//! and classifies every key as removed, added, updated or unchanged.
//!
//! ## Entry point
//!
//! ```
//! use keycmp_core::diff::{compare_same, render_human_summary};
//!
//! let base = [(1, "a"), (2, "b")];
//! let working = [(2, "B"), (3, "c")];
//! let result = compare_same(&base, &working, |t: &(i32, &str)| t.0, None).unwrap();
//! let summary = render_human_summary(&result);
//! assert!(summary.contains("### Updated (1)"));
//! ```
//!
//! ## Guarantees
//!
//! - **Exhaustive and disjoint**: every key of either side lands in exactly one bucket.
//! - **All or nothing**: a key collision on either side fails the whole call.
//! - **Deterministic order**: base keys in base order, then working-only keys in
//!   working order.
//! - **Borrowing**: results reference the caller's items and never copy them.

pub mod engine;
pub mod human_summary;
pub mod model;

pub use engine::{
    compare_different, compare_different_by, compare_partitions, compare_same, compare_same_by,
    compare_with_rule, objects_equal, objects_equal_by,
};
pub use human_summary::render_human_summary;
pub use model::{CmpPair, CmpResult, CmpSummary, Diff, Latest};
