//! keycmp core - keyed collection comparison
//!
//! This crate matches two collections item by item through a key extractor
//! and reports what changed between them:
//! - Key partitioning with collision detection
//! - Removed / added / updated / unchanged classification
//! - Pluggable equality: native, closure, or null-safe field composition
//! - Structured results with counts, JSON serialization and a Markdown summary
//!
//! ```
//! use keycmp_core::compare_same;
//!
//! #[derive(Debug, PartialEq)]
//! struct User { id: u32, name: &'static str }
//!
//! let base = vec![User { id: 1, name: "a" }, User { id: 2, name: "b" }];
//! let working = vec![User { id: 2, name: "B" }, User { id: 3, name: "c" }];
//!
//! let result = compare_same(&base, &working, |u: &User| u.id, None).unwrap();
//! assert_eq!(result.to_string(), "CmpResult{removed=[1], added=[3], updated=[2], unchanged=[]}");
//! ```

pub mod diff;
pub mod equality;
pub mod errors;
pub mod logging_facility;
pub mod partition;

// Re-export commonly used types
pub use diff::{
    compare_different, compare_different_by, compare_same, compare_same_by, compare_with_rule,
    objects_equal, objects_equal_by, render_human_summary, CmpPair, CmpResult, CmpSummary, Diff,
    Latest,
};
pub use equality::{EqualsFn, EqualsRule, FieldEquals};
pub use errors::{CmpError, ExError, ExErrorKind, Result};
pub use partition::{can_partition, partition, partition_labeled, Partition};

#[doc(hidden)]
pub use keycmp_core_types::schema as __schema;
#[doc(hidden)]
pub use tracing as __tracing;
