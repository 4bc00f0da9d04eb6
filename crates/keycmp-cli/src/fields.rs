//! Field access on JSON items
//!
//! A field is either a top-level member name (`id`) or an RFC 6901 JSON
//! pointer (`/address/city`). Missing members and JSON `null` both count as
//! absent.

use keycmp_core::equality::{null_safe_eq, EqualsFn, FieldEquals};
use keycmp_core::errors::CmpError;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath {
    Member(String),
    Pointer(String),
}

impl FieldPath {
    pub fn parse(raw: &str) -> Result<Self, CmpError> {
        if raw.trim().is_empty() {
            return Err(CmpError::InvalidArgument {
                reason: "field name must not be empty".to_string(),
            });
        }
        if raw.starts_with('/') {
            Ok(FieldPath::Pointer(raw.to_string()))
        } else {
            Ok(FieldPath::Member(raw.to_string()))
        }
    }

    /// Value at this path, `None` if missing or null
    pub fn present<'v>(&self, item: &'v Value) -> Option<&'v Value> {
        let value = match self {
            FieldPath::Member(name) => item.get(name),
            FieldPath::Pointer(pointer) => item.pointer(pointer),
        };
        value.filter(|v| !v.is_null())
    }

    /// Canonical JSON text of the value at this path; absent renders as `null`
    ///
    /// Callers run [`FieldPath::require_in`] first, so the `null` text never
    /// becomes a key.
    pub fn key_of(&self, item: &Value) -> String {
        self.present(item).unwrap_or(&Value::Null).to_string()
    }

    /// Fail on the first item of `collection` where this key is missing or null
    pub fn require_in(&self, collection: &str, items: &[Value]) -> Result<(), CmpError> {
        match items.iter().position(|item| self.present(item).is_none()) {
            Some(index) => Err(CmpError::InvalidArgument {
                reason: format!(
                    "item #{} of {} has no value for key field `{}`",
                    index, collection, self
                ),
            }),
            None => Ok(()),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Member(name) => f.write_str(name),
            FieldPath::Pointer(pointer) => f.write_str(pointer),
        }
    }
}

/// Parse every raw field name
pub fn parse_all(raw: &[String]) -> Result<Vec<FieldPath>, CmpError> {
    raw.iter().map(|f| FieldPath::parse(f)).collect()
}

/// Null-safe field-wise equality over JSON items; `None` for an empty list
pub fn field_equals(
    paths: Vec<FieldPath>,
) -> Result<Option<EqualsFn<'static, Value, Value>>, CmpError> {
    if paths.is_empty() {
        return Ok(None);
    }

    let equals = paths
        .into_iter()
        .fold(FieldEquals::<Value, Value>::new(), |fields, path| {
            fields.field_with(move |a: &Value, b: &Value| {
                null_safe_eq(path.present(a), path.present(b))
            })
        })
        .build()?;
    Ok(Some(equals))
}
