//! Subcommand implementations
//!
//! Each command returns the process exit code on success; failures bubble up
//! to `main` as errors and exit with [`EXIT_ERROR`].

use anyhow::Context;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub mod check;
pub mod diff;
pub mod equals;

/// Nothing changed / items equal / partition ok
pub const EXIT_CLEAN: u8 = 0;
/// Changes found / items different
pub const EXIT_CHANGES: u8 = 1;
/// Invalid input, unreadable file or key collision
pub const EXIT_ERROR: u8 = 2;

/// Read a JSON document
pub(crate) fn load_json(path: &Path) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .map_err(keycmp_core::CmpError::from)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(value)
}

/// Read a JSON document holding an array of items
pub(crate) fn load_items(path: &Path) -> anyhow::Result<Vec<Value>> {
    match load_json(path)? {
        Value::Array(items) => Ok(items),
        other => Err(keycmp_core::CmpError::InvalidArgument {
            reason: format!(
                "{} must hold a JSON array, found {}",
                path.display(),
                json_type(&other)
            ),
        }
        .into()),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
