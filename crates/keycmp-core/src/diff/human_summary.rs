//! Human-readable summary renderer for comparison results.

use crate::diff::model::{CmpResult, Diff};
use std::fmt::Display;

/// Render a Markdown summary of a [`CmpResult`].
///
/// Contains a counts table followed by one section per non-empty bucket
/// (unchanged keys are only counted, never listed). Informational only.
pub fn render_human_summary<K, B, W>(result: &CmpResult<'_, K, B, W>) -> String
where
    K: Display,
{
    let mut out = String::new();

    out.push_str("## Collection Diff\n\n");

    let summary = result.summary();
    out.push_str(&format!(
        "| Removed | Added | Updated | Unchanged |\n\
         |---|---|---|---|\n\
         | {} | {} | {} | {} |\n\n",
        summary.removed, summary.added, summary.updated, summary.unchanged,
    ));
    out.push_str(&format!(
        "**Changes**: {}  \n**Differences**: {}\n\n",
        summary.changes_count, summary.different_count
    ));

    if !result.has_changes() {
        out.push_str("_No changes detected._\n");
        return out;
    }

    for diff in [Diff::Removed, Diff::Added, Diff::Updated] {
        let pairs = result.bucket(diff);
        if pairs.is_empty() {
            continue;
        }
        out.push_str(&format!("### {} ({})\n\n", heading(diff), pairs.len()));
        for pair in pairs {
            out.push_str(&format!("- `{}`\n", pair.key()));
        }
        out.push('\n');
    }

    out
}

fn heading(diff: Diff) -> &'static str {
    match diff {
        Diff::Removed => "Removed",
        Diff::Added => "Added",
        Diff::Updated => "Updated",
        Diff::Unchanged => "Unchanged",
    }
}
