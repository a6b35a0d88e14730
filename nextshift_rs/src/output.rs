//! Rendering helpers for the command line.

use serde::Serialize;

use crate::error::Result;

/// Pretty JSON with two-space indentation.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Line-aligned diff of two texts.
///
/// Lines are compared index by index, there is no alignment search. An
/// inserted line therefore shows every following line as changed. Empty
/// when the texts are identical.
pub fn format_diff(old: &str, new: &str, filename: &str) -> String {
    if old == new {
        return String::new();
    }

    let old_lines: Vec<&str> = old.split('\n').collect();
    let new_lines: Vec<&str> = new.split('\n').collect();
    let mut out = vec![format!("--- a/{filename}"), format!("+++ b/{filename}")];

    for i in 0..old_lines.len().max(new_lines.len()) {
        match (old_lines.get(i), new_lines.get(i)) {
            (Some(a), Some(b)) if a == b => out.push(format!(" {a}")),
            (a, b) => {
                if let Some(a) = a {
                    out.push(format!("-{a}"));
                }
                if let Some(b) = b {
                    out.push(format!("+{b}"));
                }
            }
        }
    }

    out.join("\n")
}
