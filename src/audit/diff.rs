//! Change summaries for audit entries
//!
//! Walks nested objects so a category change reads as
//! `categories.transport: 500000 -> 650000`. Bookkeeping fields are skipped.

use serde_json::{Map, Value};

/// Fields that change on every write and say nothing about the edit
const IGNORED_FIELDS: &[&str] = &["updatedAt"];

/// Summarise the differences between two serialized records
///
/// Returns `None` when nothing meaningful changed.
pub fn change_summary(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(b), Value::Object(a)) => collect_object_changes(b, a, path, changes),
        _ if before != after => changes.push(format!(
            "{}: {} -> {}",
            path,
            format_value(before),
            format_value(after)
        )),
        _ => {}
    }
}

fn collect_object_changes(
    before: &Map<String, Value>,
    after: &Map<String, Value>,
    path: &str,
    changes: &mut Vec<String>,
) {
    let join = |key: &str| {
        if path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{}", path, key)
        }
    };

    for (key, b) in before {
        if path.is_empty() && IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match after.get(key) {
            Some(a) => collect_changes(b, a, &join(key), changes),
            None => changes.push(format!("{}: {} -> (removed)", join(key), format_value(b))),
        }
    }

    for (key, a) in after {
        if !before.contains_key(key) {
            changes.push(format!("{}: (added) -> {}", join(key), format_value(a)));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) if s.chars().count() > 50 => {
            let head: String = s.chars().take(47).collect();
            format!("\"{}...\"", head)
        }
        Value::String(s) => format!("\"{}\"", s),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}
