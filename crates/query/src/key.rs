//! Node-key rendering and hierarchical prefix tests.
//!
//! A node key is a '/'-joined chain of `tag=value` fragments, one per
//! level from the root down to the row's own level. Values are rendered
//! lowercased and Null-coalesced to the empty string so keys are stable
//! under the same case-insensitive comparison the group break uses, and
//! so prefix lookups stay well-defined for missing values.

use alloc::format;
use alloc::string::String;
use shelfview_core::Value;

/// Separator between key fragments.
pub const KEY_SEPARATOR: char = '/';

/// Renders a value into its fragment form. Strings are lowercased and any
/// embedded separator is replaced so one value is always one fragment.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Boolean(b) => {
            if *b {
                "1".into()
            } else {
                "0".into()
            }
        }
        Value::Int64(i) => format!("{}", i),
        Value::Float64(f) => format!("{}", f),
        Value::DateTime(d) => format!("{}", d),
        Value::String(s) => s
            .chars()
            .flat_map(char::to_lowercase)
            .map(|c| if c == KEY_SEPARATOR { '_' } else { c })
            .collect(),
    }
}

/// Renders one `tag=value` fragment.
pub fn key_fragment(tag: &str, value: &Value) -> String {
    format!("{}={}", tag, render_value(value))
}

/// Joins fragments into a node key.
pub fn join_fragments(fragments: &[String]) -> String {
    let mut out = String::new();
    for (i, f) in fragments.iter().enumerate() {
        if i > 0 {
            out.push(KEY_SEPARATOR);
        }
        out.push_str(f);
    }
    out
}

/// Returns true if `prefix` is an ancestor key of `key` (or the key
/// itself). Fragments are atomic: "a=1" is not a prefix of "a=12".
pub fn is_node_prefix(prefix: &str, key: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    if !key.starts_with(prefix) {
        return false;
    }
    key.len() == prefix.len() || key[prefix.len()..].starts_with(KEY_SEPARATOR)
}

/// Returns the key truncated to its first `level` fragments, or None if
/// the key has fewer fragments than that.
pub fn level_prefix(key: &str, level: u32) -> Option<&str> {
    if level == 0 {
        return Some("");
    }
    let mut seen = 0u32;
    for (idx, c) in key.char_indices() {
        if c == KEY_SEPARATOR {
            seen += 1;
            if seen == level {
                return Some(&key[..idx]);
            }
        }
    }
    // No trailing separator: the whole key has `seen + 1` fragments.
    if seen + 1 == level {
        Some(key)
    } else {
        None
    }
}
