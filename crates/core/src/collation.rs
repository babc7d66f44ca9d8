//! Case-insensitive collation helpers.
//!
//! Sorting and group-break detection both compare text the same way:
//! case-insensitively, with Null sorting before every concrete value.
//! Sharing the comparison here keeps the sorted insert order and the
//! header-synthesis breaks consistent with each other.

use crate::Value;
use alloc::string::String;
use core::cmp::Ordering;

/// Compares two strings case-insensitively, character by character.
/// Ties are broken by the raw byte order so the result is a total order.
pub fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    let mut ia = a.chars().flat_map(char::to_lowercase);
    let mut ib = b.chars().flat_map(char::to_lowercase);
    loop {
        match (ia.next(), ib.next()) {
            (Some(ca), Some(cb)) => match ca.cmp(&cb) {
                Ordering::Equal => continue,
                other => return other,
            },
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (None, None) => return a.cmp(b),
        }
    }
}

/// Returns true if the two strings are equal ignoring case.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    let mut ia = a.chars().flat_map(char::to_lowercase);
    let mut ib = b.chars().flat_map(char::to_lowercase);
    loop {
        match (ia.next(), ib.next()) {
            (Some(ca), Some(cb)) => {
                if ca != cb {
                    return false;
                }
            }
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Returns true if `needle` occurs in `haystack` ignoring case.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let hay: String = haystack.chars().flat_map(char::to_lowercase).collect();
    let ndl: String = needle.chars().flat_map(char::to_lowercase).collect();
    hay.contains(ndl.as_str())
}

/// Compares two values for sorting. Null sorts before every concrete value.
/// String values use case-insensitive collation when `collated` is set;
/// every other type compares by raw value.
pub fn compare_values(a: &Value, b: &Value, collated: bool) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::String(sa), Value::String(sb)) if collated => compare_ignore_case(sa, sb),
        _ => a.cmp(b),
    }
}

/// Group-break equality: the comparison the header-synthesis pass uses.
/// Null is coalesced to the empty string so a run of Null group values
/// forms a single group rather than one group per row.
pub fn break_eq(a: &Value, b: &Value) -> bool {
    let sa = a.as_str().unwrap_or("");
    let sb = b.as_str().unwrap_or("");
    match (a, b) {
        (Value::String(_) | Value::Null, Value::String(_) | Value::Null) => eq_ignore_case(sa, sb),
        _ => a == b,
    }
}
