//! Key-path extraction over nested values
//!
//! A path is an ordered sequence of mapping keys. Sequences are transparent
//! when they hold a single element and fan out when they hold several; an
//! absent key is a normal "no value" result (`None`), never an error. Inputs
//! are never mutated.

use crate::value::{Array, Value};

/// Follow `path` into `value`.
///
/// * Empty path: the value itself.
/// * Mapping: look up the head key and recurse with the remainder; a missing
///   key is `None`.
/// * Sequence: empty is `None`; a singleton is unwrapped and the full path
///   re-applied to its element; anything longer fans out via [`extract_all`].
/// * Scalar: returned as-is, remaining path keys are ignored.
pub fn extract(value: &Value, path: &[&str]) -> Option<Value> {
    let Some((head, rest)) = path.split_first() else {
        return Some(value.clone());
    };

    match value {
        Value::Object(obj) => obj.get(head).and_then(|found| extract(found, rest)),
        Value::Array(arr) => match arr.len() {
            0 => None,
            1 => extract(arr.get(0)?, path),
            _ => extract_all(value, path),
        },
        scalar => Some(scalar.clone()),
    }
}

/// Fan a path out over every element of a sequence.
///
/// Each element is resolved independently with [`extract`]; results that are
/// themselves sequences are flattened one level, absent results are dropped,
/// and duplicates are removed keeping first-seen order. The collected
/// sequence is returned even when empty. A non-sequence input delegates to
/// [`extract`].
pub fn extract_all(value: &Value, path: &[&str]) -> Option<Value> {
    if path.is_empty() {
        return Some(value.clone());
    }
    let Value::Array(arr) = value else {
        return extract(value, path);
    };

    let mut collected = Array::new();
    for item in arr {
        match extract(item, path) {
            None => {}
            Some(Value::Array(inner)) => {
                for found in inner {
                    push_unique(&mut collected, found);
                }
            }
            Some(found) => push_unique(&mut collected, found),
        }
    }
    Some(Value::Array(collected))
}

fn push_unique(collected: &mut Array, value: Value) {
    if !collected.contains(&value) {
        collected.push(value);
    }
}
