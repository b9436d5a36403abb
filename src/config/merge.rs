//! Field-by-field merging of configuration tiers.
//!
//! Tiers are parsed into `serde_json::Value` so YAML files only need to
//! mention the keys they change.

use serde_json::Value;

/// Merge `overlay` onto `base`.
///
/// Maps merge key by key; any other overlay value replaces the base value,
/// except `null`, which leaves the base untouched.
///
/// ```
/// use serde_json::json;
/// use time_tracker::config::deep_merge;
///
/// let merged = deep_merge(
///     json!({"server": {"host": "127.0.0.1", "port": 8080}}),
///     json!({"server": {"port": 9000}}),
/// );
/// assert_eq!(merged, json!({"server": {"host": "127.0.0.1", "port": 9000}}));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut merged), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let next = match merged.remove(&key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value,
                };
                merged.insert(key, next);
            }
            Value::Object(merged)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Fold tiers in order; later tiers win.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
