//! Key-matching walk that overlays an override tree onto a base tree.
//!
//! The walk never adds, removes, or reorders base keys. Override entries
//! without a counterpart at the same level are dropped. When both sides hold
//! a mapping for a key the walk recurses; in every other case the override
//! value replaces the base value wholesale, sequences included.

use crate::value::{Mapping, Value};

/// Overlay `overrides` onto `base`, updating `base` in place.
///
/// Override entries are applied in override order. Each one is resolved
/// against every base entry with an equal key, so a base mapping that repeats
/// a key has all of its copies replaced from the same override value.
///
/// # Examples
///
/// ```rust
/// use yaml_blend::{Mapping, Value, merge_mapping};
///
/// let mut base: Mapping = [("host", "localhost"), ("port", "80")].into_iter().collect();
/// let overrides: Mapping = [("port", "8080"), ("debug", "yes")].into_iter().collect();
/// merge_mapping(&mut base, overrides);
///
/// let keys: Vec<_> = base.keys().filter_map(Value::as_str).collect();
/// assert_eq!(keys, ["host", "port"]);
/// assert_eq!(base.get("port"), Some(&Value::from("8080")));
/// ```
pub fn merge_mapping(base: &mut Mapping, overrides: Mapping) {
    for (key, value) in overrides {
        apply_entry(base, &key, value);
    }
}

/// Resolve a single base value against its override.
///
/// Two mappings merge recursively via [`merge_mapping`]. Any other pairing
/// replaces `base` with `overriding`.
///
/// # Examples
///
/// ```rust
/// use yaml_blend::{Mapping, Value, resolve_entry};
///
/// let nested: Mapping = [("a", 1_i64)].into_iter().collect();
/// let mut base = Value::from(nested);
/// resolve_entry(&mut base, Value::from("flat"));
/// assert_eq!(base, Value::from("flat"));
/// ```
pub fn resolve_entry(base: &mut Value, overriding: Value) {
    match (base, overriding) {
        (Value::Mapping(base_map), Value::Mapping(override_map)) => {
            merge_mapping(base_map, override_map);
        }
        (slot, replacement) => *slot = replacement,
    }
}

/// Pure variant of [`merge_mapping`] that leaves both inputs untouched.
#[must_use]
pub fn merged(base: &Mapping, overrides: &Mapping) -> Mapping {
    let mut result = base.clone();
    merge_mapping(&mut result, overrides.clone());
    result
}

fn apply_entry(base: &mut Mapping, key: &Value, value: Value) {
    let matches = base.keys().filter(|candidate| *candidate == key).count();
    match matches {
        0 => {
            tracing::trace!(%key, "override key has no base counterpart; dropped");
            return;
        }
        1 => {}
        _ => tracing::warn!(
            %key,
            matches,
            "override key matched duplicate base entries; replacing all of them"
        ),
    }

    let mut remaining = matches;
    let mut pending = Some(value);
    for (candidate, slot) in base.iter_mut() {
        if candidate != key {
            continue;
        }
        remaining = remaining.saturating_sub(1);
        // The last match takes ownership; earlier ones get a copy.
        let replacement = if remaining == 0 {
            pending.take()
        } else {
            pending.clone()
        };
        if let Some(replacement) = replacement {
            tracing::trace!(
                %key,
                recurse = slot.is_mapping() && replacement.is_mapping(),
                "resolving override entry"
            );
            resolve_entry(slot, replacement);
        }
    }
}
