//! Layered merge of YAML configuration values.
//!
//! # Merge Rules
//!
//! - Mappings are merged key by key, recursively
//! - Sequences and scalars in the overlay replace the base value
//! - A null in the overlay removes the key, restoring the built-in default

use serde_yaml::{Mapping, Value};

/// Merge `overlay` onto `base`, returning the combined value.
pub fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Mapping(base_map), Value::Mapping(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let combined = match base_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    Value::Mapping(merged)
}

/// Fold layers in order; later layers take precedence.
pub fn merge_layers(layers: &[Value]) -> Value {
    layers
        .iter()
        .fold(Value::Mapping(Mapping::new()), |acc, layer| {
            deep_merge(&acc, layer)
        })
}
