use std::collections::HashMap;

use serde_json::{json, Value};

const DEFAULT_ITEM_LIMIT: usize = 8;
const TRUNCATION_FLOOR: usize = 4;

/// Per-field item limits for nested arrays, keyed by the name of the field
/// the array sits under. Read-only at transform time.
#[derive(Clone, Debug)]
pub struct CondenseRules {
    limits: HashMap<String, usize>,
    default_limit: usize,
    floor: usize,
}

impl CondenseRules {
    pub fn new(default_limit: usize) -> Self {
        Self {
            limits: HashMap::new(),
            default_limit,
            floor: TRUNCATION_FLOOR,
        }
    }

    /// Cap arrays under `key` at `max` items.
    pub fn limit(mut self, key: impl Into<String>, max: usize) -> Self {
        self.limits.insert(key.into(), max);
        self
    }

    /// Arrays shorter than the floor are never truncated.
    pub fn with_floor(mut self, floor: usize) -> Self {
        self.floor = floor;
        self
    }

    fn limit_for(&self, key: Option<&str>) -> usize {
        key.and_then(|k| self.limits.get(k).copied())
            .unwrap_or(self.default_limit)
    }
}

impl Default for CondenseRules {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_LIMIT)
    }
}

/// Deterministically shrink nested data: arrays longer than their limit
/// keep their first elements in original order plus one marker recording
/// what was elided. Pure computation, no I/O.
pub fn condense(value: &Value, rules: &CondenseRules) -> Value {
    condense_inner(value, rules, None)
}

fn condense_inner(value: &Value, rules: &CondenseRules, key: Option<&str>) -> Value {
    match value {
        Value::Array(items) => {
            let limit = rules.limit_for(key);
            if items.len() < rules.floor || items.len() <= limit {
                return Value::Array(
                    items
                        .iter()
                        .map(|item| condense_inner(item, rules, key))
                        .collect(),
                );
            }
            let mut kept: Vec<Value> = items[..limit]
                .iter()
                .map(|item| condense_inner(item, rules, key))
                .collect();
            kept.push(json!({
                "truncated": true,
                "omitted_items": items.len() - limit,
                "total_items": items.len(),
            }));
            Value::Array(kept)
        }
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), condense_inner(v, rules, Some(k))))
                .collect(),
        ),
        other => other.clone(),
    }
}
