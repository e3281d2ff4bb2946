pub mod behavior;
pub mod freshness;
pub mod hashtags;
pub mod journal;
pub mod medications;
pub mod metrics;
pub mod roster;

use serde_json::{json, Value};

/// Soft-fail result for business-level absence of data. Returned as a
/// normal object, never thrown.
pub fn no_data(message: impl Into<String>) -> Value {
    json!({
        "no_data": true,
        "message": message.into(),
    })
}
