use serde_json::{json, Value};

use sprig_core::service::TimeWindow;

use crate::condense::{condense, CondenseRules};
use crate::reshape::{metrics, no_data};

fn rules() -> CondenseRules {
    CondenseRules::default().limit("hashtags", 12)
}

/// The service reports hashtags as separate "top" and "bottom" ranked
/// sub-lists over the same association score. The agent gets one list:
/// both halves concatenated and re-sorted by score descending, partition
/// membership discarded.
pub fn hashtag_insights(raw: &Value, child: &str, window: TimeWindow) -> Value {
    let mut tags: Vec<&Value> = raw["top"]
        .as_array()
        .into_iter()
        .chain(raw["bottom"].as_array())
        .flatten()
        .collect();
    if tags.is_empty() {
        return no_data(format!(
            "No hashtag activity recorded for {child} in the past {window}."
        ));
    }

    tags.sort_by(|a, b| {
        let score_a = a["score"].as_f64().unwrap_or(0.0);
        let score_b = b["score"].as_f64().unwrap_or(0.0);
        score_b.total_cmp(&score_a)
    });

    let hashtags: Vec<Value> = tags
        .iter()
        .map(|t| {
            json!({
                "tag": t["tag"],
                "score": t["score"].as_f64().map(metrics::round2),
                "count": t["count"],
            })
        })
        .collect();

    let out = json!({
        "child": child,
        "window": window.to_string(),
        "count": hashtags.len(),
        "hashtags": hashtags,
    });
    condense(&out, &rules())
}
