use serde_json::{json, Map, Value};

use sprig_core::service::SearchPayload;

use crate::condense::{condense, CondenseRules};
use crate::reshape::metrics::{score_label, ScoreDimension};
use crate::reshape::no_data;

/// Search results never emit more than this many entries, regardless of
/// what the service returned. Distinct from the condense marker mechanism:
/// this is a flat cap with an explicit flag and guidance.
pub const PAGE_CAP: usize = 100;

const PREVIEW_CHARS: usize = 160;

fn entry_rules() -> CondenseRules {
    CondenseRules::default().limit("tags", 8)
}

fn preview_of(text: &str) -> String {
    if text.chars().count() <= PREVIEW_CHARS {
        return text.to_string();
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{cut}…")
}

/// Field-selected search hits under the hard page cap.
pub fn search_results(payload: &SearchPayload, child: &str, query: &str) -> Value {
    if payload.results.is_empty() {
        return no_data(format!(
            "No journal entries matching \"{query}\" were found for {child}."
        ));
    }

    let total_found = payload.pagination.total.max(payload.results.len() as u64);
    let truncated = payload.results.len() > PAGE_CAP;
    let entries: Vec<Value> = payload
        .results
        .iter()
        .take(PAGE_CAP)
        .map(|hit| {
            json!({
                "id": hit["id"],
                "date": hit["date"],
                "preview": hit["text"].as_str().map(preview_of),
                "tags": hit["tags"],
            })
        })
        .collect();

    let mut out = Map::new();
    out.insert("child".into(), json!(child));
    out.insert("query".into(), json!(query));
    out.insert("count".into(), json!(entries.len()));
    out.insert("entries".into(), Value::Array(entries));
    out.insert("truncated".into(), json!(truncated));
    out.insert("total_found".into(), json!(total_found));
    if truncated {
        out.insert(
            "guidance".into(),
            json!("Only the first 100 matches are shown. Narrow the date range or refine the query to see the rest."),
        );
    }
    Value::Object(out)
}

/// Full detail for a single journal entry. The detail-level label is
/// always present; the significance, crisis and strategy labels are
/// omitted entirely while their scores stay below the publish threshold.
pub fn entry_detail(raw: &Value, child: &str) -> Value {
    let scores = &raw["scores"];
    let mut out = Map::new();
    out.insert("child".into(), json!(child));
    out.insert("id".into(), raw["id"].clone());
    out.insert("date".into(), raw["date"].clone());
    out.insert("text".into(), raw["text"].clone());
    out.insert("tags".into(), raw["tags"].clone());

    let dimensions = [
        ("detail_level", ScoreDimension::DetailLevel),
        ("significance", ScoreDimension::MomentSignificance),
        ("crisis", ScoreDimension::CrisisIntensity),
        ("strategy_effectiveness", ScoreDimension::StrategyEffectiveness),
    ];
    for (field, dimension) in dimensions {
        if let Some(score) = scores[field].as_f64() {
            if let Some(label) = score_label(dimension, score) {
                out.insert(field.into(), json!(label));
            }
        }
    }

    condense(&Value::Object(out), &entry_rules())
}
