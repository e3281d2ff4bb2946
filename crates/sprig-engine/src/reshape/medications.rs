use serde_json::{json, Value};

use sprig_core::service::TimeWindow;

use crate::condense::{condense, CondenseRules};
use crate::reshape::{metrics, no_data};

fn rules() -> CondenseRules {
    CondenseRules::default().limit("medications", 10)
}

/// Per-medication view: name, status and dose count pass through, the raw
/// effect-score list collapses into one rounded average.
pub fn medication_insights(raw: &Value, child: &str, window: TimeWindow) -> Value {
    let meds = raw["medications"].as_array().cloned().unwrap_or_default();
    if meds.is_empty() {
        return no_data(format!(
            "No medication data recorded for {child} in the past {window}."
        ));
    }

    let medications: Vec<Value> = meds
        .iter()
        .map(|med| {
            let scores: Vec<f64> = med["effect_scores"]
                .as_array()
                .map(|items| items.iter().filter_map(Value::as_f64).collect())
                .unwrap_or_default();
            json!({
                "name": med["name"],
                "status": med["status"],
                "doses_logged": med["doses_logged"],
                "average_effect": metrics::average(&scores),
            })
        })
        .collect();

    let out = json!({
        "child": child,
        "window": window.to_string(),
        "count": medications.len(),
        "medications": medications,
    });
    condense(&out, &rules())
}
