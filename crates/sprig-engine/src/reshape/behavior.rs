use serde_json::{json, Value};

use sprig_core::service::TimeWindow;

use crate::condense::{condense, CondenseRules};
use crate::reshape::{metrics, no_data};

fn rules() -> CondenseRules {
    CondenseRules::default().limit("daily", 14).limit("categories", 10)
}

fn scores_of(value: &Value) -> Vec<f64> {
    value["scores"]
        .as_array()
        .map(|items| items.iter().filter_map(Value::as_f64).collect())
        .unwrap_or_default()
}

/// Compact behavior-score summary: per-day and per-category averages plus
/// an overall mean across every recorded score in the window.
pub fn behavior_summary(raw: &Value, child: &str, window: TimeWindow) -> Value {
    let days = raw["days"].as_array().cloned().unwrap_or_default();
    let categories = raw["categories"].as_array().cloned().unwrap_or_default();
    if days.is_empty() && categories.is_empty() {
        return no_data(format!(
            "No behavior scores recorded for {child} in the past {window}."
        ));
    }

    let mut all_scores = Vec::new();
    let daily: Vec<Value> = days
        .iter()
        .map(|day| {
            let scores = scores_of(day);
            all_scores.extend_from_slice(&scores);
            json!({
                "date": day["date"],
                "average": metrics::average(&scores),
                "sample_count": scores.len(),
            })
        })
        .collect();

    let categories: Vec<Value> = categories
        .iter()
        .map(|cat| {
            let scores = scores_of(cat);
            json!({
                "name": cat["name"],
                "average": metrics::average(&scores),
                "sample_count": scores.len(),
            })
        })
        .collect();

    let summary = json!({
        "child": child,
        "window": window.to_string(),
        "overall_average": metrics::average(&all_scores),
        "daily": daily,
        "categories": categories,
    });
    condense(&summary, &rules())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_days_and_categories() {
        let raw = json!({
            "days": [
                {"date": "2026-03-01", "scores": [3, 2, 4]},
                {"date": "2026-03-02", "scores": [5]},
            ],
            "categories": [
                {"name": "Focus", "scores": [2, 3]},
            ],
        });
        let out = behavior_summary(&raw, "Ada", TimeWindow::Week);
        assert_eq!(out["child"], json!("Ada"));
        assert_eq!(out["window"], json!("week"));
        assert_eq!(out["daily"][0]["average"], json!(3.0));
        assert_eq!(out["daily"][0]["sample_count"], json!(3));
        assert_eq!(out["daily"][1]["average"], json!(5.0));
        assert_eq!(out["categories"][0]["average"], json!(2.5));
        assert_eq!(out["overall_average"], json!(3.5));
    }

    #[test]
    fn day_without_scores_has_null_average() {
        let raw = json!({"days": [{"date": "2026-03-01", "scores": []}]});
        let out = behavior_summary(&raw, "Ada", TimeWindow::Week);
        assert_eq!(out["daily"][0]["average"], json!(null));
        assert_eq!(out["overall_average"], json!(null));
    }

    #[test]
    fn empty_payload_is_soft_no_data() {
        let out = behavior_summary(&json!({}), "Ada", TimeWindow::Month);
        assert_eq!(out["no_data"], json!(true));
        assert!(out["message"].as_str().unwrap().contains("month"));
    }

    #[test]
    fn long_daily_list_is_condensed_with_marker() {
        let days: Vec<Value> = (0..30)
            .map(|i| json!({"date": format!("2026-03-{:02}", i + 1), "scores": [1]}))
            .collect();
        let out = behavior_summary(&json!({"days": days}), "Ada", TimeWindow::Month);
        let daily = out["daily"].as_array().unwrap();
        assert_eq!(daily.len(), 15);
        assert_eq!(daily[14]["truncated"], json!(true));
        assert_eq!(daily[14]["omitted_items"], json!(16));
        assert_eq!(daily[14]["total_items"], json!(30));
    }
}
