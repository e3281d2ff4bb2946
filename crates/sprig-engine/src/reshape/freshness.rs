use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use sprig_core::service::TimeWindow;

use crate::reshape::{metrics, no_data};

/// How current the child's data is, measured against the most recent
/// entry the service has for the window.
pub fn freshness_report(
    raw: &Value,
    child: &str,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Value {
    let total_entries = raw["total_entries"].as_u64().unwrap_or(0);
    let latest = raw["latest_entry_date"].as_str();
    if total_entries == 0 && latest.is_none() {
        return no_data(format!(
            "No entries recorded for {child} in the past {window}."
        ));
    }

    let days_behind = metrics::day_offset(latest, now);
    let freshness = days_behind
        .map(metrics::freshness_label)
        .unwrap_or_else(|| "unknown".to_string());

    json!({
        "child": child,
        "window": window.to_string(),
        "last_entry_date": latest,
        "days_behind": days_behind,
        "freshness": freshness,
        "total_entries": total_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap()
    }

    #[test]
    fn entry_today_is_current() {
        let raw = json!({"latest_entry_date": "2026-03-10", "total_entries": 4});
        let out = freshness_report(&raw, "Ada", TimeWindow::Week, now());
        assert_eq!(out["freshness"], json!("current"));
        assert_eq!(out["days_behind"], json!(0));
        assert_eq!(out["total_entries"], json!(4));
    }

    #[test]
    fn six_days_old_data_is_behind() {
        let raw = json!({"latest_entry_date": "2026-03-04", "total_entries": 12});
        let out = freshness_report(&raw, "Ada", TimeWindow::Month, now());
        assert_eq!(out["freshness"], json!("6 days behind"));
        assert_eq!(out["days_behind"], json!(6));
    }

    #[test]
    fn one_day_old_uses_singular() {
        let raw = json!({"latest_entry_date": "2026-03-09", "total_entries": 1});
        let out = freshness_report(&raw, "Ada", TimeWindow::Week, now());
        assert_eq!(out["freshness"], json!("1 day behind"));
    }

    #[test]
    fn unparseable_date_yields_null_offset() {
        let raw = json!({"latest_entry_date": "sometime", "total_entries": 3});
        let out = freshness_report(&raw, "Ada", TimeWindow::Week, now());
        assert_eq!(out["days_behind"], json!(null));
        assert_eq!(out["freshness"], json!("unknown"));
    }

    #[test]
    fn empty_payload_is_soft_no_data() {
        let out = freshness_report(&json!({}), "Ada", TimeWindow::Quarter, now());
        assert_eq!(out["no_data"], json!(true));
    }
}
