use chrono::{DateTime, NaiveDate, Utc};

/// Scores below this are not published for the gated dimensions.
pub const PUBLISH_THRESHOLD: f64 = 0.55;

/// Mean of a discrete score set, rounded to two decimal places.
/// An empty set has no average rather than zero or NaN.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    Some(round2(mean))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whole days between a calendar date and now, both taken at midnight UTC,
/// floored and clamped to zero. Missing or unparseable dates have no
/// offset rather than failing the whole reshape.
pub fn day_offset(date: Option<&str>, now: DateTime<Utc>) -> Option<i64> {
    let raw = date?;
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })?;
    let days = (now.date_naive() - date).num_days();
    Some(days.max(0))
}

/// Human label for how far behind the most recent available data is.
pub fn freshness_label(days_behind: i64) -> String {
    match days_behind {
        0 => "current".to_string(),
        1 => "1 day behind".to_string(),
        n => format!("{n} days behind"),
    }
}

/// Scoring dimensions attached to journal entries. Each maps a [0,1]
/// score to one of three tiers with fixed breakpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreDimension {
    DetailLevel,
    MomentSignificance,
    CrisisIntensity,
    StrategyEffectiveness,
}

impl ScoreDimension {
    fn breakpoints(&self) -> (f64, f64) {
        match self {
            Self::DetailLevel => (0.40, 0.70),
            Self::MomentSignificance => (0.65, 0.80),
            Self::CrisisIntensity => (0.70, 0.85),
            Self::StrategyEffectiveness => (0.70, 0.85),
        }
    }

    fn tier_labels(&self) -> [&'static str; 3] {
        match self {
            Self::DetailLevel => ["Brief", "Moderate", "Detailed"],
            Self::MomentSignificance => ["Noteworthy", "Significant", "Milestone"],
            Self::CrisisIntensity => ["Mild", "Elevated", "Severe"],
            Self::StrategyEffectiveness => {
                ["Somewhat Effective", "Effective", "Highly Effective"]
            }
        }
    }

    /// Detail level is always published; the other dimensions only appear
    /// once the score clears the publish threshold.
    fn always_published(&self) -> bool {
        matches!(self, Self::DetailLevel)
    }
}

/// Qualitative label for a score, or None when the dimension stays
/// unpublished. Callers omit the field entirely on None.
pub fn score_label(dimension: ScoreDimension, score: f64) -> Option<String> {
    if !dimension.always_published() && score < PUBLISH_THRESHOLD {
        return None;
    }
    let (low, high) = dimension.breakpoints();
    let labels = dimension.tier_labels();
    let tier = if score < low {
        labels[0]
    } else if score < high {
        labels[1]
    } else {
        labels[2]
    };
    Some(format!("{tier} ({score:.2}/1.0)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 15, 30, 0).unwrap()
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        assert_eq!(average(&[3.0, 2.0, 4.0]), Some(3.0));
        assert_eq!(average(&[1.0, 2.0]), Some(1.5));
        assert_eq!(average(&[1.0, 1.0, 2.0]), Some(1.33));
    }

    #[test]
    fn average_of_empty_is_none() {
        assert_eq!(average(&[]), None);
    }

    #[test]
    fn day_offset_today_is_zero() {
        assert_eq!(day_offset(Some("2026-03-10"), now()), Some(0));
    }

    #[test]
    fn day_offset_three_days_back() {
        assert_eq!(day_offset(Some("2026-03-07"), now()), Some(3));
    }

    #[test]
    fn day_offset_future_clamps_to_zero() {
        assert_eq!(day_offset(Some("2026-03-14"), now()), Some(0));
    }

    #[test]
    fn day_offset_accepts_rfc3339_timestamps() {
        assert_eq!(day_offset(Some("2026-03-07T22:15:00Z"), now()), Some(3));
    }

    #[test]
    fn day_offset_invalid_or_missing_is_none() {
        assert_eq!(day_offset(Some("last tuesday"), now()), None);
        assert_eq!(day_offset(None, now()), None);
    }

    #[test]
    fn freshness_labels() {
        assert_eq!(freshness_label(0), "current");
        assert_eq!(freshness_label(1), "1 day behind");
        assert_eq!(freshness_label(6), "6 days behind");
    }

    #[test]
    fn crisis_above_threshold_is_published() {
        let label = score_label(ScoreDimension::CrisisIntensity, 0.80).unwrap();
        assert_eq!(label, "Elevated (0.80/1.0)");
    }

    #[test]
    fn crisis_below_threshold_is_withheld() {
        assert_eq!(score_label(ScoreDimension::CrisisIntensity, 0.50), None);
    }

    #[test]
    fn moment_mid_tier() {
        let label = score_label(ScoreDimension::MomentSignificance, 0.68).unwrap();
        assert!(label.starts_with("Significant"), "got: {label}");
    }

    #[test]
    fn detail_level_always_published() {
        let label = score_label(ScoreDimension::DetailLevel, 0.10).unwrap();
        assert_eq!(label, "Brief (0.10/1.0)");
        let label = score_label(ScoreDimension::DetailLevel, 0.90).unwrap();
        assert_eq!(label, "Detailed (0.90/1.0)");
    }

    #[test]
    fn effectiveness_top_tier() {
        let label = score_label(ScoreDimension::StrategyEffectiveness, 0.92).unwrap();
        assert_eq!(label, "Highly Effective (0.92/1.0)");
    }
}
