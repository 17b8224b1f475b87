use serde::{Deserialize, Serialize};

use super::CasePrediction;
use crate::models::enums::RiskTier;

/// Probability at or above which a case counts as a likely RTW.
pub const HIGH_RTW_THRESHOLD: f64 = 70.0;

/// Probability below which a case counts as an unlikely RTW.
pub const LOW_RTW_THRESHOLD: f64 = 50.0;

/// Portfolio-level aggregate over a batch of predictions, surfaced to
/// dashboards and reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PredictionSummary {
    pub total_cases: usize,
    pub avg_rtw_probability: f64,
    pub avg_expected_weeks: f64,
    pub high_rtw_count: usize,
    pub low_rtw_count: usize,
    pub high_escalation_count: usize,
}

/// Aggregate a batch of predictions. An empty batch yields the all-zero
/// summary rather than an error or a NaN average.
pub fn summarize_predictions(predictions: &[CasePrediction]) -> PredictionSummary {
    if predictions.is_empty() {
        return PredictionSummary::default();
    }

    let total = predictions.len();
    let avg_rtw_probability =
        predictions.iter().map(|p| p.rtw_probability).sum::<f64>() / total as f64;
    let avg_expected_weeks = predictions
        .iter()
        .map(|p| p.expected_weeks_to_rtw as f64)
        .sum::<f64>()
        / total as f64;

    PredictionSummary {
        total_cases: total,
        avg_rtw_probability,
        avg_expected_weeks,
        high_rtw_count: predictions
            .iter()
            .filter(|p| p.rtw_probability >= HIGH_RTW_THRESHOLD)
            .count(),
        low_rtw_count: predictions
            .iter()
            .filter(|p| p.rtw_probability < LOW_RTW_THRESHOLD)
            .count(),
        high_escalation_count: predictions
            .iter()
            .filter(|p| p.escalation_risk == RiskTier::High)
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::FactorImpact;
    use crate::prediction::factors::MODEL_VERSION;
    use crate::prediction::PredictionFactor;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn make_prediction(probability: f64, weeks: u32) -> CasePrediction {
        CasePrediction {
            case_id: Uuid::new_v4(),
            rtw_probability: probability,
            expected_weeks_to_rtw: weeks,
            escalation_risk: RiskTier::Low,
            cost_risk: RiskTier::Low,
            deterioration_risk: RiskTier::Low,
            confidence: 60,
            factors: vec![PredictionFactor {
                feature: "baseline".into(),
                value: "50".into(),
                impact: FactorImpact::Positive,
                weight: 50.0,
                description: "Population baseline RTW probability".into(),
            }],
            model_version: MODEL_VERSION.into(),
            generated_at: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn empty_batch_yields_all_zero_summary() {
        let summary = summarize_predictions(&[]);
        assert_eq!(summary.total_cases, 0);
        assert_eq!(summary.avg_rtw_probability, 0.0);
        assert_eq!(summary.avg_expected_weeks, 0.0);
        assert_eq!(summary.high_rtw_count, 0);
        assert_eq!(summary.low_rtw_count, 0);
        assert_eq!(summary.high_escalation_count, 0);
    }

    #[test]
    fn known_batch_aggregates_exactly() {
        let predictions = vec![
            make_prediction(80.0, 0),
            make_prediction(40.0, 10),
            make_prediction(60.0, 5),
        ];
        let summary = summarize_predictions(&predictions);
        assert_eq!(summary.total_cases, 3);
        assert!((summary.avg_rtw_probability - 60.0).abs() < 1e-9);
        assert!((summary.avg_expected_weeks - 5.0).abs() < 1e-9);
        assert_eq!(summary.high_rtw_count, 1, "only 80 reaches 70");
        assert_eq!(summary.low_rtw_count, 1, "only 40 is under 50");
    }

    #[test]
    fn thresholds_are_inclusive_exclusive_as_specified() {
        let predictions = vec![make_prediction(70.0, 0), make_prediction(50.0, 0)];
        let summary = summarize_predictions(&predictions);
        // 70 counts as high (>=), 50 does not count as low (<).
        assert_eq!(summary.high_rtw_count, 1);
        assert_eq!(summary.low_rtw_count, 0);
    }

    #[test]
    fn escalation_tier_counted() {
        let mut high = make_prediction(30.0, 12);
        high.escalation_risk = RiskTier::High;
        let summary = summarize_predictions(&[high, make_prediction(90.0, 0)]);
        assert_eq!(summary.high_escalation_count, 1);
    }
}
