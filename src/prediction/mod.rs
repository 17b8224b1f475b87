pub mod factors;
pub mod summary;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::{
    ComplianceStatus, FactorImpact, RiskLevel, RiskTier, RtwPlanStatus, WorkStatus,
};
use crate::models::CaseSnapshot;

use factors::{BASELINE_PROBABILITY, FACTOR_TABLE, MODEL_VERSION};
pub use summary::{summarize_predictions, PredictionSummary};

// ---------------------------------------------------------------------------
// PredictionFactor & CasePrediction
// ---------------------------------------------------------------------------

/// One entry of the prediction's explanation. Reconstructible from the factor
/// table: baseline plus the signed weights sums to the pre-clamp probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFactor {
    pub feature: String,
    pub value: String,
    pub impact: FactorImpact,
    pub weight: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasePrediction {
    pub case_id: Uuid,
    /// Return-to-work probability, 0..=100.
    pub rtw_probability: f64,
    pub expected_weeks_to_rtw: u32,
    pub escalation_risk: RiskTier,
    pub cost_risk: RiskTier,
    pub deterioration_risk: RiskTier,
    /// Model self-assessed confidence, 50..=95.
    pub confidence: u8,
    pub factors: Vec<PredictionFactor>,
    pub model_version: String,
    pub generated_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// A factor whose weight reaches this is a strong signal and raises the
/// model's confidence in its own output.
const STRONG_SIGNAL_WEIGHT: f64 = 10.0;

const CONFIDENCE_FLOOR: u8 = 50;
const CONFIDENCE_CEILING: u8 = 95;

/// Predict a case as of the local date.
pub fn predict_case(case: &CaseSnapshot) -> CasePrediction {
    predict_case_at(case, Local::now().date_naive())
}

/// Compute the weighted-factor prediction for one case snapshot.
///
/// Deterministic and explainable by construction: the probability is the
/// baseline plus every fired factor's delta, clamped to [0,100], and the
/// factor list always contains at least the baseline entry.
pub fn predict_case_at(case: &CaseSnapshot, today: NaiveDate) -> CasePrediction {
    let mut probability = BASELINE_PROBABILITY;
    let mut factors = vec![PredictionFactor {
        feature: "baseline".to_string(),
        value: format!("{BASELINE_PROBABILITY:.0}"),
        impact: FactorImpact::Positive,
        weight: BASELINE_PROBABILITY,
        description: "Population baseline RTW probability".to_string(),
    }];

    let mut strong_signals = 0u8;
    for rule in FACTOR_TABLE {
        let Some(outcome) = (rule.eval)(case, today) else {
            continue;
        };
        probability += outcome.delta;
        if outcome.delta.abs() >= STRONG_SIGNAL_WEIGHT {
            strong_signals += 1;
        }
        factors.push(PredictionFactor {
            feature: rule.feature.to_string(),
            value: outcome.value,
            impact: if outcome.delta >= 0.0 {
                FactorImpact::Positive
            } else {
                FactorImpact::Negative
            },
            weight: outcome.delta.abs(),
            description: outcome.description,
        });
    }

    let rtw_probability = probability.clamp(0.0, 100.0);
    let weeks_elapsed = case.weeks_since_injury(today).unwrap_or(0);

    let prediction = CasePrediction {
        case_id: case.id,
        rtw_probability,
        expected_weeks_to_rtw: expected_weeks(case),
        escalation_risk: escalation_risk(case, weeks_elapsed),
        cost_risk: cost_risk(case, weeks_elapsed),
        deterioration_risk: deterioration_risk(case, weeks_elapsed),
        confidence: (CONFIDENCE_FLOOR + 10 * strong_signals).min(CONFIDENCE_CEILING),
        factors,
        model_version: MODEL_VERSION.to_string(),
        generated_at: Local::now().naive_local(),
    };

    tracing::debug!(
        case_id = %case.id,
        probability = prediction.rtw_probability,
        expected_weeks = prediction.expected_weeks_to_rtw,
        confidence = prediction.confidence,
        factors = prediction.factors.len(),
        "Case prediction computed"
    );

    prediction
}

/// Timeframe estimate. A worker already at work has nothing left to return
/// to, so the answer is zero regardless of every other attribute.
fn expected_weeks(case: &CaseSnapshot) -> u32 {
    if case.work_status == WorkStatus::AtWork {
        return 0;
    }
    let mut weeks: i64 = match case.work_status {
        WorkStatus::ModifiedDuties => 4,
        _ => 8,
    };
    if case.risk_level == RiskLevel::High {
        weeks += 4;
    }
    match case.rtw_plan_status {
        RtwPlanStatus::Failing => weeks += 4,
        RtwPlanStatus::InProgress => weeks -= 2,
        _ => {}
    }
    weeks.max(0) as u32
}

fn escalation_risk(case: &CaseSnapshot, weeks_elapsed: i64) -> RiskTier {
    if case.risk_level == RiskLevel::High && weeks_elapsed > 8 {
        RiskTier::High
    } else if case.risk_level == RiskLevel::High
        || case.rtw_plan_status == RtwPlanStatus::Failing
    {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

fn cost_risk(case: &CaseSnapshot, weeks_elapsed: i64) -> RiskTier {
    let off_work = case.work_status == WorkStatus::OffWork;
    if off_work && weeks_elapsed > 12 {
        RiskTier::High
    } else if off_work || weeks_elapsed > 12 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Non-compliance forces the deterioration tier to high: a worker outside
/// their treatment plan is the strongest known predictor of decline.
fn deterioration_risk(case: &CaseSnapshot, weeks_elapsed: i64) -> RiskTier {
    if case.compliance_status == ComplianceStatus::NonCompliant {
        RiskTier::High
    } else if case.rtw_plan_status == RtwPlanStatus::Failing {
        RiskTier::High
    } else if case.work_status == WorkStatus::OffWork && weeks_elapsed > 8 {
        RiskTier::Medium
    } else {
        RiskTier::Low
    }
}

/// Predict a list of cases, preserving input order. Cases are independent;
/// no prediction reads another's result.
pub fn predict_cases(cases: &[CaseSnapshot], today: NaiveDate) -> Vec<CasePrediction> {
    cases.iter().map(|c| predict_case_at(c, today)).collect()
}
