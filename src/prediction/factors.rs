// The weighted-factor table behind the outcome predictor. This is not a
// trained model: it is an explicit, versioned list of (feature, condition,
// delta, explanation) entries. The same table produces both the score and the
// factor explanation, so the two cannot diverge.

use chrono::NaiveDate;

use crate::models::enums::{ComplianceStatus, RiskLevel, RtwPlanStatus, WorkStatus};
use crate::models::CaseSnapshot;

/// Bumped whenever a weight or condition changes.
pub const MODEL_VERSION: &str = "rtw-factor/1.2.0";

/// Starting probability before any factor is applied.
pub const BASELINE_PROBABILITY: f64 = 50.0;

/// Weeks off work after which duration itself starts dragging the outcome.
pub const CHRONICITY_THRESHOLD_WEEKS: i64 = 14;

/// Per-week penalty beyond the chronicity threshold, and its floor.
pub const CHRONICITY_WEEKLY_PENALTY: f64 = 1.5;
pub const CHRONICITY_MAX_PENALTY: f64 = 25.0;

/// A fired factor: the signed probability delta plus the display value and
/// explanation that end up in the prediction's factor list.
pub struct FactorOutcome {
    pub delta: f64,
    pub value: String,
    pub description: String,
}

/// One row of the factor table.
pub struct FactorRule {
    pub feature: &'static str,
    pub eval: fn(&CaseSnapshot, NaiveDate) -> Option<FactorOutcome>,
}

fn work_status_factor(case: &CaseSnapshot, _today: NaiveDate) -> Option<FactorOutcome> {
    let (delta, description) = match case.work_status {
        WorkStatus::AtWork => (25.0, "Already at work: the strongest positive signal"),
        WorkStatus::ModifiedDuties => (12.0, "On modified duties: partial reintegration underway"),
        WorkStatus::OffWork => return None,
    };
    Some(FactorOutcome {
        delta,
        value: case.work_status.as_str().to_string(),
        description: description.to_string(),
    })
}

fn risk_level_factor(case: &CaseSnapshot, _today: NaiveDate) -> Option<FactorOutcome> {
    let (delta, description) = match case.risk_level {
        RiskLevel::Low => (10.0, "Low assessed case risk"),
        RiskLevel::Medium => return None,
        RiskLevel::High => (-15.0, "High assessed case risk"),
    };
    Some(FactorOutcome {
        delta,
        value: case.risk_level.as_str().to_string(),
        description: description.to_string(),
    })
}

fn compliance_factor(case: &CaseSnapshot, _today: NaiveDate) -> Option<FactorOutcome> {
    let (delta, description) = match case.compliance_status {
        ComplianceStatus::Compliant => (10.0, "Worker compliant with treatment and RTW obligations"),
        ComplianceStatus::AtRisk => return None,
        ComplianceStatus::NonCompliant => (-15.0, "Worker non-compliant with obligations"),
    };
    Some(FactorOutcome {
        delta,
        value: case.compliance_status.as_str().to_string(),
        description: description.to_string(),
    })
}

fn certificate_factor(case: &CaseSnapshot, _today: NaiveDate) -> Option<FactorOutcome> {
    if !case.has_certificate {
        return None;
    }
    Some(FactorOutcome {
        delta: 5.0,
        value: "present".to_string(),
        description: "Medical certificate on file".to_string(),
    })
}

/// Time decay: probability falls as the claim ages past the chronicity
/// threshold. Monotone in weeks elapsed, floored so an old claim is penalised
/// but not written off.
fn weeks_elapsed_factor(case: &CaseSnapshot, today: NaiveDate) -> Option<FactorOutcome> {
    let weeks = case.weeks_since_injury(today)?;
    if weeks <= CHRONICITY_THRESHOLD_WEEKS {
        return None;
    }
    let penalty = (CHRONICITY_WEEKLY_PENALTY * (weeks - CHRONICITY_THRESHOLD_WEEKS) as f64)
        .min(CHRONICITY_MAX_PENALTY);
    Some(FactorOutcome {
        delta: -penalty,
        value: format!("{weeks} weeks"),
        description: format!(
            "Injury duration beyond {CHRONICITY_THRESHOLD_WEEKS} weeks reduces RTW likelihood"
        ),
    })
}

fn rtw_plan_factor(case: &CaseSnapshot, _today: NaiveDate) -> Option<FactorOutcome> {
    let (delta, description) = match case.rtw_plan_status {
        RtwPlanStatus::InProgress => (8.0, "Active RTW plan in progress"),
        RtwPlanStatus::Failing => (-12.0, "RTW plan failing against its timeline"),
        RtwPlanStatus::NotPlanned | RtwPlanStatus::Complete => return None,
    };
    Some(FactorOutcome {
        delta,
        value: case.rtw_plan_status.as_str().to_string(),
        description: description.to_string(),
    })
}

/// Evaluated in order; each entry contributes at most one factor.
pub const FACTOR_TABLE: &[FactorRule] = &[
    FactorRule { feature: "workStatus", eval: work_status_factor },
    FactorRule { feature: "riskLevel", eval: risk_level_factor },
    FactorRule { feature: "complianceIndicator", eval: compliance_factor },
    FactorRule { feature: "hasCertificate", eval: certificate_factor },
    FactorRule { feature: "weeksElapsed", eval: weeks_elapsed_factor },
    FactorRule { feature: "rtwPlanStatus", eval: rtw_plan_factor },
];
