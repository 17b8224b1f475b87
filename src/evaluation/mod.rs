pub mod messages;
pub mod rules;
pub mod types;

use chrono::{Local, NaiveDate};

use crate::models::enums::{ComplianceStatus, DutySafetyStatus, RiskLevel, RtwPlanStatus};
use crate::models::CaseSnapshot;

use rules::{RuleContext, CLINICAL_RULES};
pub use types::{ClinicalEvaluation, ClinicalFlag, RecommendedAction};

/// Evaluate a case as of the local date.
pub fn evaluate_case(case: &CaseSnapshot) -> ClinicalEvaluation {
    evaluate_case_at(case, Local::now().date_naive())
}

/// Evaluate a case snapshot against the clinical rule table.
///
/// Every rule runs independently in table order; all fired flags are kept.
/// The result is complete for any well-formed snapshot — a minimal empty case
/// yields flags (missing plan, no certificate), never an error.
pub fn evaluate_case_at(case: &CaseSnapshot, today: NaiveDate) -> ClinicalEvaluation {
    let ctx = RuleContext { case, today };

    let mut flags = Vec::new();
    let mut recommended_actions = Vec::new();
    for rule in CLINICAL_RULES {
        if (rule.applies)(&ctx) {
            flags.push(rule.build_flag(&ctx));
            if let Some(action) = rule.action {
                recommended_actions.push(action(&ctx));
            }
        }
    }

    let duty_safety_status = derive_duty_safety(case, ctx.has_current_certificate());
    let evaluation = ClinicalEvaluation {
        case_id: case.id,
        has_current_treatment_plan: case.has_treatment_evidence(),
        has_current_certificate: ctx.has_current_certificate(),
        duty_safety_status,
        is_improving_on_expected_timeline: case.rtw_plan_status != RtwPlanStatus::Failing,
        flags,
        recommended_actions,
        evaluated_at: Local::now().naive_local(),
    };

    tracing::info!(
        case_id = %case.id,
        flags = evaluation.flags.len(),
        high_risk = evaluation.high_risk_count(),
        actions = evaluation.recommended_actions.len(),
        duty_safety = evaluation.duty_safety_status.as_str(),
        "Clinical evaluation complete"
    );

    evaluation
}

/// Duty safety verdict. Continuing current duties is unsafe when a high-risk,
/// non-compliant worker has active medical constraints; safe when the worker
/// is compliant with a current certificate; otherwise there is not enough
/// signal to call it.
fn derive_duty_safety(case: &CaseSnapshot, has_current_certificate: bool) -> DutySafetyStatus {
    if case.compliance_status == ComplianceStatus::NonCompliant
        && case.risk_level == RiskLevel::High
        && !case.medical_constraints.is_empty()
    {
        return DutySafetyStatus::Unsafe;
    }
    if case.compliance_status == ComplianceStatus::Compliant && has_current_certificate {
        return DutySafetyStatus::Safe;
    }
    DutySafetyStatus::Unknown
}
