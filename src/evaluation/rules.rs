// The clinical rule table. Each rule is an independent predicate over the
// case snapshot plus builders for its flag and optional action. Rules are
// evaluated in table order with no early exit: several rules firing on the
// same snapshot all contribute their flags.

use chrono::NaiveDate;

use crate::models::enums::{
    ActionTarget, ActionType, ComplianceStatus, FlagCode, FlagSeverity, RiskLevel,
    RtwPlanStatus, SpecialistStatus,
};
use crate::models::CaseSnapshot;

use super::messages::MessageTemplates;
use super::types::{ClinicalFlag, RecommendedAction};

/// How far back a certificate still counts as current.
pub const EVALUATION_WINDOW_DAYS: i64 = 28;

/// Snapshot plus evaluation date, handed to every rule.
pub struct RuleContext<'a> {
    pub case: &'a CaseSnapshot,
    pub today: NaiveDate,
}

impl RuleContext<'_> {
    /// A certificate is current when one is on file and its issue date is
    /// within the evaluation window. A certificate with no recorded issue
    /// date is taken at face value rather than flagged on missing metadata.
    pub fn has_current_certificate(&self) -> bool {
        if !self.case.has_certificate {
            return false;
        }
        match self.case.latest_certificate_date {
            Some(date) => (self.today - date).num_days() <= EVALUATION_WINDOW_DAYS,
            None => true,
        }
    }
}

/// One row of the rule table: predicate, flag builders, optional action.
pub struct ClinicalRule {
    pub code: FlagCode,
    pub applies: fn(&RuleContext) -> bool,
    pub severity: fn(&RuleContext) -> FlagSeverity,
    pub message: fn(&RuleContext) -> String,
    pub action: Option<fn(&RuleContext) -> RecommendedAction>,
}

impl ClinicalRule {
    pub fn build_flag(&self, ctx: &RuleContext) -> ClinicalFlag {
        ClinicalFlag {
            code: self.code,
            severity: (self.severity)(ctx),
            message: (self.message)(ctx),
        }
    }
}

fn warning(_ctx: &RuleContext) -> FlagSeverity {
    FlagSeverity::Warning
}

fn high_risk(_ctx: &RuleContext) -> FlagSeverity {
    FlagSeverity::HighRisk
}

// ── Rule predicates ─────────────────────────────────────────────────

fn no_treatment_evidence(ctx: &RuleContext) -> bool {
    !ctx.case.has_treatment_evidence()
}

fn no_recent_certificate(ctx: &RuleContext) -> bool {
    !ctx.has_current_certificate()
}

fn worker_non_compliant(ctx: &RuleContext) -> bool {
    ctx.case.compliance_status == ComplianceStatus::NonCompliant
}

fn rtw_plan_failing(ctx: &RuleContext) -> bool {
    ctx.case.rtw_plan_status == RtwPlanStatus::Failing
}

fn specialist_referred_no_appointment(ctx: &RuleContext) -> bool {
    ctx.case.specialist_status == SpecialistStatus::Referred
}

// ── Severity / message / action builders ────────────────────────────

/// Non-compliance escalates from warning to high risk for high-risk cases.
fn non_compliance_severity(ctx: &RuleContext) -> FlagSeverity {
    if ctx.case.risk_level == RiskLevel::High {
        FlagSeverity::HighRisk
    } else {
        FlagSeverity::Warning
    }
}

fn missing_treatment_plan_message(_ctx: &RuleContext) -> String {
    MessageTemplates::missing_treatment_plan()
}

fn no_recent_certificate_message(_ctx: &RuleContext) -> String {
    MessageTemplates::no_recent_certificate(EVALUATION_WINDOW_DAYS)
}

fn non_compliance_message(ctx: &RuleContext) -> String {
    MessageTemplates::worker_non_compliant(ctx.case.risk_level)
}

fn rtw_plan_failing_message(_ctx: &RuleContext) -> String {
    MessageTemplates::rtw_plan_failing()
}

fn specialist_message(_ctx: &RuleContext) -> String {
    MessageTemplates::specialist_referred_no_appointment()
}

fn request_certificate_action(_ctx: &RuleContext) -> RecommendedAction {
    RecommendedAction {
        action_type: ActionType::RequestUpdatedCertificate,
        target: ActionTarget::Worker,
        rationale: MessageTemplates::rationale_request_certificate(),
    }
}

fn escalate_non_compliance_action(_ctx: &RuleContext) -> RecommendedAction {
    RecommendedAction {
        action_type: ActionType::EscalateNonComplianceToInsurer,
        target: ActionTarget::Insurer,
        rationale: MessageTemplates::rationale_escalate_non_compliance(),
    }
}

fn schedule_review_action(_ctx: &RuleContext) -> RecommendedAction {
    RecommendedAction {
        action_type: ActionType::ScheduleCaseReview,
        target: ActionTarget::CaseManager,
        rationale: MessageTemplates::rationale_schedule_review(),
    }
}

fn chase_specialist_action(_ctx: &RuleContext) -> RecommendedAction {
    RecommendedAction {
        action_type: ActionType::RequestSpecialistAppointmentStatus,
        target: ActionTarget::Worker,
        rationale: MessageTemplates::rationale_chase_specialist(),
    }
}

// ── The table ───────────────────────────────────────────────────────

/// Fixed, deterministic evaluation order. Flags are appended in this order.
pub const CLINICAL_RULES: &[ClinicalRule] = &[
    ClinicalRule {
        code: FlagCode::MissingTreatmentPlan,
        applies: no_treatment_evidence,
        severity: warning,
        message: missing_treatment_plan_message,
        action: None,
    },
    ClinicalRule {
        code: FlagCode::NoRecentCertificate,
        applies: no_recent_certificate,
        severity: warning,
        message: no_recent_certificate_message,
        action: Some(request_certificate_action),
    },
    ClinicalRule {
        code: FlagCode::WorkerNonCompliant,
        applies: worker_non_compliant,
        severity: non_compliance_severity,
        message: non_compliance_message,
        action: Some(escalate_non_compliance_action),
    },
    ClinicalRule {
        code: FlagCode::RtwPlanFailing,
        applies: rtw_plan_failing,
        severity: high_risk,
        message: rtw_plan_failing_message,
        action: Some(schedule_review_action),
    },
    ClinicalRule {
        code: FlagCode::SpecialistReferredNoAppointment,
        applies: specialist_referred_no_appointment,
        severity: warning,
        message: specialist_message,
        action: Some(chase_specialist_action),
    },
];
