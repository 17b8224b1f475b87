use crate::models::enums::RiskLevel;

/// Message template builder for flags and action rationales.
/// Every template produces a non-empty, case-manager-facing sentence that
/// states what was observed — flags with empty messages are a contract
/// violation, not a formatting choice.
pub struct MessageTemplates;

impl MessageTemplates {
    pub fn missing_treatment_plan() -> String {
        "No treatment plan evidence on file: the case has no recorded medical \
         constraints or functional capacity assessment."
            .to_string()
    }

    pub fn no_recent_certificate(window_days: i64) -> String {
        format!(
            "No medical certificate on file within the last {window_days} days. \
             The clinical picture may be out of date."
        )
    }

    pub fn worker_non_compliant(risk: RiskLevel) -> String {
        format!(
            "The worker is recorded as non-compliant with their treatment or \
             RTW obligations (case risk level: {}).",
            risk.as_str()
        )
    }

    pub fn rtw_plan_failing() -> String {
        "The return-to-work plan is failing: the case is not tracking against \
         its expected recovery timeline."
            .to_string()
    }

    pub fn specialist_referred_no_appointment() -> String {
        "A specialist referral was made but no appointment has been booked. \
         The referral may have stalled."
            .to_string()
    }

    // ── Action rationales ───────────────────────────────────────────

    pub fn rationale_request_certificate() -> String {
        "An up-to-date certificate is needed to confirm current capacity.".to_string()
    }

    pub fn rationale_escalate_non_compliance() -> String {
        "Sustained non-compliance affects liability and should be reviewed by \
         the insurer."
            .to_string()
    }

    pub fn rationale_schedule_review() -> String {
        "A failing RTW plan needs a case conference to reset the plan.".to_string()
    }

    pub fn rationale_chase_specialist() -> String {
        "Confirming the specialist appointment keeps the referral moving.".to_string()
    }
}
