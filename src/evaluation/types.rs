use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::enums::{ActionTarget, ActionType, DutySafetyStatus, FlagCode, FlagSeverity};

// ---------------------------------------------------------------------------
// ClinicalFlag
// ---------------------------------------------------------------------------

/// One explainable observation about a case. The message is the
/// explainability contract: it is always non-empty and states, in case-manager
/// language, why the flag fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalFlag {
    pub code: FlagCode,
    pub severity: FlagSeverity,
    pub message: String,
}

// ---------------------------------------------------------------------------
// RecommendedAction
// ---------------------------------------------------------------------------

/// A targeted follow-up generated by a triggered rule, never globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAction {
    pub action_type: ActionType,
    pub target: ActionTarget,
    pub rationale: String,
}

// ---------------------------------------------------------------------------
// ClinicalEvaluation
// ---------------------------------------------------------------------------

/// Full evaluation of one case snapshot. Derived fresh on every call; nothing
/// here has a persisted lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalEvaluation {
    pub case_id: Uuid,
    pub has_current_treatment_plan: bool,
    pub has_current_certificate: bool,
    pub duty_safety_status: DutySafetyStatus,
    pub is_improving_on_expected_timeline: bool,
    pub flags: Vec<ClinicalFlag>,
    pub recommended_actions: Vec<RecommendedAction>,
    pub evaluated_at: NaiveDateTime,
}

impl ClinicalEvaluation {
    pub fn has_flag(&self, code: FlagCode) -> bool {
        self.flags.iter().any(|f| f.code == code)
    }

    pub fn high_risk_count(&self) -> usize {
        self.flags
            .iter()
            .filter(|f| f.severity == FlagSeverity::HighRisk)
            .count()
    }
}
