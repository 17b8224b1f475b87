use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{
    ComplianceStatus, RiskLevel, RtwPlanStatus, SpecialistStatus, WorkStatus,
};

/// Read-consistent snapshot of a case, fetched by the storage layer and passed
/// to the evaluator and predictor. Every field is required or defaulted so the
/// rule tables never probe for attribute presence. The core never mutates a
/// case; it only derives results from a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub id: Uuid,
    pub work_status: WorkStatus,
    pub risk_level: RiskLevel,
    pub compliance_status: ComplianceStatus,
    pub has_certificate: bool,
    /// Issue date of the most recent certificate on file, if any.
    pub latest_certificate_date: Option<NaiveDate>,
    pub date_of_injury: Option<NaiveDate>,
    pub rtw_plan_status: RtwPlanStatus,
    pub specialist_status: SpecialistStatus,
    pub medical_constraints: Vec<String>,
    pub functional_capacity: Option<String>,
}

impl Default for CaseSnapshot {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            work_status: WorkStatus::OffWork,
            risk_level: RiskLevel::Medium,
            compliance_status: ComplianceStatus::AtRisk,
            has_certificate: false,
            latest_certificate_date: None,
            date_of_injury: None,
            rtw_plan_status: RtwPlanStatus::NotPlanned,
            specialist_status: SpecialistStatus::None,
            medical_constraints: Vec::new(),
            functional_capacity: None,
        }
    }
}

impl CaseSnapshot {
    /// Whether any treatment-plan evidence is on file: either recorded
    /// medical constraints or an assessed functional capacity.
    pub fn has_treatment_evidence(&self) -> bool {
        !self.medical_constraints.is_empty()
            || self
                .functional_capacity
                .as_ref()
                .is_some_and(|fc| !fc.trim().is_empty())
    }

    /// Whole weeks elapsed since the injury, as of `today`.
    /// Future-dated injuries count as zero.
    pub fn weeks_since_injury(&self, today: NaiveDate) -> Option<i64> {
        self.date_of_injury
            .map(|d| (today - d).num_days().max(0) / 7)
    }
}
