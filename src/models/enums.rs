use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serde goes through the same string vocabulary, so the wire format and the
/// storage format cannot drift apart.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(CoreError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(CertificateType {
    WorkcoverCertificate => "workcover_certificate",
    GpReport => "gp_report",
    SpecialistReport => "specialist_report",
    Other => "other",
});

str_enum!(WorkCapacity {
    Fit => "fit",
    Partial => "partial",
    Unfit => "unfit",
    Unknown => "unknown",
});

str_enum!(IngestionSource {
    WorkerUpload => "worker_upload",
    EmailAttachment => "email_attachment",
    ApiUpload => "api_upload",
});

str_enum!(ExpiryAlertLevel {
    Info => "info",
    Warning => "warning",
    Critical => "critical",
});

str_enum!(WorkStatus {
    AtWork => "At work",
    OffWork => "Off work",
    ModifiedDuties => "Modified duties",
});

str_enum!(RiskLevel {
    Low => "Low",
    Medium => "Medium",
    High => "High",
});

str_enum!(ComplianceStatus {
    Compliant => "compliant",
    NonCompliant => "non_compliant",
    AtRisk => "at_risk",
});

str_enum!(RtwPlanStatus {
    NotPlanned => "not_planned",
    InProgress => "in_progress",
    Failing => "failing",
    Complete => "complete",
});

str_enum!(SpecialistStatus {
    None => "none",
    Referred => "referred",
    AppointmentBooked => "appointment_booked",
    Seen => "seen",
});

str_enum!(FlagCode {
    MissingTreatmentPlan => "MISSING_TREATMENT_PLAN",
    NoRecentCertificate => "NO_RECENT_CERTIFICATE",
    WorkerNonCompliant => "WORKER_NON_COMPLIANT",
    RtwPlanFailing => "RTW_PLAN_FAILING",
    SpecialistReferredNoAppointment => "SPECIALIST_REFERRED_NO_APPOINTMENT",
});

str_enum!(ActionType {
    EscalateNonComplianceToInsurer => "ESCALATE_NON_COMPLIANCE_TO_INSURER",
    RequestSpecialistAppointmentStatus => "REQUEST_SPECIALIST_APPOINTMENT_STATUS",
    RequestUpdatedCertificate => "REQUEST_UPDATED_CERTIFICATE",
    ScheduleCaseReview => "SCHEDULE_CASE_REVIEW",
});

str_enum!(ActionTarget {
    Worker => "WORKER",
    Employer => "EMPLOYER",
    Insurer => "INSURER",
    CaseManager => "CASE_MANAGER",
});

str_enum!(DutySafetyStatus {
    Safe => "safe",
    Unsafe => "unsafe",
    Unknown => "unknown",
});

str_enum!(RiskTier {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(FactorImpact {
    Positive => "positive",
    Negative => "negative",
});

/// Flag severity. Ordering matters: info < warning < high_risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FlagSeverity {
    /// Informational: surfaced in the case narrative only.
    Info,
    /// Attention needed during routine case management.
    Warning,
    /// Escalation warranted: surfaced immediately to the case manager.
    HighRisk,
}

impl FlagSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::HighRisk => "high_risk",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn round_trip_certificate_type() {
        for s in ["workcover_certificate", "gp_report", "specialist_report", "other"] {
            assert_eq!(CertificateType::from_str(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn unknown_value_rejected() {
        assert!(WorkCapacity::from_str("sideways").is_err());
        assert!(RiskLevel::from_str("Extreme").is_err());
    }

    #[test]
    fn severity_ordering() {
        assert!(FlagSeverity::Info < FlagSeverity::Warning);
        assert!(FlagSeverity::Warning < FlagSeverity::HighRisk);
    }

    #[test]
    fn serde_uses_the_string_vocabulary() {
        assert_eq!(
            serde_json::to_value(FlagCode::MissingTreatmentPlan).unwrap(),
            serde_json::json!("MISSING_TREATMENT_PLAN")
        );
        assert_eq!(
            serde_json::to_value(FlagSeverity::HighRisk).unwrap(),
            serde_json::json!("high_risk")
        );
        let status: WorkStatus = serde_json::from_value(serde_json::json!("Off work")).unwrap();
        assert_eq!(status, WorkStatus::OffWork);
    }

    #[test]
    fn work_status_uses_display_strings() {
        assert_eq!(WorkStatus::from_str("At work").unwrap(), WorkStatus::AtWork);
        assert_eq!(WorkStatus::ModifiedDuties.as_str(), "Modified duties");
    }
}
