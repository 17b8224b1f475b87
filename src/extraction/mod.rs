// Certificate field extraction: an ordered set of independent pattern
// matchers, one per field, each producing (value, confidence). Matchers never
// read each other's results, so adding or removing one cannot change the
// others' behavior.

pub mod classify;
pub mod confidence;
pub mod matchers;

use crate::models::CertificateExtraction;

use classify::classify_certificate_type;
use matchers::{
    match_diagnosis, match_doctor_name, match_end_date, match_hours_per_week,
    match_restrictions, match_start_date, match_work_capacity,
};

/// Run every field matcher over the raw certificate text.
///
/// Fields with no match come back absent with confidence 0 — a wrong guess is
/// worse than a reported absence. The result is immutable once built.
pub fn extract_certificate_data(text: &str, filename: &str) -> CertificateExtraction {
    CertificateExtraction {
        certificate_type: classify_certificate_type(text, filename),
        start_date: match_start_date(text),
        end_date: match_end_date(text),
        work_capacity: match_work_capacity(text),
        restrictions: match_restrictions(text),
        hours_per_week: match_hours_per_week(text),
        diagnosis: match_diagnosis(text),
        doctor_name: match_doctor_name(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::{CertificateType, WorkCapacity};
    use chrono::NaiveDate;

    const SAMPLE_CERT: &str = "\
WORKCOVER MEDICAL CERTIFICATE

Worker: Jamie Chen
Diagnosis: lumbar disc strain
Treating doctor: Dr Priya Sharma

The worker has partial capacity for suitable duties
from 04/03/2024 to 01/04/2024.

May work up to 20 hours per week.

Restrictions:
- No lifting over 10kg
- No repetitive bending
";

    #[test]
    fn full_certificate_extracts_every_field() {
        let extraction = extract_certificate_data(SAMPLE_CERT, "workcover_cert.pdf");

        assert_eq!(
            extraction.certificate_type.value,
            Some(CertificateType::WorkcoverCertificate)
        );
        assert_eq!(
            extraction.start_date.value,
            Some(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap())
        );
        assert_eq!(
            extraction.end_date.value,
            Some(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap())
        );
        assert_eq!(extraction.work_capacity.value, Some(WorkCapacity::Partial));
        assert_eq!(extraction.hours_per_week.value, Some(20.0));
        assert_eq!(extraction.diagnosis.value.as_deref(), Some("lumbar disc strain"));
        assert_eq!(extraction.doctor_name.value.as_deref(), Some("Dr Priya Sharma"));
        assert_eq!(
            extraction.restrictions.value.as_deref(),
            Some(&["No lifting over 10kg".to_string(), "No repetitive bending".to_string()][..])
        );
    }

    #[test]
    fn all_confidences_within_unit_interval() {
        let extraction = extract_certificate_data(SAMPLE_CERT, "workcover_cert.pdf");
        for (name, present, confidence) in extraction.field_confidences() {
            assert!(
                (0.0..=1.0).contains(&confidence),
                "{name} confidence {confidence} out of range"
            );
            if !present {
                assert_eq!(confidence, 0.0, "{name} absent but confidence nonzero");
            }
        }
    }

    #[test]
    fn sparse_text_leaves_fields_missing() {
        let extraction = extract_certificate_data("Short note.", "note.txt");
        assert!(extraction.start_date.value.is_none());
        assert!(extraction.work_capacity.value.is_none());
        assert!(extraction.restrictions.value.is_none());
        assert_eq!(extraction.start_date.confidence, 0.0);
        // Type always classifies, at worst as a low-confidence Other.
        assert_eq!(extraction.certificate_type.value, Some(CertificateType::Other));
    }
}
