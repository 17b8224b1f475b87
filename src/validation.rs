use serde::{Deserialize, Serialize};

use crate::models::enums::WorkCapacity;
use crate::models::CertificateExtraction;

/// Outcome of validating one extraction.
///
/// `is_valid` is purely a function of error presence. Warnings never block
/// ingestion; they exist to route the certificate to manual review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Check an extraction for completeness and internal consistency.
///
/// Errors (blocking): a certificate without a start date cannot be filed
/// against a claim period. Warnings (non-blocking): a `fit` capacity alongside
/// a non-empty restriction list is logically inconsistent, and any matched
/// field below the low-confidence threshold is flagged by name.
pub fn validate_certificate_data(extraction: &CertificateExtraction) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if extraction.start_date.value.is_none() {
        errors.push("Start date is missing".to_string());
    }

    let has_restrictions = extraction
        .restrictions
        .value
        .as_ref()
        .is_some_and(|r| !r.is_empty());
    if extraction.work_capacity.value == Some(WorkCapacity::Fit) && has_restrictions {
        warnings.push(
            "Work capacity is 'fit' but restrictions are listed — inconsistent".to_string(),
        );
    }

    for field in extraction.low_confidence_fields() {
        warnings.push(format!("Low extraction confidence for {field}"));
    }

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::certificate::ExtractedField;
    use crate::models::enums::CertificateType;
    use chrono::NaiveDate;

    fn extraction_with_start_date() -> CertificateExtraction {
        CertificateExtraction {
            certificate_type: ExtractedField::found(
                CertificateType::WorkcoverCertificate,
                0.9,
                None,
            ),
            start_date: ExtractedField::found(
                NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                0.9,
                None,
            ),
            ..Default::default()
        }
    }

    #[test]
    fn missing_start_date_is_blocking_error() {
        let result = validate_certificate_data(&CertificateExtraction {
            certificate_type: ExtractedField::found(CertificateType::GpReport, 0.8, None),
            ..Default::default()
        });
        assert!(!result.is_valid);
        assert!(result.errors.iter().any(|e| e.contains("Start date")));
    }

    #[test]
    fn valid_iff_no_errors() {
        let result = validate_certificate_data(&extraction_with_start_date());
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn fit_with_restrictions_warns_but_stays_valid() {
        let mut extraction = extraction_with_start_date();
        extraction.work_capacity = ExtractedField::found(WorkCapacity::Fit, 0.85, None);
        extraction.restrictions =
            ExtractedField::found(vec!["no lifting".to_string()], 0.8, None);

        let result = validate_certificate_data(&extraction);
        assert!(result.is_valid, "warnings must never affect validity");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("inconsistent")));
    }

    #[test]
    fn unfit_with_restrictions_is_consistent() {
        let mut extraction = extraction_with_start_date();
        extraction.work_capacity = ExtractedField::found(WorkCapacity::Unfit, 0.9, None);
        extraction.restrictions =
            ExtractedField::found(vec!["no driving".to_string()], 0.8, None);

        let result = validate_certificate_data(&extraction);
        assert!(!result.warnings.iter().any(|w| w.contains("inconsistent")));
    }

    #[test]
    fn low_confidence_field_warned_by_name() {
        let mut extraction = extraction_with_start_date();
        extraction.doctor_name = ExtractedField::found("Dr Smith".to_string(), 0.3, None);

        let result = validate_certificate_data(&extraction);
        assert!(result.is_valid);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("doctor_name")));
    }

    #[test]
    fn missing_fields_do_not_trigger_confidence_warnings() {
        // Absent fields carry confidence 0 by construction; only matched
        // fields below threshold are flagged.
        let result = validate_certificate_data(&extraction_with_start_date());
        assert!(!result.warnings.iter().any(|w| w.contains("Low extraction")));
    }
}
