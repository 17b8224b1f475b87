use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::{CertificateType, WorkCapacity};
use crate::extraction::confidence::thresholds;

// ---------------------------------------------------------------------------
// ExtractedField
// ---------------------------------------------------------------------------

/// A single extracted value with the confidence of the matcher that produced
/// it and, where available, the span of source text it came from.
///
/// Invariants: confidence is always in [0,1]; an absent value always carries
/// confidence 0. Both are enforced by the constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedField<T> {
    pub value: Option<T>,
    pub confidence: f32,
    pub raw_span: Option<String>,
}

impl<T> ExtractedField<T> {
    /// A matched value. Confidence is clamped to [0,1].
    pub fn found(value: T, confidence: f32, raw_span: Option<String>) -> Self {
        Self {
            value: Some(value),
            confidence: confidence.clamp(0.0, 1.0),
            raw_span,
        }
    }

    /// No matcher fired. An unmatched field is never guessed.
    pub fn missing() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            raw_span: None,
        }
    }

    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }
}

impl<T> Default for ExtractedField<T> {
    fn default() -> Self {
        Self::missing()
    }
}

// ---------------------------------------------------------------------------
// CertificateExtraction
// ---------------------------------------------------------------------------

/// Structured result of extracting one certificate document.
/// Created once per ingested document and never mutated afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CertificateExtraction {
    pub certificate_type: ExtractedField<CertificateType>,
    pub start_date: ExtractedField<NaiveDate>,
    pub end_date: ExtractedField<NaiveDate>,
    pub work_capacity: ExtractedField<WorkCapacity>,
    pub restrictions: ExtractedField<Vec<String>>,
    pub hours_per_week: ExtractedField<f32>,
    pub diagnosis: ExtractedField<String>,
    pub doctor_name: ExtractedField<String>,
}

impl CertificateExtraction {
    /// Field name / confidence pairs for every field, present or not.
    pub fn field_confidences(&self) -> Vec<(&'static str, bool, f32)> {
        vec![
            ("certificate_type", self.certificate_type.is_present(), self.certificate_type.confidence),
            ("start_date", self.start_date.is_present(), self.start_date.confidence),
            ("end_date", self.end_date.is_present(), self.end_date.confidence),
            ("work_capacity", self.work_capacity.is_present(), self.work_capacity.confidence),
            ("restrictions", self.restrictions.is_present(), self.restrictions.confidence),
            ("hours_per_week", self.hours_per_week.is_present(), self.hours_per_week.confidence),
            ("diagnosis", self.diagnosis.is_present(), self.diagnosis.confidence),
            ("doctor_name", self.doctor_name.is_present(), self.doctor_name.confidence),
        ]
    }

    /// Mean confidence over fields that matched. Zero when nothing matched.
    pub fn overall_confidence(&self) -> f32 {
        let present: Vec<f32> = self
            .field_confidences()
            .into_iter()
            .filter(|(_, present, _)| *present)
            .map(|(_, _, c)| c)
            .collect();
        if present.is_empty() {
            return 0.0;
        }
        present.iter().sum::<f32>() / present.len() as f32
    }

    /// Names of matched fields whose confidence fell below the low threshold.
    pub fn low_confidence_fields(&self) -> Vec<&'static str> {
        self.field_confidences()
            .into_iter()
            .filter(|(_, present, c)| *present && *c < thresholds::LOW)
            .map(|(name, _, _)| name)
            .collect()
    }
}
