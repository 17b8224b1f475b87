use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;
use crate::extraction::confidence::thresholds;
use crate::extraction::extract_certificate_data;
use crate::models::enums::{ExpiryAlertLevel, IngestionSource};
use crate::models::CertificateExtraction;
use crate::validation::validate_certificate_data;

// ---------------------------------------------------------------------------
// DocumentMeta & IngestionResult
// ---------------------------------------------------------------------------

/// Source metadata for one ingested certificate document, supplied by the
/// document-ingestion collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub filename: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub source: IngestionSource,
    pub case_id: Option<Uuid>,
}

/// Result of ingesting one certificate, written back to storage by the
/// caller and optionally linked to a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionResult {
    pub success: bool,
    pub certificate_id: Uuid,
    pub linked_case_id: Option<Uuid>,
    pub extracted_data: CertificateExtraction,
    pub requires_manual_review: bool,
    pub review_reasons: Vec<String>,
    pub days_until_expiry: Option<i64>,
    pub alert_level: Option<ExpiryAlertLevel>,
}

// ---------------------------------------------------------------------------
// Expiry classification
// ---------------------------------------------------------------------------

/// Classify remaining certificate validity into an alert level.
/// Already expired (<= 0 days) is critical; expiring within a week warrants a
/// warning; within a fortnight is informational; beyond that, no alert.
pub fn expiry_alert_level(days_until_expiry: i64) -> Option<ExpiryAlertLevel> {
    match days_until_expiry {
        d if d <= 0 => Some(ExpiryAlertLevel::Critical),
        1..=7 => Some(ExpiryAlertLevel::Warning),
        8..=14 => Some(ExpiryAlertLevel::Info),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Orchestration
// ---------------------------------------------------------------------------

/// Ingest a certificate document as of the local date.
pub fn ingest_certificate(
    text: &str,
    meta: &DocumentMeta,
) -> Result<IngestionResult, CoreError> {
    ingest_certificate_at(text, meta, Local::now().date_naive())
}

/// Ingest a certificate document as of an explicit date.
///
/// Runs the extractor and validator, computes expiry metadata relative to
/// `today`, and decides whether a human needs to look at the result before it
/// is trusted. The only failure path is a document with no extractable text;
/// every quality concern is reported as data on the result.
pub fn ingest_certificate_at(
    text: &str,
    meta: &DocumentMeta,
    today: NaiveDate,
) -> Result<IngestionResult, CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::EmptyDocument {
            filename: meta.filename.clone(),
        });
    }

    let extracted = extract_certificate_data(text, &meta.filename);
    let validation = validate_certificate_data(&extracted);

    let days_until_expiry = extracted
        .end_date
        .value
        .map(|end| (end - today).num_days());
    let alert_level = days_until_expiry.and_then(expiry_alert_level);

    let mut review_reasons: Vec<String> = validation.warnings.clone();
    let overall = extracted.overall_confidence();
    if overall < thresholds::LOW {
        review_reasons.push(format!(
            "Overall extraction confidence {overall:.2} is below {:.2}",
            thresholds::LOW
        ));
    }
    let requires_manual_review = !review_reasons.is_empty();

    let certificate_id = Uuid::new_v4();
    tracing::info!(
        certificate_id = %certificate_id,
        filename = %meta.filename,
        source = meta.source.as_str(),
        success = validation.is_valid,
        manual_review = requires_manual_review,
        overall_confidence = overall as f64,
        "Certificate ingestion complete"
    );

    Ok(IngestionResult {
        success: validation.is_valid,
        certificate_id,
        linked_case_id: meta.case_id,
        extracted_data: extracted,
        requires_manual_review,
        review_reasons,
        days_until_expiry,
        alert_level,
    })
}
