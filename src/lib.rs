//! Case intelligence core for return-to-work claims management.
//!
//! Three deterministic, explainable subsystems over immutable inputs:
//! certificate ingestion (pattern extraction + validation + expiry routing),
//! clinical evidence evaluation (an ordered rule table producing flags and
//! targeted actions), and outcome prediction (a versioned weighted-factor
//! score with a reconstructible explanation).
//!
//! Everything here is a pure synchronous function over its input snapshot:
//! no I/O, no shared mutable state, safe to call concurrently across cases.
//! Storage, HTTP, and UI live in the surrounding application and interact
//! with this crate only through the result types.

pub mod error;
pub mod evaluation;
pub mod extraction;
pub mod ingestion;
pub mod models;
pub mod prediction;
pub mod validation;

pub use error::CoreError;
pub use evaluation::{evaluate_case, evaluate_case_at, ClinicalEvaluation};
pub use extraction::extract_certificate_data;
pub use ingestion::{
    expiry_alert_level, ingest_certificate, ingest_certificate_at, DocumentMeta, IngestionResult,
};
pub use models::{CaseSnapshot, CertificateExtraction, ExtractedField};
pub use prediction::{
    predict_case, predict_case_at, predict_cases, summarize_predictions, CasePrediction,
    PredictionSummary,
};
pub use validation::{validate_certificate_data, ValidationResult};
